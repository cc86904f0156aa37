//! Concrete wizards built on [`crate::wizard::WizardSession`]: their steps,
//! rules, default records and the mapping from a finished record to a
//! backend draft.

pub mod court;
pub mod facility;
pub mod login;
pub mod password_reset;
pub mod staff;

use crate::core::form_record::FormRecord;
use crate::domain::time::TimeOfDay;
use crate::error::SubmitError;

pub(crate) fn required_text(record: &FormRecord, id: &str) -> Result<String, SubmitError> {
    let text = record.text_or_empty(id);
    if text.is_empty() {
        return Err(SubmitError::InvalidForm(format!("`{id}` is empty")));
    }
    Ok(text)
}

pub(crate) fn required_time(record: &FormRecord, id: &str) -> Result<TimeOfDay, SubmitError> {
    TimeOfDay::parse(&record.text_or_empty(id))
        .map_err(|err| SubmitError::InvalidForm(format!("`{id}`: {err}")))
}

/// Blank means absent; anything else must parse.
pub(crate) fn optional_float(record: &FormRecord, id: &str) -> Result<Option<f64>, SubmitError> {
    if record.is_empty(id) {
        return Ok(None);
    }
    record
        .float(id)
        .map(Some)
        .ok_or_else(|| SubmitError::InvalidForm(format!("`{id}` is not a number")))
}
