use crate::core::form_record::FormRecord;
use crate::error::SubmitError;

/// Terminal action of a wizard. Receives the whole record once the last
/// step has validated and either produces the new entity or a displayable
/// failure.
pub trait SubmitAction {
    type Output;

    fn submit(&mut self, record: &FormRecord) -> Result<Self::Output, SubmitError>;
}

impl<F, T> SubmitAction for F
where
    F: FnMut(&FormRecord) -> Result<T, SubmitError>,
{
    type Output = T;

    fn submit(&mut self, record: &FormRecord) -> Result<T, SubmitError> {
        self(record)
    }
}
