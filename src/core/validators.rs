use crate::core::FieldId;
use crate::core::form_record::FormRecord;
use crate::core::validation::{StepValidator, ValidationResult};
use crate::domain::time::TimeOfDay;
use regex::Regex;
use std::sync::LazyLock;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern"));

pub fn required(message: impl Into<String>) -> Validator {
    let msg = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(msg.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_length(min: usize, message: impl Into<String>) -> Validator {
    let msg = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() < min {
            Err(msg.clone())
        } else {
            Ok(())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    let msg = message.into();
    Box::new(move |value: &str| {
        if is_email(value) {
            Ok(())
        } else {
            Err(msg.clone())
        }
    })
}

pub fn phone(message: impl Into<String>) -> Validator {
    let msg = message.into();
    Box::new(move |value: &str| {
        if is_phone(value) {
            Ok(())
        } else {
            Err(msg.clone())
        }
    })
}

pub fn time_of_day(message: impl Into<String>) -> Validator {
    let msg = message.into();
    Box::new(move |value: &str| {
        TimeOfDay::parse(value)
            .map(|_| ())
            .map_err(|_| msg.clone())
    })
}

pub fn exact_digits(count: usize, message: impl Into<String>) -> Validator {
    let msg = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() == count && value.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(msg.clone())
        }
    })
}

/// Cross-field rule: `first` must be a valid time strictly earlier than
/// `second`. Either one failing to parse fails the rule.
pub fn time_before(
    first: impl Into<FieldId>,
    second: impl Into<FieldId>,
    message: impl Into<String>,
) -> StepValidator {
    let (first, second) = (first.into(), second.into());
    let msg = message.into();
    Box::new(move |record: &FormRecord| {
        let open = TimeOfDay::parse(&record.text_or_empty(first.as_str()));
        let close = TimeOfDay::parse(&record.text_or_empty(second.as_str()));
        match (open, close) {
            (Ok(open), Ok(close)) if open.is_before(&close) => ValidationResult::Pass,
            _ => ValidationResult::fail(&msg),
        }
    })
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Whitespace inside the number is ignored.
pub fn is_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}
