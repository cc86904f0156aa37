use crate::core::form_record::FormRecord;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Pass,
    Fail(String),
}

impl ValidationResult {
    /// Failure with a user-facing message. Blank messages fall back to the
    /// generic required-fields text so the form never shows an empty error.
    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Fail(REQUIRED_FIELDS_MESSAGE.to_string())
        } else {
            Self::Fail(message)
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail(message) => Some(message.as_str()),
        }
    }

    /// Keeps the first failure.
    pub fn and_then(self, next: impl FnOnce() -> ValidationResult) -> ValidationResult {
        match self {
            Self::Pass => next(),
            fail => fail,
        }
    }
}

impl From<Result<(), String>> for ValidationResult {
    fn from(value: Result<(), String>) -> Self {
        match value {
            Ok(()) => Self::Pass,
            Err(message) => Self::fail(message),
        }
    }
}

pub type StepValidator = Box<dyn Fn(&FormRecord) -> ValidationResult + Send + Sync>;

/// Runs validators in order and reports the first failure.
pub fn run_validators(validators: &[StepValidator], record: &FormRecord) -> ValidationResult {
    for validator in validators {
        let result = validator(record);
        if !result.is_pass() {
            return result;
        }
    }
    ValidationResult::Pass
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_failure_gets_default_message() {
        let result = ValidationResult::fail("  ");
        assert_eq!(result.message(), Some(REQUIRED_FIELDS_MESSAGE));
    }

    #[test]
    fn first_failure_wins() {
        let validators: Vec<StepValidator> = vec![
            Box::new(|_| ValidationResult::Pass),
            Box::new(|_| ValidationResult::fail("first")),
            Box::new(|_| ValidationResult::fail("second")),
        ];
        let result = run_validators(&validators, &FormRecord::new());
        assert_eq!(result.message(), Some("first"));
    }

    #[test]
    fn converts_from_field_rule_result() {
        assert!(ValidationResult::from(Ok(())).is_pass());
        let failed = ValidationResult::from(Err::<(), _>("bad".to_string()));
        assert_eq!(failed.message(), Some("bad"));
    }
}
