//! Sign-in / sign-up form. One step; `mode` decides which call is made.

use crate::backend::Backend;
use crate::core::field::{ChoiceOption, FieldKind, FieldSpec};
use crate::core::flow::Flow;
use crate::core::form_record::FormRecord;
use crate::core::step::Step;
use crate::core::validation::{REQUIRED_FIELDS_MESSAGE, ValidationResult};
use crate::core::value::Value;
use crate::domain::user::{SignUpDraft, User};
use crate::error::{FlowError, SubmitError};
use crate::flows::required_text;
use crate::wizard::WizardSession;

pub const MODE: &str = "mode";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const PHONE: &str = "phone";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::SignIn => "signin",
            Self::SignUp => "signup",
        }
    }

    fn from_record(record: &FormRecord) -> Self {
        match record.choice(MODE) {
            Some("signup") => Self::SignUp,
            _ => Self::SignIn,
        }
    }
}

pub fn defaults(mode: AuthMode) -> FormRecord {
    FormRecord::new()
        .with(MODE, Value::choice(mode.code()))
        .with(EMAIL, "")
        .with(PASSWORD, "")
        .with(FIRST_NAME, "")
        .with(LAST_NAME, "")
        .with(PHONE, "")
}

pub fn flow() -> Result<Flow, FlowError> {
    let step = Step::builder("credentials", "Welcome")
        .field(FieldSpec::new(
            MODE,
            "Mode",
            FieldKind::Choice(vec![
                ChoiceOption::new("signin", "Sign in"),
                ChoiceOption::new("signup", "Create account"),
            ]),
        ))
        .field(FieldSpec::new(EMAIL, "Email", FieldKind::Email).required())
        .field(FieldSpec::new(PASSWORD, "Password", FieldKind::Password).required())
        .field(FieldSpec::text(FIRST_NAME, "First Name"))
        .field(FieldSpec::text(LAST_NAME, "Last Name"))
        .field(FieldSpec::new(PHONE, "Phone", FieldKind::Phone))
        .require([EMAIL, PASSWORD], REQUIRED_FIELDS_MESSAGE)
        .validate(|record| {
            let needs_names = AuthMode::from_record(record) == AuthMode::SignUp;
            if needs_names && (record.is_empty(FIRST_NAME) || record.is_empty(LAST_NAME)) {
                ValidationResult::fail(REQUIRED_FIELDS_MESSAGE)
            } else {
                ValidationResult::Pass
            }
        })
        .build();
    Flow::new(vec![step])
}

pub fn session(mode: AuthMode) -> Result<WizardSession, FlowError> {
    Ok(WizardSession::new("login", flow()?, defaults(mode)))
}

pub fn submitter<B: Backend + ?Sized>(
    backend: &mut B,
) -> impl FnMut(&FormRecord) -> Result<User, SubmitError> + '_ {
    move |record: &FormRecord| {
        let email = required_text(record, EMAIL)?;
        let password = record.text(PASSWORD).unwrap_or_default().to_string();
        match AuthMode::from_record(record) {
            AuthMode::SignIn => backend.sign_in(&email, &password),
            AuthMode::SignUp => backend.sign_up(SignUpDraft {
                first_name: required_text(record, FIRST_NAME)?,
                last_name: required_text(record, LAST_NAME)?,
                email,
                phone_number: record.text_or_empty(PHONE),
                password,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::domain::ids::UserId;
    use crate::domain::user::Role;
    use crate::wizard::NextOutcome;
    use std::time::Duration;

    fn backend() -> MockBackend {
        MockBackend::new(Duration::ZERO, UserId(1), 6)
    }

    #[test]
    fn sign_in_needs_email_and_password() {
        let mut backend = backend();
        let mut s = session(AuthMode::SignIn).expect("flow");
        s.set(EMAIL, "owner@courtsync.vn");
        assert_eq!(
            s.next(&mut submitter(&mut backend)),
            NextOutcome::Rejected {
                message: REQUIRED_FIELDS_MESSAGE.into()
            }
        );
    }

    #[test]
    fn wrong_password_is_a_submit_failure() {
        let mut backend = backend();
        let mut s = session(AuthMode::SignIn).expect("flow");
        s.set(EMAIL, "owner@courtsync.vn");
        s.set(PASSWORD, "nope");
        assert_eq!(
            s.next(&mut submitter(&mut backend)),
            NextOutcome::SubmitFailed {
                message: "Invalid email or password".into()
            }
        );

        s.set(PASSWORD, "owner1234");
        let user = match s.next(&mut submitter(&mut backend)) {
            NextOutcome::Completed(user) => user,
            other => panic!("expected sign-in, got {other:?}"),
        };
        assert_eq!(user.role, Role::Owner);
    }

    #[test]
    fn sign_up_requires_names_and_creates_customer() {
        let mut backend = backend();
        let mut s = session(AuthMode::SignUp).expect("flow");
        s.set(EMAIL, "new.player@gmail.com");
        s.set(PASSWORD, "shuttle99");
        assert!(matches!(
            s.next(&mut submitter(&mut backend)),
            NextOutcome::Rejected { .. }
        ));

        s.set(FIRST_NAME, "Bao");
        s.set(LAST_NAME, "Do");
        let user = match s.next(&mut submitter(&mut backend)) {
            NextOutcome::Completed(user) => user,
            other => panic!("expected sign-up, got {other:?}"),
        };
        assert_eq!(user.role, Role::Customer);
        assert!(backend.sign_in("new.player@gmail.com", "shuttle99").is_ok());
    }
}
