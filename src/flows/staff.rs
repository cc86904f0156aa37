//! Staff account creation. A single-step wizard, so `next()` submits.

use crate::backend::Backend;
use crate::core::field::{ChoiceOption, FieldKind, FieldSpec};
use crate::core::flow::Flow;
use crate::core::form_record::FormRecord;
use crate::core::step::Step;
use crate::core::validation::ValidationResult;
use crate::core::validators::is_email;
use crate::core::value::Value;
use crate::domain::facility::Facility;
use crate::domain::ids::FacilityId;
use crate::domain::user::{StaffDraft, User};
use crate::error::{FlowError, SubmitError};
use crate::flows::required_text;
use crate::wizard::WizardSession;
use rand::Rng;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phoneNumber";
pub const PASSWORD: &str = "password";
pub const FACILITY: &str = "facilityID";

const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";
const GENERATED_PASSWORD_LEN: usize = 12;

pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_PASSWORD_LEN)
        .map(|_| char::from(PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())]))
        .collect()
}

/// Puts a fresh generated password into the session and returns it, like
/// the form's Generate button.
pub fn fill_generated_password(session: &mut WizardSession) -> String {
    let password = generate_password();
    session.set(PASSWORD, password.as_str());
    password
}

/// The first facility is preselected, matching the form's initial state.
pub fn defaults(facilities: &[Facility]) -> FormRecord {
    let facility = facilities
        .first()
        .map(|f| f.id.to_string())
        .unwrap_or_default();
    FormRecord::new()
        .with(FIRST_NAME, "")
        .with(LAST_NAME, "")
        .with(EMAIL, "")
        .with(PHONE, "")
        .with(PASSWORD, "")
        .with(FACILITY, Value::Choice(facility))
}

pub fn flow(facilities: &[Facility], min_password_len: usize) -> Result<Flow, FlowError> {
    let options = facilities
        .iter()
        .map(|f| ChoiceOption::new(f.id.to_string(), f.name.clone()))
        .collect();

    let step = Step::builder("account", "Staff Account")
        .field(FieldSpec::text(FIRST_NAME, "First Name").required())
        .field(FieldSpec::text(LAST_NAME, "Last Name").required())
        .field(FieldSpec::new(EMAIL, "Email", FieldKind::Email).required())
        .field(FieldSpec::new(PHONE, "Phone Number", FieldKind::Phone).required())
        .field(FieldSpec::new(PASSWORD, "Password", FieldKind::Password).required())
        .field(FieldSpec::new(FACILITY, "Facility", FieldKind::Choice(options)).required())
        .validate(move |record| validate_account(record, min_password_len))
        .build();
    Flow::new(vec![step])
}

pub fn session(facilities: &[Facility], min_password_len: usize) -> Result<WizardSession, FlowError> {
    Ok(WizardSession::new(
        "create-staff",
        flow(facilities, min_password_len)?,
        defaults(facilities),
    ))
}

fn validate_account(record: &FormRecord, min_password_len: usize) -> ValidationResult {
    if record.is_empty(FIRST_NAME) || record.is_empty(LAST_NAME) {
        return ValidationResult::fail("Please enter first and last name");
    }
    if record.is_empty(EMAIL) {
        return ValidationResult::fail("Please enter email address");
    }
    if !is_email(&record.text_or_empty(EMAIL)) {
        return ValidationResult::fail("Please enter a valid email address");
    }
    if record.is_empty(PHONE) {
        return ValidationResult::fail("Please enter phone number");
    }
    let password = record.text(PASSWORD).unwrap_or_default();
    if password.is_empty() {
        return ValidationResult::fail("Please enter password");
    }
    if password.chars().count() < min_password_len {
        return ValidationResult::fail(format!(
            "Password must be at least {min_password_len} characters long"
        ));
    }
    if record.integer(FACILITY).is_none_or(|id| id <= 0) {
        return ValidationResult::fail("Please select a facility");
    }
    ValidationResult::Pass
}

pub fn draft(record: &FormRecord) -> Result<StaffDraft, SubmitError> {
    let facility_id = record
        .integer(FACILITY)
        .and_then(|id| u64::try_from(id).ok())
        .map(FacilityId)
        .ok_or_else(|| SubmitError::InvalidForm("no facility selected".into()))?;
    Ok(StaffDraft {
        first_name: required_text(record, FIRST_NAME)?,
        last_name: required_text(record, LAST_NAME)?,
        email: required_text(record, EMAIL)?,
        phone_number: required_text(record, PHONE)?,
        // Passwords are taken verbatim, surrounding spaces included.
        password: record.text(PASSWORD).unwrap_or_default().to_string(),
        facility_id,
    })
}

pub fn submitter<B: Backend + ?Sized>(
    backend: &mut B,
) -> impl FnMut(&FormRecord) -> Result<User, SubmitError> + '_ {
    move |record: &FormRecord| backend.create_staff(draft(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::domain::ids::UserId;
    use crate::domain::user::Role;
    use crate::wizard::NextOutcome;
    use std::time::Duration;

    fn setup() -> (MockBackend, WizardSession) {
        let mut backend = MockBackend::new(Duration::ZERO, UserId(1), 6);
        let facilities = backend.facilities().expect("facilities");
        let session = session(&facilities, 8).expect("flow");
        (backend, session)
    }

    fn rejection(session: &mut WizardSession, backend: &mut MockBackend) -> String {
        match session.next(&mut submitter(backend)) {
            NextOutcome::Rejected { message } => message,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn checks_run_in_form_order() {
        let (mut backend, mut s) = setup();
        assert_eq!(rejection(&mut s, &mut backend), "Please enter first and last name");

        s.set(FIRST_NAME, "Thu");
        s.set(LAST_NAME, "Vo");
        assert_eq!(rejection(&mut s, &mut backend), "Please enter email address");

        s.set(EMAIL, "thu.vo");
        assert_eq!(rejection(&mut s, &mut backend), "Please enter a valid email address");

        s.set(EMAIL, "thu.vo@courtsync.vn");
        assert_eq!(rejection(&mut s, &mut backend), "Please enter phone number");

        s.set(PHONE, "+84907777777");
        assert_eq!(rejection(&mut s, &mut backend), "Please enter password");

        s.set(PASSWORD, "short");
        assert_eq!(
            rejection(&mut s, &mut backend),
            "Password must be at least 8 characters long"
        );

        s.set(PASSWORD, "longenough");
        s.set(FACILITY, 0);
        assert_eq!(rejection(&mut s, &mut backend), "Please select a facility");
    }

    #[test]
    fn single_step_submits_on_next() {
        let (mut backend, mut s) = setup();
        assert_eq!(s.record().integer(FACILITY), Some(1));
        s.set(FIRST_NAME, "Thu");
        s.set(LAST_NAME, "Vo");
        s.set(EMAIL, "thu.vo@courtsync.vn");
        s.set(PHONE, "+84907777777");
        s.set(PASSWORD, generate_password());

        let user = match s.next(&mut submitter(&mut backend)) {
            NextOutcome::Completed(user) => user,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.facility_id, Some(FacilityId(1)));
        assert!(!s.is_open());
    }

    #[test]
    fn duplicate_email_keeps_form_open() {
        let (mut backend, mut s) = setup();
        s.set(FIRST_NAME, "Linh");
        s.set(LAST_NAME, "Tran");
        s.set(EMAIL, "linh.tran@courtsync.vn");
        s.set(PHONE, "+84902222222");
        s.set(PASSWORD, "password123");

        let outcome = s.next(&mut submitter(&mut backend));
        assert_eq!(
            outcome,
            NextOutcome::SubmitFailed {
                message: "An account with this email already exists".into()
            }
        );
        assert!(s.is_open());
        assert_eq!(s.record().text(EMAIL), Some("linh.tran@courtsync.vn"));
    }

    #[test]
    fn generated_password_fills_the_field() {
        let (mut backend, mut s) = setup();
        let password = fill_generated_password(&mut s);
        assert_eq!(s.record().text(PASSWORD), Some(password.as_str()));
        s.set(FIRST_NAME, "Thu");
        s.set(LAST_NAME, "Vo");
        s.set(EMAIL, "thu.vo@courtsync.vn");
        s.set(PHONE, "+84907777777");
        assert!(matches!(
            s.next(&mut submitter(&mut backend)),
            NextOutcome::Completed(_)
        ));
        assert!(backend.sign_in("thu.vo@courtsync.vn", &password).is_ok());
    }

    #[test]
    fn generated_password_uses_alphabet() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_PASSWORD_LEN);
        assert!(password.bytes().all(|b| PASSWORD_ALPHABET.contains(&b)));
    }
}
