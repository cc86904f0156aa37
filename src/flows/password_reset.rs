//! Forgot-password flow. Not a [`WizardSession`](crate::wizard::WizardSession):
//! the path depends on the delivery method and the OTP step carries a resend
//! cool-down.

use crate::backend::{Backend, OtpChannel};
use crate::config::Config;
use crate::core::form_record::FormRecord;
use crate::core::validation::ValidationResult;
use crate::core::validators;
use crate::core::value::Value;
use crate::countdown::Countdown;
use crate::error::SubmitError;
use tracing::{debug, info, warn};

pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const OTP: &str = "otp";
pub const NEW_PASSWORD: &str = "newPassword";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMethod {
    EmailOtp,
    PhoneOtp,
    /// Mails a reset link; there is no code to enter.
    EmailLink,
}

impl ResetMethod {
    pub const ALL: [ResetMethod; 3] = [Self::EmailOtp, Self::PhoneOtp, Self::EmailLink];

    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailOtp => "Email verification code",
            Self::PhoneOtp => "SMS verification code",
            Self::EmailLink => "Email reset link",
        }
    }

    fn uses_phone(&self) -> bool {
        matches!(self, Self::PhoneOtp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    Method,
    Contact,
    Otp,
    Reset,
    Success,
}

impl ResetState {
    fn previous(&self) -> Option<ResetState> {
        match self {
            Self::Method | Self::Success => None,
            Self::Contact => Some(Self::Method),
            Self::Otp => Some(Self::Contact),
            Self::Reset => Some(Self::Otp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Moved(ResetState),
    /// Client-side check failed; the state did not change.
    Rejected { message: String },
    /// The backend refused; the state did not change.
    Failed { message: String },
    /// Resend pressed while the cool-down is still running.
    CoolingDown { remaining: u32 },
    /// The action does not apply to the current state.
    Ignored,
    Closed,
}

pub struct PasswordReset {
    state: ResetState,
    method: Option<ResetMethod>,
    record: FormRecord,
    countdown: Countdown,
    code_length: usize,
    min_password_len: usize,
    last_error: Option<String>,
    is_open: bool,
}

fn blank_record() -> FormRecord {
    FormRecord::new()
        .with(EMAIL, "")
        .with(PHONE, "")
        .with(OTP, "")
        .with(NEW_PASSWORD, "")
        .with(CONFIRM_PASSWORD, "")
}

impl PasswordReset {
    pub fn new(cooldown_secs: u32, code_length: usize, min_password_len: usize) -> Self {
        Self {
            state: ResetState::Method,
            method: None,
            record: blank_record(),
            countdown: Countdown::new(cooldown_secs),
            code_length,
            min_password_len,
            last_error: None,
            is_open: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.otp.cooldown_secs,
            config.otp.code_length,
            config.password.min_length,
        )
    }

    pub fn state(&self) -> ResetState {
        self.state
    }

    pub fn method(&self) -> Option<ResetMethod> {
        self.method
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set(&mut self, id: &str, value: impl Into<Value>) {
        self.record.set(id, value);
        self.last_error = None;
    }

    /// The channel the code goes to, once a method and contact are known.
    pub fn channel(&self) -> Option<OtpChannel> {
        match self.method? {
            ResetMethod::PhoneOtp => Some(OtpChannel::Phone(self.record.text_or_empty(PHONE))),
            ResetMethod::EmailOtp | ResetMethod::EmailLink => {
                Some(OtpChannel::Email(self.record.text_or_empty(EMAIL)))
            }
        }
    }

    pub fn choose_method(&mut self, method: ResetMethod) -> ResetOutcome {
        if !self.is_open {
            return ResetOutcome::Closed;
        }
        if self.state != ResetState::Method {
            return ResetOutcome::Ignored;
        }
        self.method = Some(method);
        self.last_error = None;
        self.move_to(ResetState::Contact)
    }

    /// Contact → Otp for the code methods, Contact → Success for the link.
    pub fn send_code<B: Backend + ?Sized>(&mut self, backend: &mut B) -> ResetOutcome {
        if !self.is_open {
            return ResetOutcome::Closed;
        }
        let Some(method) = self.method.filter(|_| self.state == ResetState::Contact) else {
            return ResetOutcome::Ignored;
        };
        if let ValidationResult::Fail(message) = self.validate_contact(method) {
            return self.reject(message);
        }

        let result = match self.channel() {
            Some(OtpChannel::Email(email)) if method == ResetMethod::EmailLink => {
                backend.send_reset_link(&email)
            }
            Some(channel) => backend.send_otp(&channel),
            None => return ResetOutcome::Ignored,
        };
        if let Err(err) = result {
            return self.fail(err);
        }

        if method == ResetMethod::EmailLink {
            return self.finish();
        }
        self.countdown.start();
        self.move_to(ResetState::Otp)
    }

    pub fn resend<B: Backend + ?Sized>(&mut self, backend: &mut B) -> ResetOutcome {
        if !self.is_open {
            return ResetOutcome::Closed;
        }
        if self.state != ResetState::Otp {
            return ResetOutcome::Ignored;
        }
        if !self.countdown.can_resend() {
            return ResetOutcome::CoolingDown {
                remaining: self.countdown.remaining(),
            };
        }
        let Some(channel) = self.channel() else {
            return ResetOutcome::Ignored;
        };
        if let Err(err) = backend.send_otp(&channel) {
            return self.fail(err);
        }
        debug!(%channel, "otp resent");
        self.record.set(OTP, "");
        self.last_error = None;
        self.countdown.start();
        ResetOutcome::Moved(self.state)
    }

    pub fn verify<B: Backend + ?Sized>(&mut self, backend: &mut B) -> ResetOutcome {
        if !self.is_open {
            return ResetOutcome::Closed;
        }
        if self.state != ResetState::Otp {
            return ResetOutcome::Ignored;
        }
        let code = self.record.text_or_empty(OTP);
        let check = validators::exact_digits(self.code_length, "Please enter the complete OTP code");
        if let Err(message) = check(code.as_str()) {
            return self.reject(message);
        }
        let Some(channel) = self.channel() else {
            return ResetOutcome::Ignored;
        };
        if let Err(err) = backend.verify_otp(&channel, &code) {
            return self.fail(err);
        }
        self.countdown.clear();
        self.move_to(ResetState::Reset)
    }

    pub fn submit_password<B: Backend + ?Sized>(&mut self, backend: &mut B) -> ResetOutcome {
        if !self.is_open {
            return ResetOutcome::Closed;
        }
        if self.state != ResetState::Reset {
            return ResetOutcome::Ignored;
        }
        if let ValidationResult::Fail(message) = self.validate_passwords() {
            return self.reject(message);
        }
        let Some(channel) = self.channel() else {
            return ResetOutcome::Ignored;
        };
        let password = self.record.text(NEW_PASSWORD).unwrap_or_default().to_string();
        if let Err(err) = backend.reset_password(&channel, &password) {
            return self.fail(err);
        }
        self.finish()
    }

    /// One second of the resend cool-down.
    pub fn tick(&mut self) -> bool {
        self.countdown.tick()
    }

    pub fn elapse(&mut self, elapsed: std::time::Duration) {
        self.countdown.elapse(elapsed);
    }

    /// Returns to the immediately preceding state. Leaving the OTP entry
    /// stops the cool-down.
    pub fn back(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        let Some(previous) = self.state.previous() else {
            return false;
        };
        if self.state == ResetState::Otp {
            self.countdown.clear();
        }
        if previous == ResetState::Method {
            self.method = None;
        }
        self.last_error = None;
        debug!(from = ?self.state, to = ?previous, "password reset went back");
        self.state = previous;
        true
    }

    pub fn reset(&mut self) {
        self.state = ResetState::Method;
        self.method = None;
        self.record = blank_record();
        self.countdown.clear();
        self.last_error = None;
        self.is_open = true;
    }

    /// Resets and closes the flow.
    pub fn cancel(&mut self) {
        debug!(state = ?self.state, "password reset cancelled");
        self.reset();
        self.is_open = false;
    }

    fn validate_contact(&self, method: ResetMethod) -> ValidationResult {
        if method.uses_phone() {
            let phone = self.record.text_or_empty(PHONE);
            if phone.is_empty() {
                return ValidationResult::fail("Please enter your phone number");
            }
            validators::phone("Please enter a valid phone number")(phone.as_str()).into()
        } else if self.record.is_empty(EMAIL) {
            ValidationResult::fail("Please enter your email address")
        } else {
            ValidationResult::Pass
        }
    }

    fn validate_passwords(&self) -> ValidationResult {
        let password = self.record.text(NEW_PASSWORD).unwrap_or_default();
        let confirm = self.record.text(CONFIRM_PASSWORD).unwrap_or_default();
        if password.is_empty() || confirm.is_empty() {
            return ValidationResult::fail("Please fill in all fields");
        }
        if password != confirm {
            return ValidationResult::fail("Passwords do not match");
        }
        let min = self.min_password_len;
        validators::min_length(min, format!("Password must be at least {min} characters long"))(
            password,
        )
        .into()
    }

    fn move_to(&mut self, state: ResetState) -> ResetOutcome {
        debug!(from = ?self.state, to = ?state, "password reset moved");
        self.state = state;
        self.last_error = None;
        ResetOutcome::Moved(state)
    }

    fn reject(&mut self, message: String) -> ResetOutcome {
        self.last_error = Some(message.clone());
        ResetOutcome::Rejected { message }
    }

    fn fail(&mut self, err: SubmitError) -> ResetOutcome {
        let message = err.to_string();
        warn!(state = ?self.state, error = %message, "password reset step failed");
        self.last_error = Some(message.clone());
        ResetOutcome::Failed { message }
    }

    fn finish(&mut self) -> ResetOutcome {
        info!(method = ?self.method, "password reset finished");
        self.countdown.clear();
        self.state = ResetState::Success;
        self.is_open = false;
        self.last_error = None;
        ResetOutcome::Closed
    }
}
