//! The boundary between the flows and whatever stores the data. Flows only
//! ever talk to [`Backend`]; [`mock::MockBackend`] fills it with seeded
//! in-memory data and a fixed simulated latency.

pub mod mock;
pub mod seed;

use crate::domain::court::{Court, CourtDraft, CourtStatus};
use crate::domain::facility::{Facility, FacilityDraft, FacilityUpdate};
use crate::domain::ids::{CourtId, FacilityId, UserId};
use crate::domain::user::{SignUpDraft, StaffDraft, User, UserStatus};
use crate::error::SubmitError;
use std::fmt;

pub use mock::MockBackend;

/// Where a one-time code is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OtpChannel {
    Email(String),
    Phone(String),
}

impl OtpChannel {
    /// Canonical form used as a lookup key: lowercase email, phone without
    /// whitespace.
    pub fn normalized(&self) -> OtpChannel {
        match self {
            Self::Email(email) => Self::Email(email.trim().to_lowercase()),
            Self::Phone(phone) => {
                Self::Phone(phone.chars().filter(|c| !c.is_whitespace()).collect())
            }
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        match self.normalized() {
            Self::Email(email) => user.email.eq_ignore_ascii_case(&email),
            Self::Phone(phone) => {
                let user_phone: String = user
                    .phone_number
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                user_phone == phone
            }
        }
    }
}

impl fmt::Display for OtpChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(email) => write!(f, "email {email}"),
            Self::Phone(phone) => write!(f, "phone {phone}"),
        }
    }
}

/// Figures for the dashboard that have no source in this crate yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivitySnapshot {
    pub monthly_revenue: u64,
    pub total_bookings: u64,
}

pub trait Backend {
    /// New facilities start out pending approval.
    fn register_facility(&mut self, draft: FacilityDraft) -> Result<Facility, SubmitError>;
    fn create_court(&mut self, draft: CourtDraft) -> Result<Court, SubmitError>;
    fn create_staff(&mut self, draft: StaffDraft) -> Result<User, SubmitError>;

    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, SubmitError>;
    fn sign_up(&mut self, draft: SignUpDraft) -> Result<User, SubmitError>;

    /// Refuses contacts that belong to no account.
    fn send_otp(&mut self, channel: &OtpChannel) -> Result<(), SubmitError>;
    fn verify_otp(&mut self, channel: &OtpChannel, code: &str) -> Result<(), SubmitError>;
    fn send_reset_link(&mut self, email: &str) -> Result<(), SubmitError>;
    /// Only valid after `verify_otp` succeeded for the same channel.
    fn reset_password(
        &mut self,
        channel: &OtpChannel,
        new_password: &str,
    ) -> Result<(), SubmitError>;

    fn facilities(&mut self) -> Result<Vec<Facility>, SubmitError>;
    /// Replaces the description and opening hours; everything else stays.
    fn update_facility(
        &mut self,
        id: FacilityId,
        update: FacilityUpdate,
    ) -> Result<Facility, SubmitError>;
    fn courts(&mut self) -> Result<Vec<Court>, SubmitError>;
    fn staff(&mut self) -> Result<Vec<User>, SubmitError>;
    fn set_court_status(&mut self, id: CourtId, status: CourtStatus)
    -> Result<Court, SubmitError>;
    fn delete_court(&mut self, id: CourtId) -> Result<(), SubmitError>;
    fn set_staff_status(&mut self, id: UserId, status: UserStatus) -> Result<User, SubmitError>;
    fn delete_staff(&mut self, id: UserId) -> Result<(), SubmitError>;
    fn activity(&mut self) -> Result<ActivitySnapshot, SubmitError>;
}
