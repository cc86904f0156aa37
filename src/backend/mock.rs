use crate::backend::seed::{Seed, seed};
use crate::backend::{ActivitySnapshot, Backend, OtpChannel};
use crate::config::Config;
use crate::domain::court::{Court, CourtDraft, CourtPrice, CourtStatus, PriceStatus};
use crate::domain::facility::{Facility, FacilityDraft, FacilityUpdate};
use crate::domain::ids::{CourtId, CourtPriceId, FacilityId, UserId};
use crate::domain::user::{Role, SignUpDraft, StaffDraft, User, UserStatus};
use crate::error::SubmitError;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info};

/// In-memory backend seeded with literal data. Every call waits for the
/// configured latency before answering.
pub struct MockBackend {
    latency: Duration,
    owner_id: UserId,
    otp_length: usize,
    facilities: Vec<Facility>,
    courts: Vec<Court>,
    users: Vec<User>,
    activity: ActivitySnapshot,
    issued_codes: HashMap<OtpChannel, String>,
    verified: HashSet<OtpChannel>,
    next_facility: u64,
    next_court: u64,
    next_price: u64,
    next_user: u64,
}

impl MockBackend {
    pub fn new(latency: Duration, owner_id: UserId, otp_length: usize) -> Self {
        Self::from_seed(seed(), latency, owner_id, otp_length)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.backend.latency(),
            UserId(config.backend.owner_id),
            config.otp.code_length,
        )
    }

    pub fn from_seed(seed: Seed, latency: Duration, owner_id: UserId, otp_length: usize) -> Self {
        let next_facility = seed.facilities.iter().map(|f| f.id.get()).max().unwrap_or(0) + 1;
        let next_court = seed.courts.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1;
        let next_price = seed
            .courts
            .iter()
            .flat_map(|c| c.prices.iter())
            .map(|p| p.id.get())
            .max()
            .unwrap_or(0)
            + 1;
        let next_user = seed.users.iter().map(|u| u.id.get()).max().unwrap_or(0) + 1;

        Self {
            latency,
            owner_id,
            otp_length,
            facilities: seed.facilities,
            courts: seed.courts,
            users: seed.users,
            activity: seed.activity,
            issued_codes: HashMap::new(),
            verified: HashSet::new(),
            next_facility,
            next_court,
            next_price,
            next_user,
        }
    }

    /// Code most recently sent to `channel`. The mock has no mailbox, so
    /// front-ends show this as a development hint.
    pub fn issued_code(&self, channel: &OtpChannel) -> Option<&str> {
        self.issued_codes
            .get(&channel.normalized())
            .map(String::as_str)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }

    fn email_taken(&self, email: &str) -> bool {
        self.user_by_email(email).is_some()
    }

    fn allocate_user_id(&mut self) -> UserId {
        let id = UserId(self.next_user);
        self.next_user += 1;
        id
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.otp_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

fn unknown_contact() -> SubmitError {
    SubmitError::Rejected("No account is registered with this contact".to_string())
}

impl Backend for MockBackend {
    fn register_facility(&mut self, draft: FacilityDraft) -> Result<Facility, SubmitError> {
        self.simulate_latency();
        let id = FacilityId(self.next_facility);
        self.next_facility += 1;
        let facility = draft.into_facility(id, self.owner_id);
        info!(facility_id = %facility.id, name = %facility.name, "facility registered");
        self.facilities.push(facility.clone());
        Ok(facility)
    }

    fn create_court(&mut self, draft: CourtDraft) -> Result<Court, SubmitError> {
        self.simulate_latency();
        if !self.facilities.iter().any(|f| f.id == draft.facility_id) {
            return Err(SubmitError::NotFound {
                entity: "Facility",
                id: draft.facility_id.get(),
            });
        }
        let id = CourtId(self.next_court);
        self.next_court += 1;

        let mut prices = Vec::with_capacity(draft.prices.len());
        for slot in draft.prices {
            prices.push(CourtPrice {
                id: CourtPriceId(self.next_price),
                day_type: slot.day_type,
                start_time: slot.start_time,
                end_time: slot.end_time,
                price: slot.price,
                status: PriceStatus::Active,
                court_id: id,
            });
            self.next_price += 1;
        }

        let court = Court {
            id,
            name: draft.name,
            status: draft.status,
            facility_id: draft.facility_id,
            prices,
        };
        info!(court_id = %court.id, facility_id = %court.facility_id, "court created");
        self.courts.push(court.clone());
        Ok(court)
    }

    fn create_staff(&mut self, draft: StaffDraft) -> Result<User, SubmitError> {
        self.simulate_latency();
        if self.email_taken(&draft.email) {
            return Err(SubmitError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        if !self.facilities.iter().any(|f| f.id == draft.facility_id) {
            return Err(SubmitError::NotFound {
                entity: "Facility",
                id: draft.facility_id.get(),
            });
        }
        let user = User {
            id: self.allocate_user_id(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email.trim().to_string(),
            password: draft.password,
            phone_number: draft.phone_number,
            role: Role::Staff,
            status: UserStatus::Active,
            balance: 0,
            facility_id: Some(draft.facility_id),
        };
        info!(user_id = %user.id, "staff account created");
        self.users.push(user.clone());
        Ok(user)
    }

    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, SubmitError> {
        self.simulate_latency();
        let user = self
            .user_by_email(email)
            .filter(|u| u.password == password)
            .ok_or(SubmitError::Unauthorized)?;
        if user.status == UserStatus::Inactive {
            return Err(SubmitError::Rejected(
                "This account has been deactivated".to_string(),
            ));
        }
        debug!(user_id = %user.id, "signed in");
        Ok(user.clone())
    }

    fn sign_up(&mut self, draft: SignUpDraft) -> Result<User, SubmitError> {
        self.simulate_latency();
        if self.email_taken(&draft.email) {
            return Err(SubmitError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        let user = User {
            id: self.allocate_user_id(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email.trim().to_string(),
            password: draft.password,
            phone_number: draft.phone_number,
            role: Role::Customer,
            status: UserStatus::Active,
            balance: 0,
            facility_id: None,
        };
        info!(user_id = %user.id, "customer signed up");
        self.users.push(user.clone());
        Ok(user)
    }

    fn send_otp(&mut self, channel: &OtpChannel) -> Result<(), SubmitError> {
        self.simulate_latency();
        let channel = channel.normalized();
        if !self.users.iter().any(|u| channel.matches(u)) {
            return Err(unknown_contact());
        }
        let code = self.generate_code();
        debug!(%channel, "otp issued");
        self.verified.remove(&channel);
        self.issued_codes.insert(channel, code);
        Ok(())
    }

    fn verify_otp(&mut self, channel: &OtpChannel, code: &str) -> Result<(), SubmitError> {
        self.simulate_latency();
        let channel = channel.normalized();
        match self.issued_codes.get(&channel) {
            Some(issued) if issued == code.trim() => {
                self.issued_codes.remove(&channel);
                self.verified.insert(channel);
                Ok(())
            }
            _ => Err(SubmitError::InvalidCode),
        }
    }

    fn send_reset_link(&mut self, email: &str) -> Result<(), SubmitError> {
        self.simulate_latency();
        debug!(email = %email.trim(), "reset link sent");
        Ok(())
    }

    fn reset_password(
        &mut self,
        channel: &OtpChannel,
        new_password: &str,
    ) -> Result<(), SubmitError> {
        self.simulate_latency();
        let channel = channel.normalized();
        if !self.verified.contains(&channel) {
            return Err(SubmitError::Rejected(
                "Please verify the code before choosing a new password".to_string(),
            ));
        }
        let user = self
            .users
            .iter_mut()
            .find(|u| channel.matches(u))
            .ok_or_else(unknown_contact)?;
        user.password = new_password.to_string();
        info!(user_id = %user.id, "password reset");
        self.verified.remove(&channel);
        Ok(())
    }

    fn facilities(&mut self) -> Result<Vec<Facility>, SubmitError> {
        self.simulate_latency();
        Ok(self.facilities.clone())
    }

    fn update_facility(
        &mut self,
        id: FacilityId,
        update: FacilityUpdate,
    ) -> Result<Facility, SubmitError> {
        self.simulate_latency();
        if !update.opening_time.is_before(&update.closing_time) {
            return Err(SubmitError::Rejected(
                "Opening time must be earlier than closing time".to_string(),
            ));
        }
        let facility = self
            .facilities
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(SubmitError::NotFound {
                entity: "Facility",
                id: id.get(),
            })?;
        facility.apply(update);
        info!(facility_id = %id, hours = %facility.hours(), "facility updated");
        Ok(facility.clone())
    }

    fn courts(&mut self) -> Result<Vec<Court>, SubmitError> {
        self.simulate_latency();
        Ok(self.courts.clone())
    }

    fn staff(&mut self) -> Result<Vec<User>, SubmitError> {
        self.simulate_latency();
        Ok(self
            .users
            .iter()
            .filter(|u| u.role == Role::Staff)
            .cloned()
            .collect())
    }

    fn set_court_status(
        &mut self,
        id: CourtId,
        status: CourtStatus,
    ) -> Result<Court, SubmitError> {
        self.simulate_latency();
        let court = self
            .courts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(SubmitError::NotFound {
                entity: "Court",
                id: id.get(),
            })?;
        court.status = status;
        info!(court_id = %id, status = %status, "court status changed");
        Ok(court.clone())
    }

    fn delete_court(&mut self, id: CourtId) -> Result<(), SubmitError> {
        self.simulate_latency();
        let before = self.courts.len();
        self.courts.retain(|c| c.id != id);
        if self.courts.len() == before {
            return Err(SubmitError::NotFound {
                entity: "Court",
                id: id.get(),
            });
        }
        info!(court_id = %id, "court deleted");
        Ok(())
    }

    fn set_staff_status(&mut self, id: UserId, status: UserStatus) -> Result<User, SubmitError> {
        self.simulate_latency();
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id && u.role == Role::Staff)
            .ok_or(SubmitError::NotFound {
                entity: "Staff member",
                id: id.get(),
            })?;
        user.status = status;
        info!(user_id = %id, status = %status, "staff status changed");
        Ok(user.clone())
    }

    fn delete_staff(&mut self, id: UserId) -> Result<(), SubmitError> {
        self.simulate_latency();
        let before = self.users.len();
        self.users.retain(|u| !(u.id == id && u.role == Role::Staff));
        if self.users.len() == before {
            return Err(SubmitError::NotFound {
                entity: "Staff member",
                id: id.get(),
            });
        }
        info!(user_id = %id, "staff member removed");
        Ok(())
    }

    fn activity(&mut self) -> Result<ActivitySnapshot, SubmitError> {
        self.simulate_latency();
        Ok(self.activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::court::{DayType, PriceSlotDraft};
    use crate::domain::facility::FacilityStatus;
    use crate::domain::time::TimeOfDay;

    fn backend() -> MockBackend {
        MockBackend::new(Duration::ZERO, UserId(1), 6)
    }

    fn hm(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).expect("time")
    }

    #[test]
    fn registered_facility_is_pending_with_fresh_id() {
        let mut backend = backend();
        let facility = backend
            .register_facility(FacilityDraft {
                name: "New Hall".into(),
                description: "Four courts".into(),
                contact_phone: "+84905555555".into(),
                contact_email: "hall@courtsync.vn".into(),
                opening_time: hm(6, 0),
                closing_time: hm(22, 0),
                address: "1 Le Loi".into(),
                ward: "Ben Thanh".into(),
                district: "District 1".into(),
                city: "Ho Chi Minh City".into(),
                latitude: None,
                longitude: None,
            })
            .expect("register");

        assert_eq!(facility.id, FacilityId(3));
        assert_eq!(facility.status, FacilityStatus::Pending);
        assert_eq!(facility.owner_id, UserId(1));
        assert_eq!(backend.facilities().expect("list").len(), 3);
    }

    #[test]
    fn facility_update_keeps_identity() {
        let mut backend = backend();
        let updated = backend
            .update_facility(
                FacilityId(2),
                FacilityUpdate {
                    description: "Renovated community courts".into(),
                    opening_time: hm(5, 30),
                    closing_time: hm(21, 0),
                },
            )
            .expect("update");
        assert_eq!(updated.name, "Shuttle Hub Thao Dien");
        assert_eq!(updated.status, FacilityStatus::Inactive);
        assert_eq!(updated.hours(), "05:30-21:00");
        let stored = backend.facilities().expect("list");
        assert_eq!(stored[1].description, "Renovated community courts");

        let inverted = FacilityUpdate {
            description: "x".into(),
            opening_time: hm(21, 0),
            closing_time: hm(5, 30),
        };
        assert!(matches!(
            backend.update_facility(FacilityId(2), inverted.clone()),
            Err(SubmitError::Rejected(_))
        ));
        assert!(matches!(
            backend.update_facility(FacilityId(9), FacilityUpdate {
                opening_time: hm(6, 0),
                ..inverted
            }),
            Err(SubmitError::NotFound { .. })
        ));
    }

    #[test]
    fn court_prices_get_ids_and_court_link() {
        let mut backend = backend();
        let court = backend
            .create_court(CourtDraft {
                facility_id: FacilityId(1),
                name: "Court C1".into(),
                status: CourtStatus::Active,
                prices: vec![
                    PriceSlotDraft {
                        day_type: DayType::Weekday,
                        start_time: hm(6, 0),
                        end_time: hm(12, 0),
                        price: 50_000,
                    },
                    PriceSlotDraft {
                        day_type: DayType::Weekend,
                        start_time: hm(12, 0),
                        end_time: hm(18, 0),
                        price: 80_000,
                    },
                ],
            })
            .expect("create");

        assert_eq!(court.id, CourtId(5));
        assert_eq!(court.prices[0].id, CourtPriceId(6));
        assert_eq!(court.prices[1].id, CourtPriceId(7));
        assert!(court.prices.iter().all(|p| p.court_id == court.id));
    }

    #[test]
    fn court_for_unknown_facility_is_rejected() {
        let mut backend = backend();
        let err = backend
            .create_court(CourtDraft {
                facility_id: FacilityId(99),
                name: "Ghost".into(),
                status: CourtStatus::Active,
                prices: Vec::new(),
            })
            .expect_err("unknown facility");
        assert_eq!(err.to_string(), "Facility #99 was not found");
    }

    #[test]
    fn duplicate_staff_email_conflicts() {
        let mut backend = backend();
        let err = backend
            .create_staff(StaffDraft {
                first_name: "Dup".into(),
                last_name: "Licate".into(),
                email: "LINH.TRAN@courtsync.vn".into(),
                phone_number: "+84906666666".into(),
                password: "password1".into(),
                facility_id: FacilityId(1),
            })
            .expect_err("duplicate");
        assert!(matches!(err, SubmitError::Conflict(_)));
    }

    #[test]
    fn sign_in_checks_password_and_status() {
        let mut backend = backend();
        assert!(backend.sign_in("owner@courtsync.vn", "owner1234").is_ok());
        assert_eq!(
            backend.sign_in("owner@courtsync.vn", "wrong"),
            Err(SubmitError::Unauthorized)
        );
        assert!(matches!(
            backend.sign_in("hoang.le@courtsync.vn", "staff5678"),
            Err(SubmitError::Rejected(_))
        ));
    }

    #[test]
    fn otp_round_trip_allows_password_reset() {
        let mut backend = backend();
        let channel = OtpChannel::Phone("+84 902 222 222".into());

        assert!(backend.reset_password(&channel, "newpass123").is_err());

        backend.send_otp(&channel).expect("send");
        let code = backend.issued_code(&channel).expect("code").to_string();
        assert_eq!(code.len(), 6);
        assert_eq!(backend.verify_otp(&channel, "xxxxxx"), Err(SubmitError::InvalidCode));
        backend.verify_otp(&channel, &code).expect("verify");
        backend.reset_password(&channel, "newpass123").expect("reset");

        assert!(backend.sign_in("linh.tran@courtsync.vn", "newpass123").is_ok());
    }

    #[test]
    fn no_code_for_unknown_contact() {
        let mut backend = backend();
        let channel = OtpChannel::Email("nobody@courtsync.vn".into());
        assert_eq!(
            backend.send_otp(&channel),
            Err(SubmitError::Rejected(
                "No account is registered with this contact".into()
            ))
        );
        assert_eq!(backend.issued_code(&channel), None);
    }

    #[test]
    fn staff_status_and_delete() {
        let mut backend = backend();
        let user = backend
            .set_staff_status(UserId(2), UserStatus::Inactive)
            .expect("toggle");
        assert_eq!(user.status, UserStatus::Inactive);
        assert!(backend.set_staff_status(UserId(1), UserStatus::Inactive).is_err());

        backend.delete_staff(UserId(3)).expect("delete");
        assert_eq!(backend.staff().expect("staff").len(), 1);
        assert!(backend.delete_staff(UserId(3)).is_err());
    }

    #[test]
    fn court_status_and_delete() {
        let mut backend = backend();
        let court = backend
            .set_court_status(CourtId(1), CourtStatus::Maintenance)
            .expect("status");
        assert_eq!(court.status, CourtStatus::Maintenance);
        backend.delete_court(CourtId(4)).expect("delete");
        assert_eq!(backend.courts().expect("courts").len(), 3);
        assert!(backend.delete_court(CourtId(4)).is_err());
    }
}
