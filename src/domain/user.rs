use crate::domain::code_enum;
use crate::domain::ids::{FacilityId, UserId};
use serde::{Deserialize, Serialize};

code_enum! {
    Role, "role" {
        Owner => ("O", "Owner"),
        Staff => ("S", "Staff"),
        Customer => ("C", "Customer"),
    }
}

code_enum! {
    UserStatus, "user status" {
        Active => ("A", "Active"),
        Inactive => ("I", "Inactive"),
    }
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// The mock keeps passwords in plain text; a real backend must not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "UserID")]
    pub id: UserId,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password", skip_serializing, default)]
    pub password: String,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
    #[serde(rename = "Role")]
    pub role: Role,
    #[serde(rename = "UserStatus")]
    pub status: UserStatus,
    #[serde(rename = "Balance")]
    pub balance: i64,
    /// Facility a staff member is assigned to.
    #[serde(rename = "FacilityID", default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<FacilityId>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub facility_id: FacilityId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_never_serialized() {
        let user = User {
            id: UserId(3),
            first_name: "Linh".into(),
            last_name: "Tran".into(),
            email: "linh@courtsync.vn".into(),
            password: "secret123".into(),
            phone_number: "+84900000003".into(),
            role: Role::Staff,
            status: UserStatus::Active,
            balance: 0,
            facility_id: Some(FacilityId(1)),
        };
        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("Password").is_none());
        assert_eq!(json["Role"], "S");
        assert_eq!(user.full_name(), "Linh Tran");
    }

    #[test]
    fn status_toggles() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Inactive);
        assert_eq!(UserStatus::Inactive.toggled(), UserStatus::Active);
    }
}
