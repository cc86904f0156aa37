use crate::domain::code_enum;
use crate::domain::ids::{FacilityId, UserId};
use crate::domain::time::TimeOfDay;
use serde::{Deserialize, Serialize};

code_enum! {
    FacilityStatus, "facility status" {
        Active => ("A", "Active"),
        Inactive => ("I", "Inactive"),
        Pending => ("P", "Pending"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(rename = "FacilityID")]
    pub id: FacilityId,
    #[serde(rename = "FacilityName")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "ContactPhone")]
    pub contact_phone: String,
    #[serde(rename = "ContactEmail")]
    pub contact_email: String,
    #[serde(rename = "OpeningTime")]
    pub opening_time: TimeOfDay,
    #[serde(rename = "ClosingTime")]
    pub closing_time: TimeOfDay,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Ward")]
    pub ward: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    // The backend contract spells this field "Longtitude".
    #[serde(rename = "Longtitude", alias = "Longitude", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "FacilityStatus")]
    pub status: FacilityStatus,
    #[serde(rename = "OwnerID")]
    pub owner_id: UserId,
    #[serde(rename = "StaffID", default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<UserId>,
}

impl Facility {
    pub fn full_address(&self) -> String {
        [&self.address, &self.ward, &self.district, &self.city]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Everything a facility needs before the backend assigns its id, status and
/// owner.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityDraft {
    pub name: String,
    pub description: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub opening_time: TimeOfDay,
    pub closing_time: TimeOfDay,
    pub address: String,
    pub ward: String,
    pub district: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl FacilityDraft {
    pub fn into_facility(self, id: FacilityId, owner_id: UserId) -> Facility {
        Facility {
            id,
            name: self.name,
            description: self.description,
            contact_phone: self.contact_phone,
            contact_email: self.contact_email,
            opening_time: self.opening_time,
            closing_time: self.closing_time,
            address: self.address,
            ward: self.ward,
            district: self.district,
            city: self.city,
            latitude: self.latitude,
            longitude: self.longitude,
            status: FacilityStatus::Pending,
            owner_id,
            staff_id: None,
        }
    }
}

/// The general details an owner can change after registration.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityUpdate {
    pub description: String,
    pub opening_time: TimeOfDay,
    pub closing_time: TimeOfDay,
}

impl Facility {
    pub fn apply(&mut self, update: FacilityUpdate) {
        self.description = update.description;
        self.opening_time = update.opening_time;
        self.closing_time = update.closing_time;
    }

    /// `06:00-23:00`.
    pub fn hours(&self) -> String {
        format!("{}-{}", self.opening_time, self.closing_time)
    }
}
