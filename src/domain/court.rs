use crate::domain::code_enum;
use crate::domain::ids::{CourtId, CourtPriceId, FacilityId};
use crate::domain::time::TimeOfDay;
use serde::{Deserialize, Serialize};

code_enum! {
    CourtStatus, "court status" {
        Active => ("A", "Active"),
        Inactive => ("I", "Inactive"),
        Maintenance => ("M", "Maintenance"),
    }
}

code_enum! {
    DayType, "day type" {
        Weekday => ("W", "Weekday"),
        Weekend => ("E", "Weekend"),
    }
}

code_enum! {
    PriceStatus, "price status" {
        Active => ("A", "Active"),
        Inactive => ("I", "Inactive"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtPrice {
    #[serde(rename = "CourtPriceID")]
    pub id: CourtPriceId,
    #[serde(rename = "DayType")]
    pub day_type: DayType,
    #[serde(rename = "StartTime")]
    pub start_time: TimeOfDay,
    #[serde(rename = "EndTime")]
    pub end_time: TimeOfDay,
    /// Whole currency units.
    #[serde(rename = "Price")]
    pub price: u64,
    #[serde(rename = "CourtPriceStatus")]
    pub status: PriceStatus,
    #[serde(rename = "CourtID")]
    pub court_id: CourtId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    #[serde(rename = "CourtID")]
    pub id: CourtId,
    #[serde(rename = "CourtName")]
    pub name: String,
    #[serde(rename = "CourtStatus")]
    pub status: CourtStatus,
    #[serde(rename = "FacilityID")]
    pub facility_id: FacilityId,
    #[serde(rename = "CourtPrices", default)]
    pub prices: Vec<CourtPrice>,
}

impl Court {
    /// Cheapest active slot for a day type, if any.
    pub fn lowest_price(&self, day_type: DayType) -> Option<u64> {
        self.prices
            .iter()
            .filter(|p| p.day_type == day_type && p.status == PriceStatus::Active)
            .map(|p| p.price)
            .min()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSlotDraft {
    pub day_type: DayType,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtDraft {
    pub facility_id: FacilityId,
    pub name: String,
    pub status: CourtStatus,
    pub prices: Vec<PriceSlotDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: u64, day_type: DayType, price: u64, status: PriceStatus) -> CourtPrice {
        CourtPrice {
            id: CourtPriceId(id),
            day_type,
            start_time: TimeOfDay::from_hm(6, 0).expect("time"),
            end_time: TimeOfDay::from_hm(12, 0).expect("time"),
            price,
            status,
            court_id: CourtId(1),
        }
    }

    #[test]
    fn lowest_price_ignores_inactive_slots() {
        let court = Court {
            id: CourtId(1),
            name: "Court 1".into(),
            status: CourtStatus::Active,
            facility_id: FacilityId(1),
            prices: vec![
                slot(1, DayType::Weekday, 80_000, PriceStatus::Active),
                slot(2, DayType::Weekday, 30_000, PriceStatus::Inactive),
                slot(3, DayType::Weekday, 50_000, PriceStatus::Active),
                slot(4, DayType::Weekend, 20_000, PriceStatus::Active),
            ],
        };
        assert_eq!(court.lowest_price(DayType::Weekday), Some(50_000));
        assert_eq!(court.lowest_price(DayType::Weekend), Some(20_000));
    }

    #[test]
    fn maintenance_code_is_m() {
        assert_eq!(CourtStatus::Maintenance.code(), "M");
        assert_eq!("m".parse::<CourtStatus>(), Ok(CourtStatus::Maintenance));
        let json = serde_json::to_string(&CourtStatus::Maintenance).expect("serialize");
        assert_eq!(json, "\"M\"");
    }
}
