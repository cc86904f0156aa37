//! Filtering and aggregation behind the facility, court and staff lists and
//! the owner dashboard.

use crate::backend::ActivitySnapshot;
use crate::domain::court::{Court, CourtStatus};
use crate::domain::facility::{Facility, FacilityStatus};
use crate::domain::ids::FacilityId;
use crate::domain::user::User;
use serde::Serialize;

/// Matches the facility name or its address, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityFilter {
    pub search: String,
    pub status: Option<FacilityStatus>,
}

impl FacilityFilter {
    pub fn matches(&self, facility: &Facility) -> bool {
        let needle = self.search.trim().to_lowercase();
        (needle.is_empty()
            || facility.name.to_lowercase().contains(&needle)
            || facility.full_address().to_lowercase().contains(&needle))
            && self.status.is_none_or(|status| facility.status == status)
    }

    pub fn apply<'a>(&self, facilities: &'a [Facility]) -> Vec<&'a Facility> {
        facilities.iter().filter(|f| self.matches(f)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourtFilter {
    pub search: String,
    pub facility: Option<FacilityId>,
    pub status: Option<CourtStatus>,
}

impl CourtFilter {
    pub fn matches(&self, court: &Court) -> bool {
        let needle = self.search.trim().to_lowercase();
        (needle.is_empty() || court.name.to_lowercase().contains(&needle))
            && self.facility.is_none_or(|id| court.facility_id == id)
            && self.status.is_none_or(|status| court.status == status)
    }

    pub fn apply<'a>(&self, courts: &'a [Court]) -> Vec<&'a Court> {
        courts.iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CourtStatusCounts {
    pub active: usize,
    pub inactive: usize,
    pub maintenance: usize,
}

impl CourtStatusCounts {
    pub fn count<'a>(courts: impl IntoIterator<Item = &'a Court>) -> Self {
        courts
            .into_iter()
            .fold(Self::default(), |mut counts, court| {
                match court.status {
                    CourtStatus::Active => counts.active += 1,
                    CourtStatus::Inactive => counts.inactive += 1,
                    CourtStatus::Maintenance => counts.maintenance += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.active + self.inactive + self.maintenance
    }
}

/// Matches "First Last" or the email, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffFilter {
    pub search: String,
}

impl StaffFilter {
    pub fn matches(&self, user: &User) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || user.full_name().to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle)
    }

    pub fn apply<'a>(&self, staff: &'a [User]) -> Vec<&'a User> {
        staff.iter().filter(|u| self.matches(u)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_facilities: usize,
    pub total_courts: usize,
    pub total_staff: usize,
    pub active_courts: usize,
    pub inactive_courts: usize,
    pub monthly_revenue: u64,
    pub total_bookings: u64,
}

impl DashboardStats {
    /// Courts under maintenance count towards the total only.
    pub fn collect(
        facilities: &[Facility],
        courts: &[Court],
        staff: &[User],
        activity: ActivitySnapshot,
    ) -> Self {
        let counts = CourtStatusCounts::count(courts);
        Self {
            total_facilities: facilities.len(),
            total_courts: courts.len(),
            total_staff: staff.len(),
            active_courts: counts.active,
            inactive_courts: counts.inactive,
            monthly_revenue: activity.monthly_revenue,
            total_bookings: activity.total_bookings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::seed::seed;

    #[test]
    fn facility_filter_searches_name_and_address() {
        let data = seed();
        let by_address = FacilityFilter {
            search: "thu duc".into(),
            status: None,
        };
        let hits = by_address.apply(&data.facilities);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, FacilityId(2));

        let active = FacilityFilter {
            search: "courtsync".into(),
            status: Some(FacilityStatus::Active),
        };
        assert_eq!(active.apply(&data.facilities).len(), 1);
        let pending = FacilityFilter {
            status: Some(FacilityStatus::Pending),
            ..FacilityFilter::default()
        };
        assert!(pending.apply(&data.facilities).is_empty());
    }

    #[test]
    fn court_filter_combines_criteria() {
        let data = seed();
        let all = CourtFilter::default().apply(&data.courts);
        assert_eq!(all.len(), data.courts.len());

        let by_name = CourtFilter {
            search: "  a".into(),
            ..CourtFilter::default()
        };
        let names: Vec<&str> = by_name
            .apply(&data.courts)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert!(names.iter().all(|n| n.to_lowercase().contains('a')));

        let narrowed = CourtFilter {
            search: String::new(),
            facility: Some(FacilityId(1)),
            status: Some(CourtStatus::Maintenance),
        };
        let hits = narrowed.apply(&data.courts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Court B1");
    }

    #[test]
    fn status_counts_cover_every_court() {
        let data = seed();
        let counts = CourtStatusCounts::count(&data.courts);
        assert_eq!(counts.total(), data.courts.len());
        assert_eq!(counts.maintenance, 1);
        assert_eq!(counts.inactive, 1);
    }

    #[test]
    fn staff_filter_matches_name_or_email() {
        let data = seed();
        let staff: Vec<User> = data
            .users
            .into_iter()
            .filter(|u| u.role == crate::domain::user::Role::Staff)
            .collect();
        let by_name = StaffFilter {
            search: "LINH TR".into(),
        };
        assert_eq!(by_name.apply(&staff).len(), 1);
        let by_email = StaffFilter {
            search: "hoang.le@".into(),
        };
        assert_eq!(by_email.apply(&staff)[0].first_name, "Hoang");
        assert!(StaffFilter { search: "zz".into() }.apply(&staff).is_empty());
    }

    #[test]
    fn dashboard_totals() {
        let data = seed();
        let staff: Vec<User> = data
            .users
            .iter()
            .filter(|u| u.role == crate::domain::user::Role::Staff)
            .cloned()
            .collect();
        let stats = DashboardStats::collect(&data.facilities, &data.courts, &staff, data.activity);
        assert_eq!(stats.total_facilities, 2);
        assert_eq!(stats.total_courts, 4);
        assert_eq!(stats.total_staff, 2);
        assert_eq!(stats.active_courts, 2);
        assert_eq!(stats.inactive_courts, 1);
        assert_eq!(stats.monthly_revenue, 15_420_000);
        assert_eq!(stats.total_bookings, 342);
    }
}
