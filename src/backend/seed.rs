use crate::backend::ActivitySnapshot;
use crate::domain::court::{Court, CourtPrice, CourtStatus, DayType, PriceStatus};
use crate::domain::facility::{Facility, FacilityStatus};
use crate::domain::ids::{CourtId, CourtPriceId, FacilityId, UserId};
use crate::domain::time::TimeOfDay;
use crate::domain::user::{Role, User, UserStatus};

pub struct Seed {
    pub facilities: Vec<Facility>,
    pub courts: Vec<Court>,
    pub users: Vec<User>,
    pub activity: ActivitySnapshot,
}

fn hm(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap_or_default()
}

pub fn seed() -> Seed {
    Seed {
        facilities: facilities(),
        courts: courts(),
        users: users(),
        activity: ActivitySnapshot {
            monthly_revenue: 15_420_000,
            total_bookings: 342,
        },
    }
}

fn facilities() -> Vec<Facility> {
    vec![
        Facility {
            id: FacilityId(1),
            name: "CourtSync Arena".into(),
            description: "Premium indoor badminton facility with eight professional courts".into(),
            contact_phone: "+84901234567".into(),
            contact_email: "arena@courtsync.vn".into(),
            opening_time: hm(6, 0),
            closing_time: hm(23, 0),
            address: "123 Nguyen Hue Street".into(),
            ward: "Ben Nghe".into(),
            district: "District 1".into(),
            city: "Ho Chi Minh City".into(),
            latitude: Some(10.7769),
            longitude: Some(106.7009),
            status: FacilityStatus::Active,
            owner_id: UserId(1),
            staff_id: Some(UserId(2)),
        },
        Facility {
            id: FacilityId(2),
            name: "Shuttle Hub Thao Dien".into(),
            description: "Community courts with evening leagues".into(),
            contact_phone: "+84907654321".into(),
            contact_email: "thaodien@courtsync.vn".into(),
            opening_time: hm(7, 0),
            closing_time: hm(22, 0),
            address: "45 Xuan Thuy".into(),
            ward: "Thao Dien".into(),
            district: "Thu Duc".into(),
            city: "Ho Chi Minh City".into(),
            latitude: None,
            longitude: None,
            status: FacilityStatus::Inactive,
            owner_id: UserId(1),
            staff_id: None,
        },
    ]
}

fn price(id: u64, court: u64, day_type: DayType, from: u32, to: u32, amount: u64) -> CourtPrice {
    CourtPrice {
        id: CourtPriceId(id),
        day_type,
        start_time: hm(from, 0),
        end_time: hm(to, 0),
        price: amount,
        status: PriceStatus::Active,
        court_id: CourtId(court),
    }
}

fn courts() -> Vec<Court> {
    vec![
        Court {
            id: CourtId(1),
            name: "Court A1".into(),
            status: CourtStatus::Active,
            facility_id: FacilityId(1),
            prices: vec![
                price(1, 1, DayType::Weekday, 6, 12, 50_000),
                price(2, 1, DayType::Weekday, 12, 18, 80_000),
                price(3, 1, DayType::Weekend, 6, 22, 100_000),
            ],
        },
        Court {
            id: CourtId(2),
            name: "Court A2".into(),
            status: CourtStatus::Active,
            facility_id: FacilityId(1),
            prices: vec![price(4, 2, DayType::Weekday, 6, 12, 50_000)],
        },
        Court {
            id: CourtId(3),
            name: "Court B1".into(),
            status: CourtStatus::Maintenance,
            facility_id: FacilityId(1),
            prices: vec![price(5, 3, DayType::Weekday, 18, 22, 90_000)],
        },
        Court {
            id: CourtId(4),
            name: "Riverside 1".into(),
            status: CourtStatus::Inactive,
            facility_id: FacilityId(2),
            prices: Vec::new(),
        },
    ]
}

fn users() -> Vec<User> {
    vec![
        User {
            id: UserId(1),
            first_name: "Minh".into(),
            last_name: "Nguyen".into(),
            email: "owner@courtsync.vn".into(),
            password: "owner1234".into(),
            phone_number: "+84901111111".into(),
            role: Role::Owner,
            status: UserStatus::Active,
            balance: 0,
            facility_id: None,
        },
        User {
            id: UserId(2),
            first_name: "Linh".into(),
            last_name: "Tran".into(),
            email: "linh.tran@courtsync.vn".into(),
            password: "staff1234".into(),
            phone_number: "+84902222222".into(),
            role: Role::Staff,
            status: UserStatus::Active,
            balance: 0,
            facility_id: Some(FacilityId(1)),
        },
        User {
            id: UserId(3),
            first_name: "Hoang".into(),
            last_name: "Le".into(),
            email: "hoang.le@courtsync.vn".into(),
            password: "staff5678".into(),
            phone_number: "+84903333333".into(),
            role: Role::Staff,
            status: UserStatus::Inactive,
            balance: 0,
            facility_id: Some(FacilityId(1)),
        },
        User {
            id: UserId(4),
            first_name: "An".into(),
            last_name: "Pham".into(),
            email: "an.pham@gmail.com".into(),
            password: "player1234".into(),
            phone_number: "+84904444444".into(),
            role: Role::Customer,
            status: UserStatus::Active,
            balance: 250_000,
            facility_id: None,
        },
    ]
}
