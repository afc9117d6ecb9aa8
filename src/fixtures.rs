//! Seed records for a fresh store. Ids are fixed so that links between
//! requests, transactions and feedback stay stable across restarts; timestamps
//! are relative to the seeding time.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::feedback::{Feedback, FeedbackKind, FeedbackStatus};
use crate::models::request::{DonationRequest, RequestItem, RequestStatus};
use crate::models::shopkeeper::{Availability, Shopkeeper};
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::models::user::{AccountStatus, User, UserRole};
use crate::store::Store;

const USER_BASE: u128 = 0x1000;
const SHOPKEEPER_BASE: u128 = 0x1100;
const REQUEST_BASE: u128 = 0x2000;
const ITEM_BASE: u128 = 0x2100;
const TRANSACTION_BASE: u128 = 0x3000;
const FEEDBACK_BASE: u128 = 0x4000;

pub fn user_id(n: u128) -> Uuid {
    Uuid::from_u128(USER_BASE + n)
}

pub fn shopkeeper_id(n: u128) -> Uuid {
    Uuid::from_u128(SHOPKEEPER_BASE + n)
}

pub fn request_id(n: u128) -> Uuid {
    Uuid::from_u128(REQUEST_BASE + n)
}

struct ShopkeeperSeed {
    name: &'static str,
    area: &'static str,
    status: AccountStatus,
    availability: Availability,
    total_assignments: u32,
    last_assigned_days_ago: Option<i64>,
    rating: f64,
    completion_rate: u8,
    average_fulfillment_days: u8,
    active_requests: u32,
    completed_requests: u32,
    total_earnings: u64,
}

#[rustfmt::skip]
const SHOPKEEPERS: &[ShopkeeperSeed] = &[
    ShopkeeperSeed { name: "Rajesh Kumar", area: "South Mumbai", status: AccountStatus::Active, availability: Availability::Available, total_assignments: 6, last_assigned_days_ago: Some(2), rating: 4.8, completion_rate: 96, average_fulfillment_days: 2, active_requests: 3, completed_requests: 156, total_earnings: 45_000 },
    ShopkeeperSeed { name: "Priya Sharma", area: "Andheri", status: AccountStatus::Active, availability: Availability::Busy, total_assignments: 4, last_assigned_days_ago: Some(5), rating: 4.5, completion_rate: 91, average_fulfillment_days: 3, active_requests: 2, completed_requests: 98, total_earnings: 32_000 },
    ShopkeeperSeed { name: "Amit Patel", area: "Bandra", status: AccountStatus::Active, availability: Availability::Available, total_assignments: 3, last_assigned_days_ago: Some(9), rating: 4.9, completion_rate: 98, average_fulfillment_days: 1, active_requests: 0, completed_requests: 234, total_earnings: 67_000 },
    ShopkeeperSeed { name: "Sneha Reddy", area: "Thane", status: AccountStatus::Active, availability: Availability::Offline, total_assignments: 2, last_assigned_days_ago: Some(20), rating: 4.7, completion_rate: 88, average_fulfillment_days: 2, active_requests: 1, completed_requests: 145, total_earnings: 41_000 },
    ShopkeeperSeed { name: "Vikram Singh", area: "Borivali", status: AccountStatus::Active, availability: Availability::Available, total_assignments: 3, last_assigned_days_ago: Some(14), rating: 4.6, completion_rate: 93, average_fulfillment_days: 2, active_requests: 0, completed_requests: 178, total_earnings: 52_000 },
    ShopkeeperSeed { name: "Meera Desai", area: "Malad", status: AccountStatus::Blocked, availability: Availability::Busy, total_assignments: 1, last_assigned_days_ago: Some(30), rating: 4.3, completion_rate: 79, average_fulfillment_days: 4, active_requests: 4, completed_requests: 89, total_earnings: 28_000 },
    ShopkeeperSeed { name: "Rahul Mehta", area: "Powai", status: AccountStatus::Active, availability: Availability::Busy, total_assignments: 7, last_assigned_days_ago: Some(1), rating: 4.9, completion_rate: 97, average_fulfillment_days: 1, active_requests: 2, completed_requests: 267, total_earnings: 73_000 },
    ShopkeeperSeed { name: "Anita Joshi", area: "Chembur", status: AccountStatus::Pending, availability: Availability::Available, total_assignments: 0, last_assigned_days_ago: None, rating: 4.4, completion_rate: 85, average_fulfillment_days: 3, active_requests: 0, completed_requests: 112, total_earnings: 35_000 },
];

const INSTITUTES: &[&str] = &["St. Mary School", "Hope Foundation", "Children First NGO"];

const DONORS: &[(&str, AccountStatus)] = &[
    ("John Doe", AccountStatus::Active),
    ("Jane Smith", AccountStatus::Active),
    ("Alice Johnson", AccountStatus::Pending),
    ("Bob Wilson", AccountStatus::Blocked),
    ("Emma Davis", AccountStatus::Active),
];

pub fn seed(store: &Store, now: DateTime<Utc>) {
    store.insert_user(User {
        id: user_id(0),
        name: "Platform Admin".to_string(),
        email: "admin@donation.example".to_string(),
        role: UserRole::Admin,
        status: AccountStatus::Active,
        phone: None,
        address: None,
        created_at: now - Duration::days(400),
        last_login: Some(now - Duration::hours(1)),
    });

    for (n, name) in INSTITUTES.iter().enumerate() {
        let n = n as u128;
        store.insert_user(User {
            id: user_id(10 + n),
            name: name.to_string(),
            email: format!("contact@{}.example", slug(name)),
            role: UserRole::Institute,
            status: AccountStatus::Active,
            phone: Some(format!("+91 22 4000 10{n:02}")),
            address: Some(format!("{} Road, Mumbai", 10 + n)),
            created_at: now - Duration::days(300 - n as i64 * 10),
            last_login: Some(now - Duration::days(n as i64 + 1)),
        });
    }

    for (n, (name, status)) in DONORS.iter().enumerate() {
        let n = n as u128;
        store.insert_user(User {
            id: user_id(20 + n),
            name: name.to_string(),
            email: format!("{}@mail.example", slug(name)),
            role: UserRole::Donor,
            status: *status,
            phone: Some(format!("+91 98 2000 20{n:02}")),
            address: None,
            created_at: now - Duration::days(200 - n as i64 * 10),
            last_login: (*status == AccountStatus::Active).then(|| now - Duration::days(n as i64)),
        });
    }

    for (n, entry) in SHOPKEEPERS.iter().enumerate() {
        let id = shopkeeper_id(n as u128);
        let email = format!("{}@shops.example", slug(entry.name));

        store.insert_user(User {
            id,
            name: entry.name.to_string(),
            email: email.clone(),
            role: UserRole::Shopkeeper,
            status: entry.status,
            phone: Some(format!("+91 99 3000 30{n:02}")),
            address: Some(format!("Shop {}, {}", n + 1, entry.area)),
            created_at: now - Duration::days(250 - n as i64 * 10),
            last_login: Some(now - Duration::hours(n as i64 * 5 + 2)),
        });

        store.insert_shopkeeper(Shopkeeper {
            id,
            name: entry.name.to_string(),
            email,
            area: entry.area.to_string(),
            status: entry.status,
            availability: entry.availability,
            total_assignments: entry.total_assignments,
            last_assigned: entry.last_assigned_days_ago.map(|days| now - Duration::days(days)),
            rating: entry.rating,
            completion_rate: entry.completion_rate,
            average_fulfillment_days: entry.average_fulfillment_days,
            active_requests: entry.active_requests,
            completed_requests: entry.completed_requests,
            total_earnings: entry.total_earnings,
        });
    }

    seed_requests(store, now);
    seed_transactions(store, now);
    seed_feedback(store, now);
}

fn seed_requests(store: &Store, now: DateTime<Utc>) {
    #[rustfmt::skip]
    let requests: [(usize, &[(&str, u32, &str, u64)], RequestStatus, Option<&str>, Option<u128>, i64); 5] = [
        (0, &[("Notebooks", 100, "pcs", 500), ("Pencils", 200, "pcs", 200)], RequestStatus::Pending, None, None, 1),
        (1, &[("Art Supplies", 40, "kits", 1500)], RequestStatus::Pending, None, None, 2),
        (2, &[("School Uniforms", 30, "sets", 3000)], RequestStatus::Approved, None, Some(0), 4),
        (0, &[("Rice", 50, "kg", 2500), ("Lentils", 20, "kg", 1800)], RequestStatus::Pending, Some("Quantity unusually high for institute size"), None, 3),
        (1, &[("Blankets", 60, "pcs", 4200)], RequestStatus::Fulfilled, None, Some(2), 12),
    ];

    for (n, (institute, items, status, flag_reason, shop, days_ago)) in requests.into_iter().enumerate() {
        let n = n as u128;
        let created_at = now - Duration::days(days_ago);
        store.insert_request(DonationRequest {
            id: request_id(n),
            institute_id: user_id(10 + institute as u128),
            institute_name: INSTITUTES[institute].to_string(),
            items: items
                .iter()
                .enumerate()
                .map(|(i, (name, quantity, unit, cost))| RequestItem {
                    id: Uuid::from_u128(ITEM_BASE + n * 16 + i as u128),
                    name: name.to_string(),
                    quantity: *quantity,
                    unit: unit.to_string(),
                    estimated_cost: *cost,
                })
                .collect(),
            status,
            flagged: flag_reason.is_some(),
            flag_reason: flag_reason.map(str::to_string),
            assigned_shop_id: shop.map(shopkeeper_id),
            created_at,
            updated_at: created_at,
        });
    }
}

fn seed_transactions(store: &Store, now: DateTime<Utc>) {
    #[rustfmt::skip]
    let transactions: [(usize, usize, usize, u64, TransactionStatus, i64); 8] = [
        (0, 0, 0, 1000, TransactionStatus::Completed, 0),
        (1, 1, 1, 500, TransactionStatus::Pending, 1),
        (2, 2, 2, 2500, TransactionStatus::Completed, 2),
        (3, 3, 0, 750, TransactionStatus::Failed, 3),
        (4, 4, 1, 3000, TransactionStatus::Completed, 5),
        (0, 6, 2, 1500, TransactionStatus::Pending, 8),
        (1, 0, 0, 1000, TransactionStatus::Completed, 20),
        (4, 2, 1, 5000, TransactionStatus::Completed, 40),
    ];

    for (n, (donor, shop, institute, amount, status, days_ago)) in transactions.into_iter().enumerate() {
        let created_at = now - Duration::days(days_ago);
        store.insert_transaction(Transaction {
            id: Uuid::from_u128(TRANSACTION_BASE + n as u128),
            request_id: request_id((n % 5) as u128),
            donor_id: user_id(20 + donor as u128),
            donor_name: DONORS[donor].0.to_string(),
            shopkeeper_id: shopkeeper_id(shop as u128),
            shopkeeper_name: SHOPKEEPERS[shop].name.to_string(),
            institute_id: user_id(10 + institute as u128),
            institute_name: INSTITUTES[institute].to_string(),
            amount,
            status,
            created_at,
            completed_at: (status == TransactionStatus::Completed).then(|| created_at + Duration::hours(6)),
        });
    }
}

fn seed_feedback(store: &Store, now: DateTime<Utc>) {
    #[rustfmt::skip]
    let feedback: [(usize, usize, u8, &str, FeedbackKind, FeedbackStatus); 8] = [
        (0, 0, 4, "Great service, very helpful volunteers!", FeedbackKind::Service, FeedbackStatus::New),
        (1, 1, 3, "App could be more user-friendly", FeedbackKind::App, FeedbackStatus::Reviewed),
        (2, 2, 5, "Excellent platform for donations", FeedbackKind::General, FeedbackStatus::Resolved),
        (0, 3, 2, "Had some issues with the payment system", FeedbackKind::App, FeedbackStatus::New),
        (1, 4, 5, "The volunteers were amazing and very supportive", FeedbackKind::Service, FeedbackStatus::Reviewed),
        (2, 6, 4, "Good initiative, keep up the good work", FeedbackKind::General, FeedbackStatus::New),
        (0, 0, 3, "Navigation could be improved", FeedbackKind::App, FeedbackStatus::Resolved),
        (1, 2, 5, "Very satisfied with the donation process", FeedbackKind::Service, FeedbackStatus::Archived),
    ];

    for (n, (institute, shop, rating, comment, kind, status)) in feedback.into_iter().enumerate() {
        store.insert_feedback(Feedback {
            id: Uuid::from_u128(FEEDBACK_BASE + n as u128),
            transaction_id: Uuid::from_u128(TRANSACTION_BASE + n as u128),
            institute_id: user_id(10 + institute as u128),
            institute_name: INSTITUTES[institute].to_string(),
            shopkeeper_id: shopkeeper_id(shop as u128),
            shopkeeper_name: SHOPKEEPERS[shop].name.to_string(),
            rating,
            comment: comment.to_string(),
            kind,
            status,
            response: None,
            created_at: now - Duration::days(n as i64),
        });
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            ' ' | '-' => Some('.'),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{seed, shopkeeper_id};
    use crate::models::user::UserRole;
    use crate::store::Store;

    #[test]
    fn every_shopkeeper_record_has_a_matching_user() {
        let store = Store::new();
        seed(&store, Utc::now());

        for shopkeeper in store.shopkeepers() {
            let user = store.user(shopkeeper.id).expect("shopkeeper user exists");
            assert_eq!(user.role, UserRole::Shopkeeper);
            assert_eq!(user.status, shopkeeper.status);
        }
    }

    #[test]
    fn seeded_assignments_point_at_known_shopkeepers() {
        let store = Store::new();
        seed(&store, Utc::now());

        for request in store.requests() {
            if let Some(shop) = request.assigned_shop_id {
                assert!(store.shopkeeper(shop).is_ok());
            }
        }
        assert!(store.shopkeeper(shopkeeper_id(0)).is_ok());
    }

    #[test]
    fn slug_lowercases_and_dots_spaces() {
        assert_eq!(super::slug("St. Mary School"), "st.mary.school");
        assert_eq!(super::slug("Rajesh Kumar"), "rajesh.kumar");
    }
}
