use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Deserialize;

use crate::filter::Predicate;
use crate::models::feedback::{Feedback, FeedbackKind, FeedbackStatus};
use crate::models::request::{DonationRequest, RequestStatus};
use crate::models::shopkeeper::{Availability, Shopkeeper};
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::models::user::{AccountStatus, User, UserRole};

/// Case-insensitive substring match over the fields a page lets you search.
/// A blank term yields no criterion.
fn search_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn user_search(term: Option<&str>) -> Option<impl Predicate<User> + use<>> {
    search_term(term).map(|needle| {
        move |user: &User| contains(&user.name, &needle) || contains(&user.email, &needle)
    })
}

pub fn user_role(role: UserRole) -> impl Predicate<User> {
    move |user: &User| user.role == role
}

pub fn user_status(status: AccountStatus) -> impl Predicate<User> {
    move |user: &User| user.status == status
}

pub fn shopkeeper_search(term: Option<&str>) -> Option<impl Predicate<Shopkeeper> + use<>> {
    search_term(term).map(|needle| {
        move |shopkeeper: &Shopkeeper| {
            contains(&shopkeeper.name, &needle) || contains(&shopkeeper.area, &needle)
        }
    })
}

pub fn availability(availability: Availability) -> impl Predicate<Shopkeeper> {
    move |shopkeeper: &Shopkeeper| shopkeeper.availability == availability
}

pub fn auto_assignable() -> impl Predicate<Shopkeeper> {
    |shopkeeper: &Shopkeeper| shopkeeper.is_auto_assignable()
}

pub fn request_status(status: RequestStatus) -> impl Predicate<DonationRequest> {
    move |request: &DonationRequest| request.status == status
}

pub fn flagged(flagged: bool) -> impl Predicate<DonationRequest> {
    move |request: &DonationRequest| request.flagged == flagged
}

pub fn transaction_search(term: Option<&str>) -> Option<impl Predicate<Transaction> + use<>> {
    search_term(term).map(|needle| {
        move |tx: &Transaction| {
            contains(&tx.donor_name, &needle)
                || contains(&tx.shopkeeper_name, &needle)
                || contains(&tx.institute_name, &needle)
                || contains(&tx.id.to_string(), &needle)
        }
    })
}

pub fn transaction_status(status: TransactionStatus) -> impl Predicate<Transaction> {
    move |tx: &Transaction| tx.status == status
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateWindow {
    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Today => at.date_naive() == now.date_naive(),
            DateWindow::Week => at >= now - Duration::days(7) && at <= now,
            DateWindow::Month => at.year() == now.year() && at.month() == now.month(),
        }
    }
}

pub fn created_within(window: DateWindow, now: DateTime<Utc>) -> impl Predicate<Transaction> {
    move |tx: &Transaction| window.contains(tx.created_at, now)
}

pub fn feedback_search(term: Option<&str>) -> Option<impl Predicate<Feedback> + use<>> {
    search_term(term).map(|needle| {
        move |feedback: &Feedback| {
            contains(&feedback.institute_name, &needle) || contains(&feedback.comment, &needle)
        }
    })
}

pub fn feedback_kind(kind: FeedbackKind) -> impl Predicate<Feedback> {
    move |feedback: &Feedback| feedback.kind == kind
}

pub fn feedback_status(status: FeedbackStatus) -> impl Predicate<Feedback> {
    move |feedback: &Feedback| feedback.status == status
}

/// Archived feedback stays out of listings unless archived items are what was asked for.
pub fn archived_visibility(requested: Option<FeedbackStatus>) -> impl Predicate<Feedback> {
    let show_archived = requested == Some(FeedbackStatus::Archived);
    move |feedback: &Feedback| show_archived || feedback.status != FeedbackStatus::Archived
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShopkeeperSort {
    #[default]
    Rating,
    Requests,
    Earnings,
}

impl ShopkeeperSort {
    /// Descending on the chosen column; equal entries keep their order.
    pub fn apply(&self, shopkeepers: &mut [Shopkeeper]) {
        match self {
            ShopkeeperSort::Rating => shopkeepers.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            ShopkeeperSort::Requests => {
                shopkeepers.sort_by(|a, b| b.completed_requests.cmp(&a.completed_requests))
            }
            ShopkeeperSort::Earnings => {
                shopkeepers.sort_by(|a, b| b.total_earnings.cmp(&a.total_earnings))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::{DateWindow, archived_visibility, feedback_status, user_role, user_search};
    use crate::filter::{Filter, Predicate};
    use crate::models::feedback::{Feedback, FeedbackKind, FeedbackStatus};
    use crate::models::user::{AccountStatus, User, UserRole};

    fn user(name: &str, email: &str, role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status: AccountStatus::Active,
            phone: None,
            address: None,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn feedback(status: FeedbackStatus) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            transaction_id: Uuid::new_v4(),
            institute_id: Uuid::new_v4(),
            institute_name: "Hope Foundation".to_string(),
            shopkeeper_id: Uuid::new_v4(),
            shopkeeper_name: "Amit Patel".to_string(),
            rating: 4,
            comment: "Great service".to_string(),
            kind: FeedbackKind::Service,
            status,
            response: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_email() {
        let search = user_search(Some("  JANE ")).expect("non-blank term");

        assert!(search.matches(&user("Jane Smith", "js@mail.example", UserRole::Donor)));
        assert!(search.matches(&user("J. Smith", "jane@mail.example", UserRole::Donor)));
        assert!(!search.matches(&user("John Doe", "jd@mail.example", UserRole::Donor)));
    }

    #[test]
    fn blank_search_adds_no_criterion() {
        assert!(user_search(Some("   ")).is_none());
        assert!(user_search(None).is_none());
    }

    #[test]
    fn criteria_compose_into_a_filter() {
        let users = vec![
            user("Jane Smith", "jane@mail.example", UserRole::Donor),
            user("Jane's Shop", "jane@shops.example", UserRole::Shopkeeper),
            user("John Doe", "john@mail.example", UserRole::Donor),
        ];

        let filter = Filter::new()
            .with_opt(user_search(Some("jane")))
            .with(user_role(UserRole::Donor));

        let names: Vec<String> = filter.apply(users).into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Jane Smith".to_string()]);
    }

    #[test]
    fn archived_feedback_only_shows_when_requested() {
        let archived = feedback(FeedbackStatus::Archived);
        let fresh = feedback(FeedbackStatus::New);

        let default_view = archived_visibility(None);
        assert!(!default_view.matches(&archived));
        assert!(default_view.matches(&fresh));

        let archive_view = archived_visibility(Some(FeedbackStatus::Archived))
            .and(feedback_status(FeedbackStatus::Archived));
        assert!(archive_view.matches(&archived));
        assert!(!archive_view.matches(&fresh));
    }

    #[test]
    fn date_windows() {
        let now = Utc.with_ymd_and_hms(2025, 2, 27, 15, 0, 0).unwrap();

        assert!(DateWindow::Today.contains(now - Duration::hours(10), now));
        assert!(!DateWindow::Today.contains(now - Duration::hours(16), now));

        assert!(DateWindow::Week.contains(now - Duration::days(6), now));
        assert!(!DateWindow::Week.contains(now - Duration::days(8), now));
        assert!(!DateWindow::Week.contains(now + Duration::days(1), now));

        let first_of_month = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2025, 1, 31, 23, 0, 0).unwrap();
        let last_year = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
        assert!(DateWindow::Month.contains(first_of_month, now));
        assert!(!DateWindow::Month.contains(last_month, now));
        assert!(!DateWindow::Month.contains(last_year, now));

        assert!(DateWindow::All.contains(now - Duration::days(900), now));
    }
}
