use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::request::{DonationRequest, RequestStatus};
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::models::user::{User, UserRole};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserCounts {
    pub institutes: usize,
    pub donors: usize,
    pub shopkeepers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyDonation {
    /// `YYYY-MM`
    pub month: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_donations: u64,
    pub pending_requests: usize,
    pub completed_requests: usize,
    pub flagged_requests: usize,
    pub total_users: UserCounts,
    pub monthly_donations: Vec<MonthlyDonation>,
}

impl DashboardStats {
    /// Donation totals count completed transactions only, bucketed by creation month.
    pub fn compute(
        users: &[User],
        requests: &[DonationRequest],
        transactions: &[Transaction],
    ) -> Self {
        let mut total_users = UserCounts::default();
        for user in users {
            match user.role {
                UserRole::Institute => total_users.institutes += 1,
                UserRole::Donor => total_users.donors += 1,
                UserRole::Shopkeeper => total_users.shopkeepers += 1,
                UserRole::Admin => {}
            }
        }

        let mut by_month: BTreeMap<String, u64> = BTreeMap::new();
        let mut total_donations = 0u64;
        for tx in transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Completed)
        {
            total_donations += tx.amount;
            *by_month
                .entry(tx.created_at.format("%Y-%m").to_string())
                .or_default() += tx.amount;
        }

        Self {
            total_donations,
            pending_requests: requests
                .iter()
                .filter(|r| r.status == RequestStatus::Pending)
                .count(),
            completed_requests: requests
                .iter()
                .filter(|r| r.status == RequestStatus::Fulfilled)
                .count(),
            flagged_requests: requests.iter().filter(|r| r.flagged).count(),
            total_users,
            monthly_donations: by_month
                .into_iter()
                .map(|(month, amount)| MonthlyDonation { month, amount })
                .collect(),
        }
    }
}
