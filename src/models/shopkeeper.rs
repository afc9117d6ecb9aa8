use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::AccountStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
            Availability::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shopkeeper {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub area: String,
    pub status: AccountStatus,
    pub availability: Availability,
    pub total_assignments: u32,
    pub last_assigned: Option<DateTime<Utc>>,
    pub rating: f64,
    pub completion_rate: u8,
    pub average_fulfillment_days: u8,
    pub active_requests: u32,
    pub completed_requests: u32,
    pub total_earnings: u64,
}

impl Shopkeeper {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Active and currently taking work. Both manual and auto assignment
    /// require it.
    pub fn is_auto_assignable(&self) -> bool {
        self.is_active() && self.availability == Availability::Available
    }

    pub fn record_assignment(&mut self, at: DateTime<Utc>) {
        self.total_assignments = self.total_assignments.saturating_add(1);
        self.active_requests = self.active_requests.saturating_add(1);
        self.last_assigned = Some(at);
    }

    /// Drops an open assignment that ended without being fulfilled.
    pub fn release_assignment(&mut self) {
        self.active_requests = self.active_requests.saturating_sub(1);
    }

    pub fn record_fulfillment(&mut self) {
        self.active_requests = self.active_requests.saturating_sub(1);
        self.completed_requests = self.completed_requests.saturating_add(1);
    }
}
