use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Fulfilled,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Approved, RequestStatus::Fulfilled)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub estimated_cost: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRequest {
    pub id: Uuid,
    pub institute_id: Uuid,
    pub institute_name: String,
    pub items: Vec<RequestItem>,
    pub status: RequestStatus,
    pub flagged: bool,
    pub flag_reason: Option<String>,
    pub assigned_shop_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DonationRequest {
    pub fn total_cost(&self) -> u64 {
        self.items.iter().map(|item| item.estimated_cost).sum()
    }

    /// Label shown in listings; a flag overrides the lifecycle status.
    pub fn display_status(&self) -> &'static str {
        if self.flagged {
            "flagged"
        } else {
            self.status.as_str()
        }
    }

    /// Still waiting in the unassigned pool.
    pub fn is_assignable(&self) -> bool {
        !self.flagged
            && self.assigned_shop_id.is_none()
            && matches!(self.status, RequestStatus::Pending | RequestStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{DonationRequest, RequestItem, RequestStatus};

    fn request(status: RequestStatus) -> DonationRequest {
        let now = Utc::now();
        DonationRequest {
            id: Uuid::new_v4(),
            institute_id: Uuid::new_v4(),
            institute_name: "St. Mary School".to_string(),
            items: vec![
                RequestItem {
                    id: Uuid::new_v4(),
                    name: "Notebooks".to_string(),
                    quantity: 100,
                    unit: "pcs".to_string(),
                    estimated_cost: 500,
                },
                RequestItem {
                    id: Uuid::new_v4(),
                    name: "Pencils".to_string(),
                    quantity: 200,
                    unit: "pcs".to_string(),
                    estimated_cost: 200,
                },
            ],
            status,
            flagged: false,
            flag_reason: None,
            assigned_shop_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn lifecycle_allows_only_forward_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(RequestStatus::Approved.can_transition_to(RequestStatus::Fulfilled));

        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Fulfilled));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Rejected.can_transition_to(RequestStatus::Approved));
        assert!(!RequestStatus::Fulfilled.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn total_cost_sums_items() {
        assert_eq!(request(RequestStatus::Pending).total_cost(), 700);
    }

    #[test]
    fn flag_overrides_display_status_and_blocks_assignment() {
        let mut req = request(RequestStatus::Approved);
        assert_eq!(req.display_status(), "approved");
        assert!(req.is_assignable());

        req.flagged = true;
        assert_eq!(req.display_status(), "flagged");
        assert!(!req.is_assignable());
    }

    #[test]
    fn closed_or_assigned_requests_leave_the_pool() {
        assert!(!request(RequestStatus::Rejected).is_assignable());
        assert!(!request(RequestStatus::Fulfilled).is_assignable());

        let mut req = request(RequestStatus::Pending);
        req.assigned_shop_id = Some(Uuid::new_v4());
        assert!(!req.is_assignable());
    }
}
