use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    General,
    Service,
    App,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::General => "general",
            FeedbackKind::Service => "service",
            FeedbackKind::App => "app",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    New,
    Reviewed,
    Resolved,
    Archived,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::New => "new",
            FeedbackStatus::Reviewed => "reviewed",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub institute_id: Uuid,
    pub institute_name: String,
    pub shopkeeper_id: Uuid,
    pub shopkeeper_name: String,
    pub rating: u8,
    pub comment: String,
    pub kind: FeedbackKind,
    pub status: FeedbackStatus,
    pub response: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackSummary {
    pub total: usize,
    pub average_rating: f64,
    pub new: usize,
    pub resolved: usize,
}

impl FeedbackSummary {
    pub fn from_feedback(items: &[Feedback]) -> Self {
        let total = items.len();
        let average_rating = if total == 0 {
            0.0
        } else {
            let sum: u32 = items.iter().map(|f| f.rating as u32).sum();
            (sum as f64 / total as f64 * 10.0).round() / 10.0
        };

        Self {
            total,
            average_rating,
            new: items.iter().filter(|f| f.status == FeedbackStatus::New).count(),
            resolved: items
                .iter()
                .filter(|f| f.status == FeedbackStatus::Resolved)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{Feedback, FeedbackKind, FeedbackStatus, FeedbackSummary};

    fn feedback(rating: u8, status: FeedbackStatus) -> Feedback {
        Feedback {
            id: Uuid::new_v4(),
            transaction_id: Uuid::new_v4(),
            institute_id: Uuid::new_v4(),
            institute_name: "Hope Foundation".to_string(),
            shopkeeper_id: Uuid::new_v4(),
            shopkeeper_name: "Amit Patel".to_string(),
            rating,
            comment: "ok".to_string(),
            kind: FeedbackKind::Service,
            status,
            response: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_rounds_average_to_one_decimal() {
        let items = vec![
            feedback(4, FeedbackStatus::New),
            feedback(3, FeedbackStatus::Reviewed),
            feedback(5, FeedbackStatus::Resolved),
        ];
        let summary = FeedbackSummary::from_feedback(&items);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.average_rating, 4.0);
        assert_eq!(summary.new, 1);
        assert_eq!(summary.resolved, 1);

        let uneven = vec![
            feedback(4, FeedbackStatus::New),
            feedback(5, FeedbackStatus::New),
            feedback(5, FeedbackStatus::New),
        ];
        assert_eq!(FeedbackSummary::from_feedback(&uneven).average_rating, 4.7);
    }

    #[test]
    fn empty_summary_has_zero_average() {
        let summary = FeedbackSummary::from_feedback(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_rating, 0.0);
    }
}
