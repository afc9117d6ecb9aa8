use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Store;
use crate::error::AppError;
use crate::models::feedback::{Feedback, FeedbackStatus};
use crate::models::request::{DonationRequest, RequestStatus};
use crate::models::shopkeeper::{Availability, Shopkeeper};
use crate::models::user::{ModerationAction, User};

impl Store {
    /// Applies a moderation action. A shopkeeper account carries its new status
    /// over to the matching shopkeeper record.
    pub fn moderate_user(&self, id: Uuid, action: ModerationAction) -> Result<User, AppError> {
        let updated = {
            let mut user = self
                .users
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))?;

            let next = action.apply(user.status).ok_or_else(|| {
                AppError::Conflict(format!(
                    "cannot {} user {} in status {}",
                    action.as_str(),
                    id,
                    user.status.as_str()
                ))
            })?;

            user.status = next;
            user.clone()
        };

        if let Some(mut shopkeeper) = self.shopkeepers.get_mut(&id) {
            shopkeeper.status = updated.status;
        }

        Ok(updated)
    }

    pub fn delete_user(&self, id: Uuid) -> Result<User, AppError> {
        let (_, user) = self
            .users
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))?;

        self.shopkeepers.remove(&id);
        Ok(user)
    }

    pub fn set_availability(
        &self,
        id: Uuid,
        availability: Availability,
    ) -> Result<Shopkeeper, AppError> {
        let mut shopkeeper = self
            .shopkeepers
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("shopkeeper {} not found", id)))?;

        shopkeeper.availability = availability;
        Ok(shopkeeper.clone())
    }

    /// Moves a request along its lifecycle. Fulfilling requires an assigned shop,
    /// whose open work count drops by one. Rejecting an assigned request
    /// unassigns it and releases the shop's open work the same way.
    pub fn transition_request(
        &self,
        id: Uuid,
        next: RequestStatus,
        now: DateTime<Utc>,
    ) -> Result<DonationRequest, AppError> {
        let (updated, released) = {
            let mut request = self
                .requests
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound(format!("request {} not found", id)))?;

            if !request.status.can_transition_to(next) {
                return Err(AppError::Conflict(format!(
                    "request {} cannot move from {} to {}",
                    id,
                    request.status.as_str(),
                    next.as_str()
                )));
            }

            if next == RequestStatus::Fulfilled && request.assigned_shop_id.is_none() {
                return Err(AppError::Conflict(format!(
                    "request {} has no assigned shopkeeper",
                    id
                )));
            }

            let released = match next {
                RequestStatus::Rejected => request.assigned_shop_id.take(),
                _ => None,
            };
            request.status = next;
            request.updated_at = now;
            (request.clone(), released)
        };

        if next == RequestStatus::Fulfilled {
            if let Some(shop_id) = updated.assigned_shop_id {
                if let Some(mut shopkeeper) = self.shopkeepers.get_mut(&shop_id) {
                    shopkeeper.record_fulfillment();
                }
            }
        }

        if let Some(shop_id) = released {
            if let Some(mut shopkeeper) = self.shopkeepers.get_mut(&shop_id) {
                shopkeeper.release_assignment();
            }
        }

        Ok(updated)
    }

    /// `Some(reason)` flags the request for review, `None` clears the flag.
    pub fn set_flag(
        &self,
        id: Uuid,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<DonationRequest, AppError> {
        let mut request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("request {} not found", id)))?;

        request.flagged = reason.is_some();
        request.flag_reason = reason;
        request.updated_at = now;
        Ok(request.clone())
    }

    pub fn respond_to_feedback(&self, id: Uuid, response: String) -> Result<Feedback, AppError> {
        if response.trim().is_empty() {
            return Err(AppError::BadRequest("response cannot be empty".to_string()));
        }

        let mut feedback = self
            .feedback
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("feedback {} not found", id)))?;

        feedback.response = Some(response);
        feedback.status = FeedbackStatus::Reviewed;
        Ok(feedback.clone())
    }

    pub fn archive_feedback(&self, id: Uuid) -> Result<Feedback, AppError> {
        let mut feedback = self
            .feedback
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("feedback {} not found", id)))?;

        feedback.status = FeedbackStatus::Archived;
        Ok(feedback.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::config::Delays;
    use crate::engine::{assignment, rotation};
    use crate::error::AppError;
    use crate::fixtures::{self, request_id, shopkeeper_id, user_id};
    use crate::models::feedback::FeedbackStatus;
    use crate::models::request::RequestStatus;
    use crate::models::user::{AccountStatus, ModerationAction};
    use crate::state::AppState;
    use crate::store::Store;

    fn seeded() -> Store {
        let store = Store::new();
        fixtures::seed(&store, Utc::now());
        store
    }

    #[test]
    fn blocking_a_shopkeeper_account_removes_it_from_rotation() {
        let store = seeded();
        let id = shopkeeper_id(0);
        assert!(rotation::rank(&store.shopkeepers()).iter().any(|s| s.id == id));

        let user = store.moderate_user(id, ModerationAction::Block).unwrap();

        assert_eq!(user.status, AccountStatus::Blocked);
        assert_eq!(store.shopkeeper(id).unwrap().status, AccountStatus::Blocked);
        assert!(!rotation::rank(&store.shopkeepers()).iter().any(|s| s.id == id));
    }

    #[test]
    fn moderation_from_wrong_status_is_a_conflict() {
        let store = seeded();

        // donor 2 is pending
        let err = store
            .moderate_user(user_id(22), ModerationAction::Block)
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let approved = store
            .moderate_user(user_id(22), ModerationAction::Approve)
            .unwrap();
        assert_eq!(approved.status, AccountStatus::Active);
    }

    #[test]
    fn deleting_a_shopkeeper_user_drops_the_shopkeeper() {
        let store = seeded();
        let before = store.counts();

        store.delete_user(shopkeeper_id(1)).unwrap();

        assert_eq!(store.counts().users, before.users - 1);
        assert_eq!(store.counts().shopkeepers, before.shopkeepers - 1);
        assert!(matches!(
            store.shopkeeper(shopkeeper_id(1)),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_user(shopkeeper_id(1)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn fulfilling_moves_work_from_active_to_completed() {
        let store = seeded();
        // request 2 is approved and assigned to shopkeeper 0
        let before = store.shopkeeper(shopkeeper_id(0)).unwrap();

        let request = store
            .transition_request(request_id(2), RequestStatus::Fulfilled, Utc::now())
            .unwrap();

        assert_eq!(request.status, RequestStatus::Fulfilled);
        let after = store.shopkeeper(shopkeeper_id(0)).unwrap();
        assert_eq!(after.active_requests, before.active_requests - 1);
        assert_eq!(after.completed_requests, before.completed_requests + 1);
        assert_eq!(after.total_assignments, before.total_assignments);
    }

    #[test]
    fn rejecting_an_assigned_request_releases_the_shop() {
        let state = AppState::new(16, Delays::default());
        fixtures::seed(&state.store, Utc::now());
        let before = state.store.shopkeeper(shopkeeper_id(4)).unwrap();

        let assignment = assignment::auto_assign(&state, request_id(0), Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(assignment.shopkeeper_id, shopkeeper_id(4));

        let request = state
            .store
            .transition_request(request_id(0), RequestStatus::Rejected, Utc::now())
            .unwrap();

        assert_eq!(request.status, RequestStatus::Rejected);
        assert!(request.assigned_shop_id.is_none());
        let after = state.store.shopkeeper(shopkeeper_id(4)).unwrap();
        assert_eq!(after.active_requests, before.active_requests);
        assert_eq!(after.completed_requests, before.completed_requests);
        // the assignment still counts towards rotation
        assert_eq!(after.total_assignments, before.total_assignments + 1);
    }

    #[test]
    fn rejecting_an_unassigned_request_leaves_shops_alone() {
        let store = seeded();
        let before: Vec<u32> = store.shopkeepers().iter().map(|s| s.active_requests).collect();

        store
            .transition_request(request_id(1), RequestStatus::Rejected, Utc::now())
            .unwrap();

        let after: Vec<u32> = store.shopkeepers().iter().map(|s| s.active_requests).collect();
        assert_eq!(after, before);
    }

    #[test]
    fn fulfilling_without_a_shop_or_from_pending_is_rejected() {
        let store = seeded();

        let from_pending =
            store.transition_request(request_id(0), RequestStatus::Fulfilled, Utc::now());
        assert!(matches!(from_pending, Err(AppError::Conflict(_))));

        store
            .transition_request(request_id(1), RequestStatus::Approved, Utc::now())
            .unwrap();
        let unassigned =
            store.transition_request(request_id(1), RequestStatus::Fulfilled, Utc::now());
        assert!(matches!(unassigned, Err(AppError::Conflict(_))));
        assert_eq!(
            store.request(request_id(1)).unwrap().status,
            RequestStatus::Approved
        );
    }

    #[test]
    fn rejected_requests_stay_rejected() {
        let store = seeded();

        store
            .transition_request(request_id(0), RequestStatus::Rejected, Utc::now())
            .unwrap();
        let reopen = store.transition_request(request_id(0), RequestStatus::Approved, Utc::now());

        assert!(matches!(reopen, Err(AppError::Conflict(_))));
    }

    #[test]
    fn flag_and_unflag() {
        let store = seeded();

        let flagged = store
            .set_flag(request_id(1), Some("duplicate request".to_string()), Utc::now())
            .unwrap();
        assert!(flagged.flagged);
        assert_eq!(flagged.flag_reason.as_deref(), Some("duplicate request"));

        let cleared = store.set_flag(request_id(1), None, Utc::now()).unwrap();
        assert!(!cleared.flagged);
        assert!(cleared.flag_reason.is_none());
    }

    #[test]
    fn feedback_response_and_archive() {
        let store = seeded();
        let id = store.feedback()[0].id;

        let blank = store.respond_to_feedback(id, "   ".to_string());
        assert!(matches!(blank, Err(AppError::BadRequest(_))));

        let answered = store
            .respond_to_feedback(id, "Thanks, we are on it".to_string())
            .unwrap();
        assert_eq!(answered.status, FeedbackStatus::Reviewed);
        assert_eq!(answered.response.as_deref(), Some("Thanks, we are on it"));

        let archived = store.archive_feedback(id).unwrap();
        assert_eq!(archived.status, FeedbackStatus::Archived);
    }
}
