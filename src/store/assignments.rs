use std::sync::MutexGuard;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Store;
use crate::error::AppError;
use crate::models::assignment::{Assignment, AssignmentMode};
use crate::models::shopkeeper::Shopkeeper;

/// Held while a shopkeeper is picked and committed, so picks never race.
pub struct AssignmentGuard<'a> {
    _inner: MutexGuard<'a, ()>,
}

impl Store {
    pub fn lock_assignments(&self) -> Result<AssignmentGuard<'_>, AppError> {
        let inner = self
            .assignment_lock
            .lock()
            .map_err(|err| AppError::Internal(format!("assignment lock poisoned: {err}")))?;
        Ok(AssignmentGuard { _inner: inner })
    }

    /// Pairs a request with a shopkeeper. Both sides are validated before either
    /// is touched; on success the shopkeeper's rotation counters move forward.
    pub fn commit_assignment(
        &self,
        _guard: &AssignmentGuard<'_>,
        request_id: Uuid,
        shopkeeper_id: Uuid,
        mode: AssignmentMode,
        now: DateTime<Utc>,
    ) -> Result<(Assignment, Shopkeeper), AppError> {
        let mut shopkeeper = self
            .shopkeepers
            .get_mut(&shopkeeper_id)
            .ok_or_else(|| AppError::NotFound(format!("shopkeeper {} not found", shopkeeper_id)))?;

        if !shopkeeper.is_active() {
            return Err(AppError::Conflict(format!(
                "shopkeeper {} is {}",
                shopkeeper_id,
                shopkeeper.status.as_str()
            )));
        }

        // Availability is written outside the assignment lock.
        if !shopkeeper.is_auto_assignable() {
            return Err(AppError::Conflict(format!(
                "shopkeeper {} is {}",
                shopkeeper_id,
                shopkeeper.availability.as_str()
            )));
        }

        let mut request = self
            .requests
            .get_mut(&request_id)
            .ok_or_else(|| AppError::NotFound(format!("request {} not found", request_id)))?;

        if !request.is_assignable() {
            return Err(AppError::Conflict(format!(
                "request {} is not awaiting assignment ({})",
                request_id,
                request.display_status()
            )));
        }

        request.assigned_shop_id = Some(shopkeeper_id);
        request.updated_at = now;
        shopkeeper.record_assignment(now);

        let assignment = Assignment {
            id: Uuid::new_v4(),
            request_id,
            shopkeeper_id,
            shopkeeper_name: shopkeeper.name.clone(),
            mode,
            assigned_at: now,
        };
        let updated = shopkeeper.clone();

        drop(request);
        drop(shopkeeper);

        self.assignments.insert(assignment.id, assignment.clone());
        Ok((assignment, updated))
    }
}
