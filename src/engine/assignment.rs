use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::rotation;
use crate::error::AppError;
use crate::filter::criteria::auto_assignable;
use crate::filter::Filter;
use crate::models::assignment::{Assignment, AssignmentMode};
use crate::models::shopkeeper::Shopkeeper;
use crate::state::AppState;

/// Active shopkeepers in the order they will receive new work.
pub fn rotation_queue(state: &AppState) -> Vec<Shopkeeper> {
    rotation::rank(&state.store.shopkeepers())
}

/// Operator-chosen assignment. The shopkeeper must be active and available,
/// the same bar auto-assign applies, but rotation order is not enforced.
pub fn assign(
    state: &AppState,
    request_id: Uuid,
    shopkeeper_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Assignment, AppError> {
    let committed = {
        let guard = state.store.lock_assignments()?;
        state
            .store
            .commit_assignment(&guard, request_id, shopkeeper_id, AssignmentMode::Manual, now)
    };

    match committed {
        Ok((assignment, shopkeeper)) => Ok(publish(state, assignment, &shopkeeper)),
        Err(err) => {
            record_outcome(state, AssignmentMode::Manual, "error");
            Err(err)
        }
    }
}

/// Hands the request to the head of the rotation among active, available
/// shopkeepers. `Ok(None)` means nobody is eligible and nothing was changed.
pub fn auto_assign(
    state: &AppState,
    request_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Option<Assignment>, AppError> {
    let committed = {
        let guard = state.store.lock_assignments()?;

        let request = state.store.request(request_id)?;
        if !request.is_assignable() {
            record_outcome(state, AssignmentMode::Auto, "error");
            return Err(AppError::Conflict(format!(
                "request {} is not awaiting assignment ({})",
                request_id,
                request.display_status()
            )));
        }

        let candidates = Filter::new()
            .with(auto_assignable())
            .apply(state.store.shopkeepers());

        let Some(chosen) = rotation::recommend(&candidates) else {
            warn!(request_id = %request_id, "no eligible shopkeeper; request left unassigned");
            record_outcome(state, AssignmentMode::Auto, "no_eligible");
            return Ok(None);
        };

        state
            .store
            .commit_assignment(&guard, request_id, chosen.id, AssignmentMode::Auto, now)
    };

    match committed {
        Ok((assignment, shopkeeper)) => Ok(Some(publish(state, assignment, &shopkeeper))),
        Err(err) => {
            record_outcome(state, AssignmentMode::Auto, "error");
            Err(err)
        }
    }
}

fn publish(state: &AppState, assignment: Assignment, shopkeeper: &Shopkeeper) -> Assignment {
    record_outcome(state, assignment.mode, "success");
    state
        .metrics
        .shopkeeper_assignments
        .with_label_values(&[&shopkeeper.id.to_string()])
        .set(shopkeeper.total_assignments as i64);

    let _ = state.assignment_events_tx.send(assignment.clone());

    info!(
        request_id = %assignment.request_id,
        shopkeeper_id = %assignment.shopkeeper_id,
        mode = assignment.mode.as_str(),
        total_assignments = shopkeeper.total_assignments,
        "request assigned"
    );

    assignment
}

fn record_outcome(state: &AppState, mode: AssignmentMode, outcome: &str) {
    state
        .metrics
        .assignments_total
        .with_label_values(&[mode.as_str(), outcome])
        .inc();
}
