use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Runs a dashboard action behind an artificial backend round-trip. The wait
/// always completes; only the action itself can fail.
pub async fn run<T>(
    state: &AppState,
    action: &'static str,
    delay: Duration,
    op: impl FnOnce() -> Result<T, AppError>,
) -> Result<T, AppError> {
    let start = Instant::now();
    sleep(delay).await;

    let result = op();
    let outcome = if result.is_ok() { "success" } else { "error" };
    state
        .metrics
        .action_latency_seconds
        .with_label_values(&[action, outcome])
        .observe(start.elapsed().as_secs_f64());

    match &result {
        Ok(_) => info!(action, "dashboard action completed"),
        Err(err) => warn!(action, error = %err, "dashboard action rejected"),
    }

    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::run;
    use crate::config::Delays;
    use crate::error::AppError;
    use crate::state::AppState;

    #[tokio::test]
    async fn waits_for_the_configured_delay() {
        let state = AppState::new(16, Delays::default());
        let start = tokio::time::Instant::now();

        let value = run(&state, "approve_user", Duration::from_millis(50), || Ok(7))
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn passes_action_errors_through() {
        let state = AppState::new(16, Delays::default());

        let result: Result<(), AppError> = run(&state, "delete_user", Duration::ZERO, || {
            Err(AppError::NotFound("user".to_string()))
        })
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        let body = state.metrics.encode().unwrap();
        assert!(body.contains("action_latency_seconds"));
    }
}
