use tokio::sync::broadcast;

use crate::config::Delays;
use crate::models::assignment::Assignment;
use crate::observability::metrics::Metrics;
use crate::store::Store;

pub struct AppState {
    pub store: Store,
    pub assignment_events_tx: broadcast::Sender<Assignment>,
    pub metrics: Metrics,
    pub delays: Delays,
}

impl AppState {
    pub fn new(event_buffer_size: usize, delays: Delays) -> Self {
        let (assignment_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            store: Store::new(),
            assignment_events_tx,
            metrics: Metrics::new(),
            delays,
        }
    }
}
