use prometheus::{
    Encoder, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub assignments_total: IntCounterVec,
    pub shopkeeper_assignments: IntGaugeVec,
    pub action_latency_seconds: HistogramVec,
    pub exports_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let assignments_total = IntCounterVec::new(
            Opts::new("assignments_total", "Assignment attempts by mode and outcome"),
            &["mode", "outcome"],
        )
        .expect("valid assignments_total metric");

        let shopkeeper_assignments = IntGaugeVec::new(
            Opts::new(
                "shopkeeper_assignments",
                "Total assignments received per shopkeeper",
            ),
            &["shopkeeper_id"],
        )
        .expect("valid shopkeeper_assignments metric");

        let action_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "action_latency_seconds",
                "Latency of simulated dashboard actions in seconds",
            ),
            &["action", "outcome"],
        )
        .expect("valid action_latency_seconds metric");

        let exports_total = IntCounterVec::new(
            Opts::new("exports_total", "CSV exports by kind"),
            &["kind"],
        )
        .expect("valid exports_total metric");

        registry
            .register(Box::new(assignments_total.clone()))
            .expect("register assignments_total");
        registry
            .register(Box::new(shopkeeper_assignments.clone()))
            .expect("register shopkeeper_assignments");
        registry
            .register(Box::new(action_latency_seconds.clone()))
            .expect("register action_latency_seconds");
        registry
            .register(Box::new(exports_total.clone()))
            .expect("register exports_total");

        Self {
            registry,
            assignments_total,
            shopkeeper_assignments,
            action_latency_seconds,
            exports_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
