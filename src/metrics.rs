use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

use crate::calculator::AffordabilityLevel;

/// Install the Prometheus recorder globally
///
/// Fails if a recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "car_cost_calculations_total",
        "Total number of cost calculations by affordability level"
    );
    describe_counter!(
        "car_cost_advisory_requests_total",
        "Total number of advisory requests by endpoint and outcome"
    );
    describe_histogram!(
        "car_cost_advisory_duration_seconds",
        "Advisory upstream call duration in seconds"
    );
    describe_gauge!("car_cost_advisor_info", "Service version information");

    gauge!("car_cost_advisor_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a finished calculation
pub fn record_calculation(level: AffordabilityLevel) {
    counter!(
        "car_cost_calculations_total",
        "level" => level.as_str(),
    )
    .increment(1);
}

/// Record an advisory call outcome, e.g. `parsed`, `partial`, `unparsed`, `error`
pub fn record_advisory(endpoint: &'static str, outcome: &'static str) {
    counter!(
        "car_cost_advisory_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome,
    )
    .increment(1);
}

/// Record advisory upstream duration
pub fn record_advisory_duration(endpoint: &'static str, duration: Duration) {
    histogram!(
        "car_cost_advisory_duration_seconds",
        "endpoint" => endpoint,
    )
    .record(duration.as_secs_f64());
}
