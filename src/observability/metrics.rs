//! Metrics collection and exposition.
//!
//! # Metrics
//! - `deeplink_dispatch_total` (counter): dispatches by outcome
//! - `deeplink_registrations_total` (counter): registrations by result
//! - `deeplink_backstack_submissions_total` (counter): submissions by mode, result
//! - `deeplink_backstack_depth` (gauge): depth of the last applied stack
//!
//! # Design Decisions
//! - Recording is cheap and recorder-agnostic (`metrics` facade)
//! - Prometheus recorder installed only by the binary

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub fn record_dispatch(outcome: &'static str) {
    counter!("deeplink_dispatch_total", "outcome" => outcome).increment(1);
}

pub fn record_registration(result: &'static str) {
    counter!("deeplink_registrations_total", "result" => result).increment(1);
}

pub fn record_submission(mode: &'static str, result: &'static str) {
    counter!("deeplink_backstack_submissions_total", "mode" => mode, "result" => result).increment(1);
}

pub fn record_stack_depth(depth: usize) {
    gauge!("deeplink_backstack_depth").set(depth as f64);
}

/// Install the global Prometheus recorder.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics recorder");
            None
        }
    }
}
