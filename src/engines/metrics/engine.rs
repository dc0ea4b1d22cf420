// src/engines/metrics/engine.rs
use crate::config::FlightCondition;
use crate::engines::metrics::{FlightPerformance, StabilityMetrics};
use crate::types::FlightOutcome;
use std::collections::HashMap;

pub struct MetricsEngine {
    /// Scale applied to angle-of-attack variance before mapping to (0, 1].
    stability_variance_scale: f64,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl MetricsEngine {
    pub fn new(stability_variance_scale: f64) -> Self {
        Self {
            stability_variance_scale,
        }
    }

    pub fn calculate_all(
        &self,
        outcome: &FlightOutcome,
        condition: &FlightCondition,
    ) -> HashMap<String, f64> {
        let mut all_metrics = HashMap::new();

        all_metrics.extend(FlightPerformance::calculate(outcome, condition));
        all_metrics.extend(StabilityMetrics::calculate(
            outcome,
            self.stability_variance_scale,
        ));

        all_metrics.insert("num_samples".to_string(), outcome.samples.len() as f64);

        all_metrics
    }
}
