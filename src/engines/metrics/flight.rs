// src/engines/metrics/flight.rs
use crate::config::FlightCondition;
use crate::types::{FlightOutcome, Termination};
use std::collections::HashMap;

pub struct FlightPerformance;

impl FlightPerformance {
    pub fn calculate(
        outcome: &FlightOutcome,
        condition: &FlightCondition,
    ) -> HashMap<String, f64> {
        let mut metrics = HashMap::new();

        let Some(last) = outcome.final_sample() else {
            metrics.insert("range_m".to_string(), 0.0);
            metrics.insert("duration_s".to_string(), 0.0);
            metrics.insert("success".to_string(), 0.0);
            return metrics;
        };

        let range = last.position.horizontal_norm();
        metrics.insert("range_m".to_string(), range);
        metrics.insert("duration_s".to_string(), last.time);

        let max_altitude = outcome
            .samples
            .iter()
            .map(|s| s.position.z)
            .fold(f64::NEG_INFINITY, f64::max);
        metrics.insert("max_altitude_m".to_string(), max_altitude);

        // Horizontal distance per metre of altitude given up.
        let altitude_lost = (condition.launch_height - last.position.z).max(1e-3);
        metrics.insert("glide_ratio".to_string(), range / altitude_lost);

        let landed = outcome.termination == Termination::Landed;
        metrics.insert("success".to_string(), if landed { 1.0 } else { 0.0 });

        metrics
    }
}
