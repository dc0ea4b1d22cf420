// src/engines/metrics/stability.rs
use crate::types::{FlightOutcome, Termination};
use std::collections::HashMap;

pub struct StabilityMetrics;

impl StabilityMetrics {
    /// Stability from angle-of-attack variance plus a touchdown quality score.
    ///
    /// `stability` maps variance onto (0, 1]: a perfectly steady flight
    /// scores 1, oscillating or tumbling flights decay towards 0.
    pub fn calculate(outcome: &FlightOutcome, variance_scale: f64) -> HashMap<String, f64> {
        let mut metrics = HashMap::new();

        let alphas: Vec<f64> = outcome.samples.iter().map(|s| s.alpha).collect();
        let variance = Self::variance(&alphas);
        metrics.insert("alpha_variance".to_string(), variance);
        metrics.insert(
            "stability".to_string(),
            1.0 / (1.0 + variance_scale * variance),
        );

        metrics.insert(
            "landing_quality".to_string(),
            Self::landing_quality(outcome),
        );

        metrics
    }

    /// 1.0 for a flat touchdown, falling towards 0 for a vertical dive;
    /// flights that never land score 0.
    fn landing_quality(outcome: &FlightOutcome) -> f64 {
        if outcome.termination != Termination::Landed {
            return 0.0;
        }
        let Some(last) = outcome.final_sample() else {
            return 0.0;
        };
        let horizontal = last.velocity.horizontal_norm();
        let descent = (-last.velocity.z).max(0.0);
        if horizontal <= 0.0 && descent <= 0.0 {
            return 0.0;
        }
        let descent_angle = descent.atan2(horizontal);
        descent_angle.cos().powi(2)
    }

    fn variance(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
    }
}
