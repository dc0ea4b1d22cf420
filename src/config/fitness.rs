use super::traits::ConfigSection;
use crate::error::PaperwingError;
use serde::{Deserialize, Serialize};

/// Weights folding per-condition flight metrics into one scalar fitness.
///
/// Range and duration are in natural units (metres, seconds); stability and
/// landing quality are 0-1 scores, so their default weights are larger to
/// keep the terms comparable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessConfig {
    pub weight_range: f64,
    pub weight_duration: f64,
    pub weight_stability: f64,
    pub weight_landing: f64,
    /// Subtracted from a condition's score when its flight was flagged unstable.
    pub instability_penalty: f64,
    /// Fixed fitness assigned to genomes that decode to a degenerate shape.
    pub degenerate_floor: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self::balanced()
    }
}

impl FitnessConfig {
    /// Equal emphasis on distance and stable flight.
    pub fn balanced() -> Self {
        Self {
            weight_range: 1.0,
            weight_duration: 0.5,
            weight_stability: 8.0,
            weight_landing: 3.0,
            instability_penalty: 10.0,
            degenerate_floor: 1e-3,
        }
    }

    /// Favour raw horizontal range.
    pub fn distance() -> Self {
        Self {
            weight_range: 2.0,
            weight_duration: 0.3,
            weight_stability: 2.0,
            weight_landing: 1.0,
            ..Self::balanced()
        }
    }

    /// Favour steady, well-damped flight over range.
    pub fn stability() -> Self {
        Self {
            weight_range: 0.3,
            weight_duration: 0.5,
            weight_stability: 15.0,
            weight_landing: 5.0,
            ..Self::balanced()
        }
    }

    /// Look up a preset by objective name.
    pub fn preset(objective: &str) -> Result<Self, PaperwingError> {
        match objective {
            "distance" => Ok(Self::distance()),
            "stability" => Ok(Self::stability()),
            "balanced" => Ok(Self::balanced()),
            other => Err(PaperwingError::Configuration(format!(
                "Unknown objective '{}', expected distance|stability|balanced",
                other
            ))),
        }
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), PaperwingError> {
        let weights = [
            self.weight_range,
            self.weight_duration,
            self.weight_stability,
            self.weight_landing,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PaperwingError::Configuration(
                "Fitness weights must be finite and non-negative".to_string(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(PaperwingError::Configuration(
                "At least one fitness weight must be positive".to_string(),
            ));
        }
        if !self.instability_penalty.is_finite() || self.instability_penalty < 0.0 {
            return Err(PaperwingError::Configuration(
                "Instability penalty must be finite and non-negative".to_string(),
            ));
        }
        if !self.degenerate_floor.is_finite() {
            return Err(PaperwingError::Configuration(
                "Degenerate fitness floor must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
