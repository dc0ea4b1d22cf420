use super::traits::ConfigSection;
use crate::error::PaperwingError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Integration time step in seconds.
    pub time_step: f64,
    /// Maximum flight duration in seconds before the run is cut off.
    pub max_duration: f64,
    /// Speed bound in m/s; exceeding it flags the flight as unstable.
    pub max_speed: f64,
    pub gravity: f64,
    /// Sheet density in grams per square metre (standard printer paper).
    pub paper_density_gsm: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            max_duration: 15.0,
            max_speed: 60.0,
            gravity: 9.81,
            paper_density_gsm: 80.0,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), PaperwingError> {
        if self.time_step <= 0.0 || !self.time_step.is_finite() {
            return Err(PaperwingError::Configuration(
                "Time step must be positive and finite".to_string(),
            ));
        }
        if self.max_duration <= self.time_step {
            return Err(PaperwingError::Configuration(
                "Max duration must exceed the time step".to_string(),
            ));
        }
        if self.max_speed <= 0.0 {
            return Err(PaperwingError::Configuration(
                "Speed bound must be positive".to_string(),
            ));
        }
        if self.gravity <= 0.0 {
            return Err(PaperwingError::Configuration(
                "Gravity must be positive".to_string(),
            ));
        }
        if self.paper_density_gsm <= 0.0 {
            return Err(PaperwingError::Configuration(
                "Paper density must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
