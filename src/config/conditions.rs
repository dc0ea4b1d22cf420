use super::traits::ConfigSection;
use crate::error::PaperwingError;
use crate::types::Vec3;
use serde::{Deserialize, Serialize};

pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;

/// One launch scenario a candidate design is scored under. Immutable; the
/// evaluator runs every genome through the same ordered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightCondition {
    pub name: String,
    /// Ambient wind in m/s, world frame (x downrange, z up).
    pub wind: Vec3,
    pub air_density: f64,
    pub launch_speed: f64,
    /// Launch pitch above the horizon, degrees.
    pub launch_angle_deg: f64,
    pub launch_height: f64,
}

impl FlightCondition {
    pub fn new(name: &str, wind: Vec3) -> Self {
        Self {
            name: name.to_string(),
            wind,
            air_density: SEA_LEVEL_AIR_DENSITY,
            launch_speed: 6.0,
            launch_angle_deg: 10.0,
            launch_height: 2.0,
        }
    }

    fn validate(&self) -> Result<(), PaperwingError> {
        if self.name.is_empty() {
            return Err(PaperwingError::Configuration(
                "Flight condition name must not be empty".to_string(),
            ));
        }
        if !self.wind.is_finite() {
            return Err(PaperwingError::Configuration(format!(
                "Condition '{}' has a non-finite wind vector",
                self.name
            )));
        }
        if self.air_density <= 0.0 {
            return Err(PaperwingError::Configuration(format!(
                "Condition '{}' must have positive air density",
                self.name
            )));
        }
        if self.launch_speed <= 0.0 {
            return Err(PaperwingError::Configuration(format!(
                "Condition '{}' must have positive launch speed",
                self.name
            )));
        }
        if self.launch_angle_deg.abs() >= 90.0 {
            return Err(PaperwingError::Configuration(format!(
                "Condition '{}' launch angle must be within (-90, 90) degrees",
                self.name
            )));
        }
        if self.launch_height <= 0.0 {
            return Err(PaperwingError::Configuration(format!(
                "Condition '{}' must launch above the ground",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered condition set evaluated per genome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionsConfig {
    pub conditions: Vec<FlightCondition>,
}

impl Default for ConditionsConfig {
    fn default() -> Self {
        Self {
            conditions: vec![
                FlightCondition::new("calm", Vec3::zero()),
                FlightCondition::new("tailwind", Vec3::new(3.0, 0.0, 0.0)),
                FlightCondition::new("headwind", Vec3::new(-2.0, 0.0, 0.0)),
            ],
        }
    }
}

impl ConfigSection for ConditionsConfig {
    fn section_name() -> &'static str {
        "conditions"
    }

    fn validate(&self) -> Result<(), PaperwingError> {
        if self.conditions.is_empty() {
            return Err(PaperwingError::Configuration(
                "Condition set must not be empty".to_string(),
            ));
        }
        for condition in &self.conditions {
            condition.validate()?;
        }
        Ok(())
    }
}
