use super::{
    conditions::ConditionsConfig,
    evolution::EvolutionConfig,
    fitness::FitnessConfig,
    genes::GeneSpec,
    simulation::SimulationConfig,
    traits::ConfigSection,
};
use crate::error::PaperwingError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub simulation: SimulationConfig,
    pub fitness: FitnessConfig,
    pub conditions: ConditionsConfig,
    pub genes: GeneSpec,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), PaperwingError> {
        self.evolution.validate()?;
        self.simulation.validate()?;
        self.fitness.validate()?;
        self.conditions.validate()?;
        self.genes.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PaperwingError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PaperwingError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| PaperwingError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PaperwingError> {
        let config = self.config.read().unwrap();
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| PaperwingError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| PaperwingError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), PaperwingError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap();
        f(&mut config);
        config.validate()?;
        Ok(())
    }
}
