use super::traits::ConfigSection;
use crate::error::PaperwingError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub mutation_rate: f64,
    /// Maximum mutation delta as a fraction of the gene's range width.
    pub mutation_scale: f64,
    pub crossover_rate: f64,
    pub crossover_method: CrossoverMethod,
    pub selection_method: SelectionMethod,
    pub elitism_count: usize,
    pub tournament_size: usize,
    /// Stop after this many consecutive generations without the best fitness
    /// improving by more than `stagnation_epsilon`.
    pub stagnation_patience: usize,
    pub stagnation_epsilon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMethod {
    Tournament,
    Roulette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverMethod {
    SinglePoint,
    Blend,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            num_generations: 50,
            mutation_rate: 0.1,
            mutation_scale: 0.2,
            crossover_rate: 0.8,
            crossover_method: CrossoverMethod::Blend,
            selection_method: SelectionMethod::Tournament,
            elitism_count: 2,
            tournament_size: 3,
            stagnation_patience: 10,
            stagnation_epsilon: 1e-6,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), PaperwingError> {
        if self.population_size == 0 {
            return Err(PaperwingError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.num_generations == 0 {
            return Err(PaperwingError::Configuration(
                "Generation limit must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(PaperwingError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if self.mutation_scale <= 0.0 || self.mutation_scale > 1.0 {
            return Err(PaperwingError::Configuration(
                "Mutation scale must be in (0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(PaperwingError::Configuration(
                "Crossover rate must be between 0 and 1".to_string(),
            ));
        }
        if self.elitism_count == 0 || self.elitism_count >= self.population_size {
            return Err(PaperwingError::Configuration(
                "Elitism count must be at least 1 and below the population size".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(PaperwingError::Configuration(
                "Tournament size must be positive".to_string(),
            ));
        }
        if self.stagnation_patience == 0 {
            return Err(PaperwingError::Configuration(
                "Stagnation patience must be positive".to_string(),
            ));
        }
        if !self.stagnation_epsilon.is_finite() || self.stagnation_epsilon < 0.0 {
            return Err(PaperwingError::Configuration(
                "Stagnation epsilon must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
