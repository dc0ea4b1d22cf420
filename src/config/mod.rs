pub mod traits;
pub mod genes;
pub mod evolution;
pub mod simulation;
pub mod fitness;
pub mod conditions;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use genes::{GeneRange, GeneSpec, GENE_COUNT, HINGE_COUNT};
pub use evolution::{CrossoverMethod, EvolutionConfig, SelectionMethod};
pub use simulation::SimulationConfig;
pub use fitness::FitnessConfig;
pub use conditions::{ConditionsConfig, FlightCondition};
