pub mod genome;
pub mod operators;
pub mod evolution_engine;
pub mod progress;
pub mod checkpoint;

pub use genome::Genome;
pub use evolution_engine::{
    EvolutionEngine, GenerationSummary, OptimizationOutcome, ProgressCallback, StopReason,
};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, SilentProgressCallback};
pub use checkpoint::PopulationSnapshot;
