pub mod flight;
pub mod stability;
pub mod engine;

pub use flight::FlightPerformance;
pub use stability::StabilityMetrics;
pub use engine::MetricsEngine;
