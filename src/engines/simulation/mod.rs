pub mod aerodynamics;
pub mod flight;

pub use aerodynamics::{AeroCoefficients, AeroModel, ThinAirfoil};
pub use flight::FlightSimulator;
