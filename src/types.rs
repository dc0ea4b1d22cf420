use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Add, Mul, Neg, Sub};

/// 3D vector used for positions, velocities, forces and wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Magnitude of the horizontal (x, y) component.
    pub fn horizontal_norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scale(&self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, k: f64) -> Vec3 {
        self.scale(k)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// One integration step of a simulated flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Angle of attack in radians.
    pub alpha: f64,
    pub lift: f64,
    pub drag: f64,
}

/// How a simulated flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Altitude reached zero within the time limit.
    Landed,
    /// Maximum flight duration elapsed; partial trajectory is still valid.
    Timeout,
    /// Integration diverged (speed bound or non-finite state) and was cut short.
    Unstable,
}

/// Full result of simulating one geometry under one flight condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOutcome {
    pub samples: Vec<TrajectorySample>,
    pub termination: Termination,
}

impl FlightOutcome {
    pub fn is_unstable(&self) -> bool {
        self.termination == Termination::Unstable
    }

    pub fn final_sample(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }
}

/// Metrics extracted for a single flight condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionMetrics {
    pub condition: String,
    pub metrics: HashMap<String, f64>,
    pub unstable: bool,
}

/// Scalar fitness plus the per-condition metrics it was aggregated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessResult {
    pub fitness: f64,
    pub per_condition: Vec<ConditionMetrics>,
    /// Set when the genome decoded to a degenerate shape and the fitness
    /// floor was applied instead of simulating.
    pub degenerate: bool,
}

impl FitnessResult {
    pub fn floor(fitness: f64) -> Self {
        Self {
            fitness,
            per_condition: Vec::new(),
            degenerate: true,
        }
    }
}
