use crate::config::{FitnessConfig, FlightCondition, SimulationConfig};
use crate::engines::generation::Genome;
use crate::engines::geometry::{FoldGeometry, GeometryDecoder};
use crate::engines::metrics::MetricsEngine;
use crate::engines::simulation::FlightSimulator;
use crate::error::Result;
use crate::types::{ConditionMetrics, FitnessResult, FlightOutcome};

/// Scores one genome across the configured condition set.
///
/// Deterministic and side-effect-free: the same genome and condition set
/// always produce the same [`FitnessResult`], so evaluations can fan out
/// across worker threads and re-runs reproduce exactly. Degenerate
/// geometries never surface as errors; they are folded into the configured
/// fitness floor so the optimizer's fitness function stays total.
pub struct FitnessEvaluator {
    decoder: GeometryDecoder,
    simulator: FlightSimulator,
    metrics: MetricsEngine,
    conditions: Vec<FlightCondition>,
    weights: FitnessConfig,
}

impl FitnessEvaluator {
    pub fn new(
        simulation: SimulationConfig,
        weights: FitnessConfig,
        conditions: Vec<FlightCondition>,
    ) -> Self {
        Self {
            decoder: GeometryDecoder::new(simulation.paper_density_gsm),
            simulator: FlightSimulator::new(simulation),
            metrics: MetricsEngine::default(),
            conditions,
            weights,
        }
    }

    pub fn conditions(&self) -> &[FlightCondition] {
        &self.conditions
    }

    pub fn decode(&self, genome: &Genome) -> Result<FoldGeometry> {
        self.decoder.decode(genome)
    }

    pub fn evaluate(&self, genome: &Genome) -> FitnessResult {
        // Decode once; the geometry is reused for every condition.
        let geometry = match self.decoder.decode(genome) {
            Ok(geometry) => geometry,
            Err(e) => {
                log::debug!("degenerate genome floored: {}", e);
                return FitnessResult::floor(self.weights.degenerate_floor);
            }
        };

        let mut per_condition = Vec::with_capacity(self.conditions.len());
        let mut total = 0.0;

        for condition in &self.conditions {
            let outcome = self.simulator.simulate(&geometry, condition);
            let unstable = outcome.is_unstable();
            let metrics = self.metrics.calculate_all(&outcome, condition);

            let mut score = self.weights.weight_range * metrics["range_m"]
                + self.weights.weight_duration * metrics["duration_s"]
                + self.weights.weight_stability * metrics["stability"]
                + self.weights.weight_landing * metrics["landing_quality"];
            if unstable {
                score -= self.weights.instability_penalty;
            }
            total += score;

            per_condition.push(ConditionMetrics {
                condition: condition.name.clone(),
                metrics,
                unstable,
            });
        }

        FitnessResult {
            fitness: total / self.conditions.len() as f64,
            per_condition,
            degenerate: false,
        }
    }

    /// Trajectories for every condition, for reporting and visualization.
    /// Unlike [`evaluate`](Self::evaluate) this propagates a degenerate
    /// decode, since there is nothing to plot for it.
    pub fn trajectories(&self, genome: &Genome) -> Result<Vec<(FlightCondition, FlightOutcome)>> {
        let geometry = self.decoder.decode(genome)?;
        Ok(self
            .conditions
            .iter()
            .map(|c| (c.clone(), self.simulator.simulate(&geometry, c)))
            .collect())
    }
}
