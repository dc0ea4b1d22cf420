use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{GenerationSummary, OptimizationOutcome, StopReason};
use crate::engines::geometry::FoldGeometry;
use crate::error::Result;
use crate::types::TrajectorySample;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Trajectory and metrics for the best design under one condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionReport {
    pub condition: String,
    pub metrics: HashMap<String, f64>,
    pub unstable: bool,
    pub samples: Vec<TrajectorySample>,
}

/// Everything external reporting and visualization consume from a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: String,
    pub best_genome: Vec<f64>,
    pub best_fitness: f64,
    /// Absent when the run never found a non-degenerate design.
    pub geometry: Option<FoldGeometry>,
    pub stop_reason: StopReason,
    pub generations_run: usize,
    pub history: Vec<GenerationSummary>,
    pub per_condition: Vec<ConditionReport>,
}

impl RunReport {
    pub fn assemble(
        outcome: &OptimizationOutcome,
        evaluator: &FitnessEvaluator,
    ) -> Result<Self> {
        let (geometry, per_condition) = if outcome.best_result.degenerate {
            (None, Vec::new())
        } else {
            let geometry = evaluator.decode(&outcome.best_genome)?;
            let trajectories = evaluator.trajectories(&outcome.best_genome)?;
            let reports = trajectories
                .into_iter()
                .zip(&outcome.best_result.per_condition)
                .map(|((condition, flight), condition_metrics)| ConditionReport {
                    condition: condition.name,
                    metrics: condition_metrics.metrics.clone(),
                    unstable: condition_metrics.unstable,
                    samples: flight.samples,
                })
                .collect();
            (Some(geometry), reports)
        };

        Ok(Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            best_genome: outcome.best_genome.clone(),
            best_fitness: outcome.best_fitness,
            geometry,
            stop_reason: outcome.stop_reason,
            generations_run: outcome.generations_run,
            history: outcome.history.clone(),
            per_condition,
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
