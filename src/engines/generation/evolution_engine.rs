use crate::config::genes::GeneSpec;
use crate::config::{CrossoverMethod, EvolutionConfig, SelectionMethod};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::checkpoint::PopulationSnapshot;
use crate::engines::generation::genome::Genome;
use crate::engines::generation::operators::{
    blend_crossover, mutate, random_genome, roulette_selection, single_point_crossover,
    tournament_selection,
};
use crate::error::{PaperwingError, Result};
use crate::types::FitnessResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-generation fitness summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
    pub population_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    GenerationLimit,
    Stagnation,
}

/// Final result of an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub best_genome: Genome,
    pub best_fitness: f64,
    pub best_result: FitnessResult,
    pub history: Vec<GenerationSummary>,
    pub generations_run: usize,
    pub stop_reason: StopReason,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, summary: &GenerationSummary);
}

/// Generation loop over fold-design genomes.
///
/// Owns all run state; evaluations fan out over a rayon pool and are
/// collected in population order before any state is touched, so a seeded
/// run replays identically regardless of worker count.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    gene_spec: GeneSpec,
    evaluator: FitnessEvaluator,
    rng: StdRng,
    initial_population: Option<Vec<Genome>>,
    checkpoint: Option<(PathBuf, usize)>,
}

impl EvolutionEngine {
    /// Fails fast on invalid configuration, before any generation runs.
    pub fn new(
        config: EvolutionConfig,
        gene_spec: GeneSpec,
        evaluator: FitnessEvaluator,
    ) -> Result<Self> {
        use crate::config::traits::ConfigSection;
        config.validate()?;
        gene_spec.validate()?;
        if evaluator.conditions().is_empty() {
            return Err(PaperwingError::Configuration(
                "Condition set must not be empty".to_string(),
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            gene_spec,
            evaluator,
            rng,
            initial_population: None,
            checkpoint: None,
        })
    }

    /// Resume from a population snapshot instead of sampling fresh genomes.
    pub fn with_initial_population(mut self, mut genomes: Vec<Genome>) -> Result<Self> {
        if genomes.len() != self.config.population_size {
            return Err(PaperwingError::Configuration(format!(
                "Snapshot has {} genomes, configuration expects {}",
                genomes.len(),
                self.config.population_size
            )));
        }
        for genome in &mut genomes {
            if genome.len() != self.gene_spec.len() {
                return Err(PaperwingError::Configuration(format!(
                    "Snapshot genome has {} genes, gene table declares {}",
                    genome.len(),
                    self.gene_spec.len()
                )));
            }
            self.gene_spec.clamp(genome);
        }
        self.initial_population = Some(genomes);
        Ok(self)
    }

    /// Write a population snapshot every `every` generations.
    pub fn with_checkpoint(mut self, path: PathBuf, every: usize) -> Self {
        self.checkpoint = Some((path, every.max(1)));
        self
    }

    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> OptimizationOutcome {
        let mut population = match self.initial_population.take() {
            Some(genomes) => genomes,
            None => self.initialize_population(),
        };

        let mut best: Option<(Genome, FitnessResult)> = None;
        let mut history = Vec::with_capacity(self.config.num_generations);
        let mut stagnant_generations = 0;
        let mut stop_reason = StopReason::GenerationLimit;
        let mut generations_run = 0;

        for generation in 0..self.config.num_generations {
            callback.on_generation_start(generation);

            let evaluated = self.evaluate_population(&population);
            generations_run = generation + 1;

            let summary = summarize(generation, &evaluated);
            log::debug!(
                "generation {}: best {:.4}, mean {:.4}, worst {:.4}",
                generation + 1,
                summary.best,
                summary.mean,
                summary.worst
            );

            // Elitism keeps the champion alive, so best-ever fitness never drops.
            let gen_best = evaluated
                .iter()
                .max_by(|a, b| {
                    a.1.fitness
                        .partial_cmp(&b.1.fitness)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .expect("population is never empty");

            let improvement = match &best {
                Some((_, result)) => gen_best.1.fitness - result.fitness,
                None => f64::INFINITY,
            };
            if improvement > 0.0 {
                best = Some((gen_best.0.clone(), gen_best.1.clone()));
            }
            if improvement > self.config.stagnation_epsilon {
                stagnant_generations = 0;
            } else {
                stagnant_generations += 1;
            }

            history.push(summary);
            callback.on_generation_complete(generation, history.last().unwrap());

            self.maybe_checkpoint(generation, &population);

            if stagnant_generations >= self.config.stagnation_patience {
                log::info!(
                    "stopping after {} stagnant generations",
                    stagnant_generations
                );
                stop_reason = StopReason::Stagnation;
                break;
            }
            if generation == self.config.num_generations - 1 {
                break;
            }

            population = self.create_next_generation(&evaluated);
        }

        let (best_genome, best_result) =
            best.expect("at least one generation was evaluated");
        OptimizationOutcome {
            best_fitness: best_result.fitness,
            best_genome,
            best_result,
            history,
            generations_run,
            stop_reason,
        }
    }

    fn initialize_population(&mut self) -> Vec<Genome> {
        (0..self.config.population_size)
            .map(|_| random_genome(&self.gene_spec, &mut self.rng))
            .collect()
    }

    /// Evaluate every genome in parallel, keeping population order. The
    /// evaluator is deterministic and shares nothing mutable, so evaluation
    /// order cannot affect results.
    fn evaluate_population(&self, population: &[Genome]) -> Vec<(Genome, FitnessResult)> {
        population
            .par_iter()
            .map(|genome| (genome.clone(), self.evaluator.evaluate(genome)))
            .collect()
    }

    fn create_next_generation(
        &mut self,
        evaluated: &[(Genome, FitnessResult)],
    ) -> Vec<Genome> {
        let population_fitness: Vec<(Genome, f64)> = evaluated
            .iter()
            .map(|(g, r)| (g.clone(), r.fitness))
            .collect();

        let mut next_generation = Vec::with_capacity(self.config.population_size);

        // Elitism: copy top performers unchanged
        let mut sorted = population_fitness.clone();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        for (genome, _) in sorted.iter().take(self.config.elitism_count) {
            next_generation.push(genome.clone());
        }

        // Generate offspring
        while next_generation.len() < self.config.population_size {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let parent1 = self.select(&population_fitness);
                let parent2 = self.select(&population_fitness);

                let (mut child1, mut child2) = match self.config.crossover_method {
                    CrossoverMethod::SinglePoint => {
                        single_point_crossover(&parent1, &parent2, &mut self.rng)
                    }
                    CrossoverMethod::Blend => blend_crossover(&parent1, &parent2, &mut self.rng),
                };

                self.mutate_child(&mut child1);
                self.mutate_child(&mut child2);

                next_generation.push(child1);
                if next_generation.len() < self.config.population_size {
                    next_generation.push(child2);
                }
            } else {
                // Reproduction (copy)
                let mut child = self.select(&population_fitness);
                self.mutate_child(&mut child);
                next_generation.push(child);
            }
        }

        next_generation.truncate(self.config.population_size);
        next_generation
    }

    fn select(&mut self, population_fitness: &[(Genome, f64)]) -> Genome {
        match self.config.selection_method {
            SelectionMethod::Tournament => tournament_selection(
                population_fitness,
                self.config.tournament_size,
                &mut self.rng,
            ),
            SelectionMethod::Roulette => roulette_selection(population_fitness, &mut self.rng),
        }
    }

    fn mutate_child(&mut self, child: &mut Genome) {
        mutate(
            child,
            self.config.mutation_rate,
            self.config.mutation_scale,
            &self.gene_spec,
            &mut self.rng,
        );
    }

    fn maybe_checkpoint(&self, generation: usize, population: &[Genome]) {
        let Some((path, every)) = &self.checkpoint else {
            return;
        };
        if (generation + 1) % every != 0 {
            return;
        }
        let snapshot = PopulationSnapshot::new(generation, population.to_vec());
        if let Err(e) = snapshot.save(path) {
            // A failed checkpoint must not abort the run.
            log::warn!("checkpoint write failed: {}", e);
        }
    }
}

fn summarize(generation: usize, evaluated: &[(Genome, FitnessResult)]) -> GenerationSummary {
    let fitnesses: Vec<f64> = evaluated.iter().map(|(_, r)| r.fitness).collect();
    let best = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let worst = fitnesses.iter().cloned().fold(f64::INFINITY, f64::min);
    let mean = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;
    GenerationSummary {
        generation,
        best,
        mean,
        worst,
        population_size: evaluated.len(),
    }
}
