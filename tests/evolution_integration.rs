use paperwing::config::genes::GeneSpec;
use paperwing::config::{ConditionsConfig, EvolutionConfig, FitnessConfig, SimulationConfig};
use paperwing::engines::evaluation::FitnessEvaluator;
use paperwing::engines::generation::{
    EvolutionEngine, GenerationSummary, ProgressCallback, SilentProgressCallback,
};
use paperwing::PaperwingError;

/// Records per-generation summaries for invariant checks
struct RecordingCallback {
    summaries: Vec<GenerationSummary>,
}

impl ProgressCallback for RecordingCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, summary: &GenerationSummary) {
        println!(
            "Generation {}: Best = {:.4}, Mean = {:.4}, Worst = {:.4}",
            generation + 1,
            summary.best,
            summary.mean,
            summary.worst
        );
        self.summaries.push(summary.clone());
    }
}

/// Create a small evolution config for fast testing
fn create_test_evolution_config() -> EvolutionConfig {
    EvolutionConfig {
        population_size: 20,
        num_generations: 8,
        seed: Some(42),
        ..EvolutionConfig::default()
    }
}

fn create_test_evaluator() -> FitnessEvaluator {
    let mut simulation = SimulationConfig::default();
    // Coarser integration keeps the test suite quick.
    simulation.time_step = 0.02;
    simulation.max_duration = 8.0;
    FitnessEvaluator::new(
        simulation,
        FitnessConfig::balanced(),
        ConditionsConfig::default().conditions,
    )
}

fn run_once(config: EvolutionConfig) -> (Vec<GenerationSummary>, paperwing::engines::generation::OptimizationOutcome) {
    let mut engine =
        EvolutionEngine::new(config, GeneSpec::default(), create_test_evaluator()).unwrap();
    let mut callback = RecordingCallback {
        summaries: Vec::new(),
    };
    let outcome = engine.run(&mut callback);
    (callback.summaries, outcome)
}

#[test]
fn test_evolution_basic() {
    let (summaries, outcome) = run_once(create_test_evolution_config());

    assert!(!summaries.is_empty(), "Should have run at least one generation");
    assert_eq!(summaries.len(), outcome.history.len());
    assert_eq!(outcome.best_genome.len(), GeneSpec::default().len());
    assert!(
        outcome.best_fitness > FitnessConfig::balanced().degenerate_floor,
        "A 20x8 search should find at least one flyable design"
    );
}

#[test]
fn test_population_size_constant_across_generations() {
    let config = create_test_evolution_config();
    let expected = config.population_size;
    let (summaries, _) = run_once(config);

    for summary in &summaries {
        assert_eq!(summary.population_size, expected);
    }
}

#[test]
fn test_best_fitness_is_monotonically_non_decreasing() {
    let (summaries, outcome) = run_once(create_test_evolution_config());

    // Elitism carries the champion forward unchanged and evaluation is
    // deterministic, so the per-generation best never drops.
    for pair in summaries.windows(2) {
        assert!(
            pair[1].best >= pair[0].best,
            "best fitness dropped from {} to {}",
            pair[0].best,
            pair[1].best
        );
    }
    let final_best = summaries.iter().map(|s| s.best).fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(outcome.best_fitness, final_best);
}

#[test]
fn test_same_seed_reproduces_identical_history() {
    let (_, first) = run_once(create_test_evolution_config());
    let (_, second) = run_once(create_test_evolution_config());

    assert_eq!(first.generations_run, second.generations_run);
    assert_eq!(first.best_fitness, second.best_fitness);
    assert_eq!(first.best_genome, second.best_genome);
    assert_eq!(first.history.len(), second.history.len());
    for (a, b) in first.history.iter().zip(&second.history) {
        assert_eq!(a.best, b.best);
        assert_eq!(a.mean, b.mean);
        assert_eq!(a.worst, b.worst);
    }
}

#[test]
fn test_stagnation_stops_the_run_early() {
    let config = EvolutionConfig {
        population_size: 10,
        num_generations: 50,
        // An epsilon this large means no generation ever counts as progress.
        stagnation_epsilon: 1e9,
        stagnation_patience: 3,
        seed: Some(7),
        ..EvolutionConfig::default()
    };
    let (_, outcome) = run_once(config);

    assert_eq!(
        outcome.stop_reason,
        paperwing::engines::generation::StopReason::Stagnation
    );
    assert!(outcome.generations_run < 50);
}

#[test]
fn test_zero_population_is_a_configuration_error() {
    let config = EvolutionConfig {
        population_size: 0,
        ..EvolutionConfig::default()
    };
    let result = EvolutionEngine::new(config, GeneSpec::default(), create_test_evaluator());
    assert!(matches!(result, Err(PaperwingError::Configuration(_))));
}

#[test]
fn test_empty_condition_set_is_a_configuration_error() {
    let evaluator = FitnessEvaluator::new(
        SimulationConfig::default(),
        FitnessConfig::balanced(),
        Vec::new(),
    );
    let result = EvolutionEngine::new(create_test_evolution_config(), GeneSpec::default(), evaluator);
    assert!(matches!(result, Err(PaperwingError::Configuration(_))));
}

#[test]
fn test_resume_from_snapshot_keeps_population_size() {
    let config = EvolutionConfig {
        population_size: 6,
        num_generations: 3,
        seed: Some(11),
        ..EvolutionConfig::default()
    };
    let spec = GeneSpec::default();
    let genomes: Vec<Vec<f64>> = {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        let mut rng = StdRng::seed_from_u64(1);
        (0..6).map(|_| spec.sample_uniform(&mut rng)).collect()
    };

    let mut engine = EvolutionEngine::new(config, spec, create_test_evaluator())
        .unwrap()
        .with_initial_population(genomes)
        .unwrap();
    let outcome = engine.run(&mut SilentProgressCallback);
    for summary in &outcome.history {
        assert_eq!(summary.population_size, 6);
    }
}

#[test]
fn test_snapshot_size_mismatch_is_rejected() {
    let config = EvolutionConfig {
        population_size: 6,
        ..EvolutionConfig::default()
    };
    let spec = GeneSpec::default();
    let genomes = vec![vec![0.0; spec.len()]; 3];

    let result = EvolutionEngine::new(config, spec, create_test_evaluator())
        .unwrap()
        .with_initial_population(genomes);
    assert!(matches!(result, Err(PaperwingError::Configuration(_))));
}
