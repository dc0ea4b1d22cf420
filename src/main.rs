use anyhow::Context;
use paperwing::config::ConfigManager;
use paperwing::engines::evaluation::FitnessEvaluator;
use paperwing::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use paperwing::report::RunReport;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Usage: paperwing [config.toml] [output_dir]
    let args: Vec<String> = std::env::args().collect();
    let manager = ConfigManager::new();
    if let Some(path) = args.get(1) {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading config from {}", path))?;
    }
    let output_dir = args.get(2).map(String::as_str).unwrap_or("results");
    std::fs::create_dir_all(output_dir)?;

    let config = manager.get();

    println!("paperwing - paper airfoil fold optimizer");
    println!(
        "population {}, up to {} generations, {} conditions",
        config.evolution.population_size,
        config.evolution.num_generations,
        config.conditions.conditions.len()
    );

    let evaluator = FitnessEvaluator::new(
        config.simulation.clone(),
        config.fitness.clone(),
        config.conditions.conditions.clone(),
    );
    let mut engine =
        EvolutionEngine::new(config.evolution.clone(), config.genes.clone(), evaluator)?
            .with_checkpoint(Path::new(output_dir).join("population_snapshot.json"), 10);

    let mut callback = ConsoleProgressCallback;
    let outcome = engine.run(&mut callback);

    println!();
    println!("Best fitness: {:.3} ({:?} after {} generations)",
        outcome.best_fitness, outcome.stop_reason, outcome.generations_run
    );
    println!("Key parameters:");
    for (range, gene) in config.genes.ranges.iter().zip(&outcome.best_genome) {
        println!("  - {}: {:.2}", range.name, gene);
    }
    println!("Performance by condition:");
    for condition in &outcome.best_result.per_condition {
        println!("  - {}:", condition.condition);
        println!("      distance: {:.2} m", condition.metrics["range_m"]);
        println!("      duration: {:.2} s", condition.metrics["duration_s"]);
        println!("      stability: {:.3}", condition.metrics["stability"]);
        println!(
            "      success: {}",
            if condition.metrics["success"] > 0.0 { "yes" } else { "no" }
        );
    }

    let report = RunReport::assemble(&outcome, engine.evaluator())?;
    let report_path = Path::new(output_dir).join("optimization_report.json");
    report.save_to_file(&report_path)?;
    println!();
    println!("Report written to {}", report_path.display());

    Ok(())
}
