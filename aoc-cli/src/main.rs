//! `aoc`: run the registered Advent of Code solvers against local inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod logging;
mod output;

// Linked for its inventory submissions
use aoc_2023 as _;

use aggregator::ResultAggregator;
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, SolverResult, WorkItem};
use output::OutputFormatter;
use std::sync::mpsc;
use tracing::{debug, warn};

fn main() {
    let args = Args::parse();
    logging::init();

    if let Err(e) = run(Config::from_args(args)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), CliError> {
    let registry = build_registry(&config.tags)?;
    debug!(solvers = registry.storage().len(), "registry built");

    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;
    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }
    warn_missing_inputs(&executor, &work_items);

    let formatter = OutputFormatter::new(config.quiet);
    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let mut aggregator = ResultAggregator::for_work(&work_items);
    let total = aggregator.outstanding();
    let results = execute_in_order(executor, &mut aggregator, &formatter)?;

    let summary = formatter.print_summary(&results);
    match total - summary.solved {
        0 => Ok(()),
        failed => Err(CliError::Failed { failed, total }),
    }
}

/// Solvers still run without an input; their parts fail individually
fn warn_missing_inputs(executor: &Executor, work_items: &[WorkItem]) {
    let inputs = executor.inputs();
    for work in work_items.iter().filter(|w| !inputs.contains(w.year, w.day)) {
        warn!(
            path = %inputs.input_path(work.year, work.day).display(),
            "missing input for {}/{:02}",
            work.year,
            work.day
        );
    }
}

/// Run the executor on its own thread and print results as their turn comes
fn execute_in_order(
    executor: Executor,
    aggregator: &mut ResultAggregator,
    formatter: &OutputFormatter,
) -> Result<Vec<SolverResult>, CliError> {
    let (tx, rx) = mpsc::channel();
    let worker = std::thread::spawn(move || executor.execute(tx));

    let mut printed = Vec::new();
    let mut emit = |batch: Vec<SolverResult>| {
        for result in batch {
            formatter.print_result(&result);
            printed.push(result);
        }
    };
    for result in rx {
        emit(aggregator.add(result));
    }
    emit(aggregator.drain());

    for key in aggregator.missing() {
        warn!(year = key.year, day = key.day, part = key.part, "no result received");
    }

    worker
        .join()
        .map_err(|_| CliError::Config("executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;
    Ok(printed)
}

/// Plugins whose tags include every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new().register_solver_plugins(|plugin| {
        tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
    })?;
    Ok(builder.build())
}
