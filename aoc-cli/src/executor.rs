//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DEFAULT_LABEL, DynSolver, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{info, warn};

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    /// What the answer measures
    pub label: &'static str,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    /// A part that never reached its solver
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            label: DEFAULT_LABEL,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(&config.input_dir, config.input_file.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0, // Empty range - intentional
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Day and Part both parallelize across work items; Part also splits the parts
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, sync_executor_config).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

fn send_result(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
}

/// Send the same failure for every requested part
fn send_failures(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send_result(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

/// Load the input once and solve the work item's parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match sync_executor_config.inputs.load(year, day) {
        Ok(input) => input,
        Err(source) => {
            warn!(year, day, error = %source, "input unavailable");
            let error = ExecutorError::Input { year, day, source }.into();
            return send_failures(work, tx, error);
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_parts_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

/// Solve each part on its own parsed instance, emitting results in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(year, day, part, &mut *solver),
            Err(e) => SolverResult::failed(year, day, part, ExecutorError::Solver(e).into()),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    results
        .into_iter()
        .try_for_each(|result| send_result(tx, result))
}

/// Parse once and solve the parts in order, streaming each as it finishes
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            warn!(year, day, error = %e, "failed to parse input");
            return send_failures(work, tx, ExecutorError::Solver(e).into());
        }
    };

    for part in work.parts.clone() {
        send_result(tx, solve_part(year, day, part, &mut *solver))?;
    }
    Ok(())
}

/// Solve a single part, recording parse and solve time
fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    let label = solver.label(part);

    match solver.solve(part) {
        Ok(solved) => {
            info!(year, day, part, answer = %solved.answer, "solved");
            SolverResult {
                year,
                day,
                part,
                label: solved.label,
                solve_duration: solved.duration(),
                answer: Ok(solved.answer),
                parse_duration,
            }
        }
        Err(e) => SolverResult {
            year,
            day,
            part,
            label,
            answer: Err(ExecutorError::Solver(SolverError::SolveError(e)).into()),
            solve_duration: TimeDelta::zero(),
            parse_duration,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{
        AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
    };
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct LineCount;

    impl AocParser for LineCount {
        type SharedData<'a> = Vec<&'a str>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            if input.trim().is_empty() {
                return Err(ParseError::MissingData("empty".into()));
            }
            Ok(input.lines().collect())
        }
    }

    impl PartSolver<1> for LineCount {
        const LABEL: &'static str = "Lines";

        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.len().to_string())
        }
    }

    impl PartSolver<2> for LineCount {
        fn solve(_: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Err(SolveError::AssumptionViolated("always".into()))
        }
    }

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register::<LineCount>(2023, 1)
            .unwrap()
            .register::<LineCount>(2023, 2)
            .unwrap()
            .build();
        let dir_arg = dir.path().to_string_lossy().to_string();
        let mut argv = vec!["aoc", "--input-dir", dir_arg.as_str()];
        argv.extend_from_slice(extra);
        let config = Config::from_args(Args::parse_from(argv));
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    fn write_input(dir: &TempDir, day: u8, content: &str) {
        let day_dir = dir.path().join(format!("day_{}", day));
        fs::create_dir_all(&day_dir).unwrap();
        fs::write(day_dir.join("input.txt"), content).unwrap();
    }

    #[test]
    fn test_collect_work_items_filters() {
        let dir = TempDir::new().unwrap();
        assert_eq!(executor(&dir, &[]).collect_work_items().len(), 2);

        let items = executor(&dir, &["-d", "2", "-p", "1"]).collect_work_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].day, 2);
        assert_eq!(items[0].parts, 1..=1);

        assert!(executor(&dir, &["-y", "2022"]).collect_work_items().is_empty());
    }

    #[test]
    fn test_results_carry_labels_and_errors() {
        for mode in ["sequential", "year", "day", "part"] {
            let dir = TempDir::new().unwrap();
            write_input(&dir, 1, "a\nb\nc\n");
            let results = run(&executor(&dir, &["--parallelize-by", mode]));
            assert_eq!(results.len(), 4, "mode {}", mode);

            let first = &results[0];
            assert_eq!(first.label, "Lines");
            assert_eq!(first.answer.as_ref().unwrap(), "3");
            assert!(first.parse_duration.is_some());

            let second = &results[1];
            assert_eq!(second.label, DEFAULT_LABEL);
            assert!(second.answer.as_ref().unwrap_err().to_string().contains("always"));

            // day 2 has no input file
            assert!(results[2..].iter().all(|r| r.answer.is_err()));
        }
    }

    #[test]
    fn test_parse_failure_reported_per_part() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 1, "\n");
        let results = run(&executor(&dir, &["-d", "1"]));
        assert_eq!(results.len(), 2);
        for result in &results {
            let err = result.answer.as_ref().unwrap_err().to_string();
            assert!(err.contains("missing data"), "{}", err);
        }
    }

    #[test]
    fn test_explicit_input_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("mine.txt");
        fs::write(&file, "x\ny\n").unwrap();
        let file_arg = file.to_string_lossy().to_string();
        let results = run(&executor(&dir, &["-d", "2", "-p", "1", "--input", file_arg.as_str()]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].answer.as_ref().unwrap(), "2");
    }
}
