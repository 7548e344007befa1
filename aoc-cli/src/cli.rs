//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Puzzle input file for the selected day
    #[arg(long, requires = "day")]
    pub input: Option<PathBuf>,

    /// Directory holding `day_<d>/input.txt` for each day
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output labelled answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.input_dir, PathBuf::from("."));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.input.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn test_input_requires_day() {
        assert!(Args::try_parse_from(["aoc", "--input", "in.txt"]).is_err());
        let args = Args::try_parse_from(["aoc", "-d", "8", "--input", "in.txt"]).unwrap();
        assert_eq!(args.day, Some(8));
        assert_eq!(args.input, Some(PathBuf::from("in.txt")));
    }

    #[test]
    fn test_ranges_and_tags() {
        assert!(Args::try_parse_from(["aoc", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "-p", "3"]).is_err());
        let args = Args::try_parse_from(["aoc", "-t", "2023,graph"]).unwrap();
        assert_eq!(args.tags, vec!["2023", "graph"]);
    }
}
