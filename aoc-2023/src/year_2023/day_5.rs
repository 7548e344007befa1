//! Day 5: If You Give A Seed A Fertilizer

use crate::utils::parse::numbers;
use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::Range;
use tracing::trace;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["2023", "intervals"])]
pub struct Solver;

/// `source..source+length` shifts onto `destination..destination+length`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapRange {
    pub destination: u64,
    pub source: u64,
    pub length: u64,
}

impl RemapRange {
    fn source_range(&self) -> Range<u64> {
        self.source..self.source + self.length
    }

    fn shift(&self, value: u64) -> u64 {
        self.destination + (value - self.source)
    }
}

/// One `x-to-y map:` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    pub name: String,
    pub ranges: Vec<RemapRange>,
}

impl RemapTable {
    /// Values inside an interval are shifted by the first interval holding
    /// them; everything else maps to itself.
    pub fn apply(&self, value: u64) -> u64 {
        self.ranges
            .iter()
            .find(|r| r.source_range().contains(&value))
            .map_or(value, |r| r.shift(value))
    }

    /// The same table read backwards, destination to source
    pub fn invert(&self) -> RemapTable {
        RemapTable {
            name: self.name.clone(),
            ranges: self
                .ranges
                .iter()
                .map(|r| RemapRange {
                    destination: r.source,
                    source: r.destination,
                    length: r.length,
                })
                .collect(),
        }
    }

    /// Image of a set of half-open intervals
    ///
    /// Each interval is split at the table's boundaries. The pieces covered
    /// by an interval are shifted, and the uncovered rest passes through.
    pub fn apply_ranges(&self, inputs: &[Range<u64>]) -> Vec<Range<u64>> {
        let mut mapped = Vec::new();
        let mut pending: Vec<Range<u64>> = inputs.iter().filter(|r| !r.is_empty()).cloned().collect();

        for remap in &self.ranges {
            let window = remap.source_range();
            let mut unmatched = Vec::new();
            for piece in pending {
                let lo = piece.start.max(window.start);
                let hi = piece.end.min(window.end);
                if lo >= hi {
                    unmatched.push(piece);
                    continue;
                }
                mapped.push(remap.shift(lo)..remap.shift(hi - 1) + 1);
                if piece.start < lo {
                    unmatched.push(piece.start..lo);
                }
                if hi < piece.end {
                    unmatched.push(hi..piece.end);
                }
            }
            pending = unmatched;
        }

        mapped.extend(pending);
        mapped
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    pub seeds: Vec<u64>,
    pub stages: Vec<RemapTable>,
}

impl Almanac {
    /// Push a seed through every stage
    pub fn location(&self, seed: u64) -> u64 {
        self.stages.iter().fold(seed, |value, table| table.apply(value))
    }

    /// Walk a location back through the inverted stages
    pub fn seed_for_location(&self, location: u64) -> u64 {
        self.stages
            .iter()
            .rev()
            .fold(location, |value, table| table.invert().apply(value))
    }

    /// Seeds read as `(start, length)` pairs
    pub fn seed_ranges(&self) -> Result<Vec<Range<u64>>, SolveError> {
        if self.seeds.len() % 2 != 0 {
            return Err(SolveError::AssumptionViolated(format!(
                "{} seed values do not form (start, length) pairs",
                self.seeds.len()
            )));
        }
        self.seeds
            .chunks_exact(2)
            .map(|pair| {
                pair[0]
                    .checked_add(pair[1])
                    .map(|end| pair[0]..end)
                    .ok_or_else(|| {
                        SolveError::AssumptionViolated(format!(
                            "seed range {} + {} overflows",
                            pair[0], pair[1]
                        ))
                    })
            })
            .collect()
    }

    /// Smallest location reachable from any of `seeds`
    pub fn closest_location(&self, seeds: &[Range<u64>]) -> Option<u64> {
        let locations = self.stages.iter().fold(seeds.to_vec(), |ranges, table| {
            let next = table.apply_ranges(&ranges);
            trace!(stage = %table.name, intervals = next.len(), "remapped");
            next
        });
        locations.iter().map(|r| r.start).min()
    }
}

fn parse_remap_range(line: &str) -> anyhow::Result<RemapRange> {
    let values: Vec<u64> = numbers(line)?;
    let [destination, source, length] = values[..] else {
        bail!("expected 'destination source length', got {:?}", line);
    };
    ensure!(
        source.checked_add(length).is_some() && destination.checked_add(length).is_some(),
        "interval {:?} overflows",
        line
    );
    Ok(RemapRange {
        destination,
        source,
        length,
    })
}

fn at_line(line_no: usize) -> impl FnOnce(anyhow::Error) -> ParseError {
    move |e| ParseError::line(line_no, format!("{:#}", e))
}

fn parse_almanac(input: &str) -> Result<Almanac, ParseError> {
    let mut lines = input.lines().enumerate().map(|(idx, line)| (idx + 1, line.trim()));

    let (seeds_no, first) = lines
        .by_ref()
        .find(|(_, line)| !line.is_empty())
        .ok_or_else(|| ParseError::MissingData("empty almanac".into()))?;
    let seeds = first
        .strip_prefix("seeds:")
        .context("expected 'seeds:'")
        .and_then(|rest| numbers(rest).context("seeds"))
        .map_err(at_line(seeds_no))?;

    let mut stages: Vec<RemapTable> = Vec::new();
    for (line_no, line) in lines {
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_suffix("map:") {
            stages.push(RemapTable {
                name: name.trim().to_string(),
                ranges: Vec::new(),
            });
            continue;
        }
        let table = stages
            .last_mut()
            .ok_or_else(|| ParseError::line(line_no, "interval before any map header"))?;
        let range = parse_remap_range(line).map_err(at_line(line_no))?;
        table.ranges.push(range);
    }

    Ok(Almanac { seeds, stages })
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_almanac(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Closest seed location";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .seeds
            .iter()
            .map(|&seed| shared.location(seed))
            .min()
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::AssumptionViolated("no seeds listed".into()))
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Closest location";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seeds = shared.seed_ranges()?;
        shared
            .closest_location(&seeds)
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::AssumptionViolated("every seed range is empty".into()))
    }
}
