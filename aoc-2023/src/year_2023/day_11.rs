//! Day 11: Cosmic Expansion

use crate::utils::grid::Grid;
use crate::utils::math::overflow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["2023", "grid", "math"])]
pub struct Solver;

/// Galaxy positions; rows and columns are measured independently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Universe {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let grid = Grid::new(input);
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        for (row, col, b) in grid.cells() {
            match b {
                b'#' => {
                    rows.push(row);
                    cols.push(col);
                }
                b'.' => {}
                _ => {
                    return Err(ParseError::line(
                        row + 1,
                        format!("unknown cell {:?} in column {}", b as char, col + 1),
                    ));
                }
            }
        }
        if rows.is_empty() {
            return Err(ParseError::MissingData("no galaxies".into()));
        }
        Ok(Self { rows, cols })
    }

    pub fn galaxies(&self) -> usize {
        self.rows.len()
    }

    /// Sum of the distances between every pair of galaxies when each empty
    /// row and column is replaced by `factor` of them
    ///
    /// `None` if `factor` is zero or the sum leaves `u64`.
    pub fn distance_sum(&self, factor: u64) -> Option<u64> {
        let rows = expand(&self.rows, factor)?;
        let cols = expand(&self.cols, factor)?;
        pairwise_distance_sum(rows)?.checked_add(pairwise_distance_sum(cols)?)
    }
}

/// Coordinates after every unoccupied index below them grows to `factor`
fn expand(coords: &[usize], factor: u64) -> Option<Vec<u64>> {
    let extent = coords.iter().max().map_or(0, |&c| c + 1);
    let mut occupied = vec![false; extent];
    for &c in coords {
        occupied[c] = true;
    }
    let empty_before: Vec<u64> = occupied
        .iter()
        .scan(0u64, |empty, &taken| {
            let before = *empty;
            *empty += u64::from(!taken);
            Some(before)
        })
        .collect();
    let growth = factor.checked_sub(1)?;
    coords
        .iter()
        .map(|&c| growth.checked_mul(empty_before[c])?.checked_add(c as u64))
        .collect()
}

/// Sum of `|a - b|` over all pairs, `None` on overflow
fn pairwise_distance_sum(mut coords: Vec<u64>) -> Option<u64> {
    coords.sort_unstable();
    let mut below = 0u64;
    let mut total = 0u64;
    for (count, &c) in (0u64..).zip(&coords) {
        // every earlier coordinate is <= c
        let gap = c.checked_mul(count)?.checked_sub(below)?;
        total = total.checked_add(gap)?;
        below = below.checked_add(c)?;
    }
    Some(total)
}

fn solve_with(universe: &Universe, factor: u64) -> Result<String, SolveError> {
    universe
        .distance_sum(factor)
        .map(|sum| sum.to_string())
        .ok_or_else(|| overflow("sum of galaxy distances"))
}

impl AocParser for Solver {
    type SharedData<'a> = Universe;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Universe::parse(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Sum of shortest paths";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, 2)
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Sum of shortest paths";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, 1_000_000)
    }
}
