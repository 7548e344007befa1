//! Day 14: Parabolic Reflector Dish
//!
//! A spin cycle is four rounds of "tilt north, rotate clockwise". Part 2
//! repeats spin cycles until a platform layout comes back, then jumps
//! ahead by whole periods.

use crate::utils::grid::Grid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["2023", "grid", "cycles"])]
pub struct Solver;

const ROUND: u8 = b'O';
const EMPTY: u8 = b'.';
const SPIN_CYCLES: usize = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    rows: Vec<Vec<u8>>,
}

impl Platform {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let grid = Grid::new(input);
        if let Some((row, col, b)) = grid.cells().find(|(_, _, b)| !b"O#.".contains(b)) {
            return Err(ParseError::line(
                row + 1,
                format!("unknown cell {:?} in column {}", b as char, col + 1),
            ));
        }
        let rows: Vec<Vec<u8>> = grid.rows().iter().map(|row| row.to_vec()).collect();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(ParseError::MissingData("empty platform".into()));
        }
        if let Some(idx) = rows.iter().position(|row| row.len() != width) {
            return Err(ParseError::line(
                idx + 1,
                format!("width {} on a platform of width {}", rows[idx].len(), width),
            ));
        }
        Ok(Self { rows })
    }

    /// Roll every round rock as far north as it goes
    pub fn tilt_north(&mut self) {
        let width = self.rows[0].len();
        for col in 0..width {
            let mut free = 0;
            for row in 0..self.rows.len() {
                match self.rows[row][col] {
                    ROUND => {
                        self.rows[row][col] = EMPTY;
                        self.rows[free][col] = ROUND;
                        free += 1;
                    }
                    EMPTY => {}
                    _ => free = row + 1,
                }
            }
        }
    }

    fn rotate_clockwise(&mut self) {
        let height = self.rows.len();
        let width = self.rows[0].len();
        self.rows = (0..width)
            .map(|col| (0..height).rev().map(|row| self.rows[row][col]).collect())
            .collect();
    }

    /// Tilt north, west, south, then east
    pub fn spin_cycle(&mut self) {
        for _ in 0..4 {
            self.tilt_north();
            self.rotate_clockwise();
        }
    }

    /// Each round rock weighs the number of rows from it to the south edge
    pub fn north_load(&self) -> usize {
        let height = self.rows.len();
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| (height - row) * cells.iter().filter(|&&c| c == ROUND).count())
            .sum()
    }

    /// Load after `cycles` spin cycles, skipping whole periods once a layout repeats
    pub fn load_after(&self, cycles: usize) -> usize {
        let mut platform = self.clone();
        let mut seen: HashMap<Platform, usize> = HashMap::new();
        let mut loads = Vec::new();
        for done in 0..cycles {
            if let Some(&first) = seen.get(&platform) {
                let period = done - first;
                debug!(first, period, "platform layout repeats");
                return loads[first + (cycles - first) % period];
            }
            loads.push(platform.north_load());
            seen.insert(platform.clone(), done);
            platform.spin_cycle();
        }
        platform.north_load()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Platform;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Platform::parse(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Load on the north beams";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut platform = shared.clone();
        platform.tilt_north();
        Ok(platform.north_load().to_string())
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Load after a billion spin cycles";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.load_after(SPIN_CYCLES).to_string())
    }
}
