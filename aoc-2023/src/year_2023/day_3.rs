//! Day 3: Gear Ratios

use crate::utils::grid::{Grid, Span};
use crate::utils::math::{checked_sum, overflow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["2023", "grid"])]
pub struct Solver;

const GEAR: u8 = b'*';

/// A numeral token in the schematic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub value: u64,
    pub span: Span,
}

pub struct Schematic<'a> {
    grid: Grid<'a>,
    tokens: Vec<Token>,
}

/// Anything but a digit or `.`
pub fn is_symbol(b: u8) -> bool {
    !b.is_ascii_digit() && b != b'.'
}

impl<'a> Schematic<'a> {
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        let grid = Grid::new(input);
        let tokens = grid
            .runs(|b| b.is_ascii_digit())
            .into_iter()
            .map(|span| {
                let digits = grid.slice(span);
                std::str::from_utf8(digits)
                    .ok()
                    .and_then(|text| text.parse().ok())
                    .map(|value| Token { value, span })
                    .ok_or_else(|| {
                        ParseError::line(
                            span.row + 1,
                            format!("number at column {} does not fit in 64 bits", span.start + 1),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { grid, tokens })
    }

    /// Tokens with a symbol anywhere in their 8-neighbourhood
    pub fn part_numbers(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|token| {
            self.grid
                .around(token.span)
                .any(|(_, _, b)| is_symbol(b))
        })
    }

    /// Every `*` with the values of the tokens touching it, in reading order
    pub fn gear_candidates(&self) -> Vec<((usize, usize), Vec<u64>)> {
        let mut touching: HashMap<(usize, usize), Vec<u64>> = HashMap::new();
        for token in &self.tokens {
            for (row, col, b) in self.grid.around(token.span) {
                if b == GEAR {
                    touching.entry((row, col)).or_default().push(token.value);
                }
            }
        }
        let mut gears: Vec<_> = touching.into_iter().collect();
        gears.sort_unstable_by_key(|(pos, _)| *pos);
        gears
    }

    /// Sum of products of the `*`s touching exactly two numbers
    ///
    /// A `*` touching more than two numbers is outside what the puzzle allows.
    pub fn gear_ratio_sum(&self) -> Result<u64, SolveError> {
        let mut sum = 0u64;
        for ((row, col), values) in self.gear_candidates() {
            match values.as_slice() {
                [a, b] => {
                    sum = a
                        .checked_mul(*b)
                        .and_then(|ratio| sum.checked_add(ratio))
                        .ok_or_else(|| overflow("sum of gear ratios"))?;
                }
                [_] => {}
                _ => {
                    return Err(SolveError::AssumptionViolated(format!(
                        "gear at line {} column {} touches {} numbers",
                        row + 1,
                        col + 1,
                        values.len()
                    )));
                }
            }
        }
        Ok(sum)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Schematic::new(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Sum of part numbers";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        checked_sum(shared.part_numbers().map(|token| token.value))
            .map(|sum| sum.to_string())
            .ok_or_else(|| overflow("sum of part numbers"))
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Sum of gear ratios";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.gear_ratio_sum().map(|sum| sum.to_string())
    }
}
