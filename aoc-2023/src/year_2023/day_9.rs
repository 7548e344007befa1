//! Day 9: Mirage Maintenance

use crate::utils::math::overflow;
use crate::utils::parse::{numbers, parse_lines};
use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["2023", "math"])]
pub struct Solver;

/// The history followed by its difference rows, down to the first row that
/// is all zeros (or empty)
///
/// `None` if a difference leaves the `i64` range.
fn difference_rows(history: &[i64]) -> Option<Vec<Vec<i64>>> {
    let mut rows = vec![history.to_vec()];
    while let Some(last) = rows.last().filter(|row| row.iter().any(|&v| v != 0)) {
        let next = last
            .iter()
            .tuple_windows()
            .map(|(a, b)| b.checked_sub(*a))
            .collect::<Option<Vec<_>>>()?;
        rows.push(next);
    }
    Some(rows)
}

/// The value that would follow the history
pub fn extrapolate_forward(history: &[i64]) -> Option<i64> {
    difference_rows(history)?
        .iter()
        .try_fold(0i64, |acc, row| acc.checked_add(row.last().copied().unwrap_or(0)))
}

/// The value that would precede the history
pub fn extrapolate_backward(history: &[i64]) -> Option<i64> {
    difference_rows(history)?
        .iter()
        .rev()
        .try_fold(0i64, |below, row| row.first().copied().unwrap_or(0).checked_sub(below))
}

fn sum_extrapolated<F>(histories: &[Vec<i64>], extrapolate: F) -> Result<i64, SolveError>
where
    F: Fn(&[i64]) -> Option<i64>,
{
    histories
        .iter()
        .try_fold(0i64, |acc, history| acc.checked_add(extrapolate(history)?))
        .ok_or_else(|| overflow("sum of extrapolated values"))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let histories = parse_lines(input, |line| {
            let values = numbers(line)?;
            ensure!(!values.is_empty(), "empty history");
            Ok(values)
        })?;
        if histories.is_empty() {
            return Err(ParseError::MissingData("no histories".into()));
        }
        Ok(histories)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Sum of next values";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_extrapolated(shared, extrapolate_forward)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Sum of previous values";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_extrapolated(shared, extrapolate_backward)?.to_string())
    }
}
