//! The traits a daily puzzle implements

use crate::error::{ParseError, SolveError};

/// Label printed when a part does not name its answer
pub const DEFAULT_LABEL: &str = "Answer";

/// Turns the raw input into the model every part works on
///
/// The model may borrow from the input (`SharedData<'a> = Vec<&'a str>`) or
/// own its data. Parts receive it mutably, so a part may cache work for a
/// later one.
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(i, l)| l.parse().map_err(|e| ParseError::line(i + 1, e)))
///             .collect()
///     }
/// }
///
/// assert_eq!(Depths::parse("199\n200").unwrap(), vec![199, 200]);
/// assert!(Depths::parse("199\nx").is_err());
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Part `N` of a puzzle
///
/// `#[derive(AocSolver)]` requires one impl per part, so a missing part is
/// a compile error rather than a runtime one.
pub trait PartSolver<const N: u8>: AocParser {
    /// What the answer measures, printed in front of it
    const LABEL: &'static str = DEFAULT_LABEL;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime dispatch from a part number to the matching [`PartSolver`]
///
/// Normally generated by `#[derive(AocSolver)]`. A hand-written impl:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(i, l)| l.parse().map_err(|e| ParseError::line(i + 1, e)))
///             .collect()
///     }
/// }
///
/// impl Solver for Depths {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
/// ```
pub trait Solver: AocParser {
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;

    fn part_label(_part: u8) -> &'static str {
        DEFAULT_LABEL
    }
}

/// Range-checked entry point used by [`crate::SolverInstance`]
pub trait SolverExt: Solver {
    /// `PartOutOfRange` for any part outside `1..=PARTS`
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
