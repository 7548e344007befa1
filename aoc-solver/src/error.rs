//! Error taxonomy shared by solvers, the registry and the CLI
//!
//! Malformed input surfaces as [`ParseError`], a puzzle whose input breaks
//! what the puzzle promises surfaces as [`SolveError::AssumptionViolated`],
//! and I/O stays with the caller that reads the input.

use std::fmt::Display;
use thiserror::Error;

/// The input text could not be turned into a puzzle model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A specific line (1-based) is malformed
    #[error("line {line}: {reason}")]
    Line { line: usize, reason: String },
    /// The input as a whole has the wrong shape
    #[error("invalid input: {0}")]
    InvalidFormat(String),
    /// A section the puzzle needs is absent
    #[error("missing data: {0}")]
    MissingData(String),
}

impl ParseError {
    pub fn line(line: usize, reason: impl Display) -> Self {
        Self::Line {
            line,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Outside `1..=PARTS`
    #[error("part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input breaks a guarantee the puzzle relies on
    #[error("assumption violated: {0}")]
    AssumptionViolated(String),
    #[error("solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure to produce a solver or an answer through the registry
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no solver registered for {0}/{1:02}")]
    NotFound(u16, u8),
    #[error("{0}/{1:02} is outside the supported years and days")]
    InvalidYearDay(u16, u8),
    #[error("parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("solve error: {0}")]
    SolveError(#[from] SolveError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{0}/{1:02} is registered twice")]
    DuplicateSolver(u16, u8),
    #[error("{0}/{1:02} is outside the supported years and days")]
    InvalidYearDay(u16, u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_error_names_the_line() {
        let err = ParseError::line(3, "expected 'Card'");
        assert_eq!(err.to_string(), "line 3: expected 'Card'");
        assert_eq!(
            err,
            ParseError::Line {
                line: 3,
                reason: "expected 'Card'".into()
            }
        );
    }

    #[test]
    fn test_solver_error_wraps_parse_error() {
        let err: SolverError = ParseError::MissingData("no nodes".into()).into();
        assert_eq!(err.to_string(), "parse error: missing data: no nodes");
        assert_eq!(
            SolverError::NotFound(2023, 9).to_string(),
            "no solver registered for 2023/09"
        );
    }
}
