//! Day 1: Trebuchet?!

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "strings"])]
pub struct Solver;

const DIGIT_WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Which spellings count as a digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitSpelling {
    /// `0`-`9` only
    Numerals,
    /// `0`-`9` and `one`-`nine`
    NumeralsAndWords,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".to_string()));
        }
        Ok(lines)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Sum of calibration values";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, DigitSpelling::Numerals).map(|sum| sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Sum of calibration values";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, DigitSpelling::NumeralsAndWords).map(|sum| sum.to_string())
    }
}

fn calibration_sum(lines: &[&str], spelling: DigitSpelling) -> Result<u64, SolveError> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            calibration_value(line, spelling)
                .map(u64::from)
                .ok_or_else(|| {
                    SolveError::SolveFailed(anyhow!("(line {}) no digit in {:?}", idx + 1, line).into())
                })
        })
        .sum()
}

/// `10 * first_digit + last_digit`, or `None` if the line holds no digit
pub fn calibration_value(line: &str, spelling: DigitSpelling) -> Option<u32> {
    let bytes = line.as_bytes();
    let first = (0..bytes.len()).find_map(|i| digit_at(bytes, i, spelling))?;
    let last = (0..bytes.len()).rev().find_map(|i| digit_at(bytes, i, spelling))?;
    Some(10 * first + last)
}

fn digit_at(bytes: &[u8], i: usize, spelling: DigitSpelling) -> Option<u32> {
    let b = bytes[i];
    if b.is_ascii_digit() {
        return Some(u32::from(b - b'0'));
    }
    if spelling == DigitSpelling::NumeralsAndWords {
        // words may overlap ("twone"), so match at every position
        return DIGIT_WORDS
            .iter()
            .position(|word| bytes[i..].starts_with(word.as_bytes()))
            .map(|idx| idx as u32 + 1);
    }
    None
}
