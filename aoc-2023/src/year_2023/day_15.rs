//! Day 15: Lens Library

use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 15, tags = ["2023", "hashing"])]
pub struct Solver;

const BOXES: usize = 256;

/// The HASH algorithm: add each byte, multiply by 17, keep the low 8 bits
pub fn hash(text: &str) -> u8 {
    text.bytes()
        .fold(0u8, |acc, b| acc.wrapping_add(b).wrapping_mul(17))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Remove,
    Insert(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// The step as written, which part 1 hashes
    pub text: &'a str,
    pub label: &'a str,
    pub operation: Operation,
}

fn parse_step(text: &str) -> anyhow::Result<Step<'_>> {
    let split = text
        .find(['=', '-'])
        .context("expected '=' or '-'")?;
    let (label, op) = text.split_at(split);
    ensure!(!label.is_empty(), "missing label");
    let operation = match op.as_bytes() {
        [b'-'] => Operation::Remove,
        [b'=', focal @ b'1'..=b'9'] => Operation::Insert(focal - b'0'),
        _ => bail!("invalid operation {:?}", op),
    };
    Ok(Step {
        text,
        label,
        operation,
    })
}

/// Comma separated steps on one line; surrounding whitespace is ignored
pub fn parse_steps(input: &str) -> Result<Vec<Step<'_>>, ParseError> {
    let sequence = input.trim();
    if sequence.is_empty() {
        return Err(ParseError::MissingData("no steps".into()));
    }
    if sequence.contains('\n') {
        return Err(ParseError::InvalidFormat("steps must be on one line".into()));
    }
    sequence
        .split(',')
        .enumerate()
        .map(|(idx, text)| {
            parse_step(text).map_err(|e| {
                ParseError::InvalidFormat(format!("step {} {:?}: {:#}", idx + 1, text, e))
            })
        })
        .collect()
}

/// Boxes of `(label, focal length)` in slot order
pub struct LensBoxes<'a> {
    boxes: Vec<Vec<(&'a str, u8)>>,
}

impl<'a> LensBoxes<'a> {
    pub fn arrange(steps: &[Step<'a>]) -> Self {
        let mut boxes = vec![Vec::new(); BOXES];
        for step in steps {
            let lenses: &mut Vec<(&str, u8)> = &mut boxes[usize::from(hash(step.label))];
            let slot = lenses.iter().position(|&(label, _)| label == step.label);
            match (step.operation, slot) {
                (Operation::Remove, Some(slot)) => {
                    lenses.remove(slot);
                }
                (Operation::Remove, None) => {}
                (Operation::Insert(focal), Some(slot)) => lenses[slot].1 = focal,
                (Operation::Insert(focal), None) => lenses.push((step.label, focal)),
            }
        }
        Self { boxes }
    }

    pub fn lenses(&self, box_number: u8) -> &[(&'a str, u8)] {
        &self.boxes[usize::from(box_number)]
    }

    /// Sum over every lens of (box + 1) * (slot + 1) * focal length
    pub fn focusing_power(&self) -> usize {
        self.boxes
            .iter()
            .enumerate()
            .flat_map(|(idx, lenses)| {
                lenses
                    .iter()
                    .enumerate()
                    .map(move |(slot, &(_, focal))| (idx + 1) * (slot + 1) * usize::from(focal))
            })
            .sum()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Step<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_steps(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Sum of step hashes";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared.iter().map(|step| usize::from(hash(step.text))).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Focusing power";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(LensBoxes::arrange(shared).focusing_power().to_string())
    }
}
