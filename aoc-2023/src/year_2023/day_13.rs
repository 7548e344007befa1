//! Day 13: Point of Incidence

use crate::utils::grid::Grid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["2023", "grid"])]
pub struct Solver;

/// One block of ash and rocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern<'a> {
    /// Line of the first row
    pub line: usize,
    pub rows: Vec<&'a [u8]>,
}

/// Where a pattern folds onto itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// Between row `n - 1` and row `n`
    Horizontal(usize),
    /// Between column `n - 1` and column `n`
    Vertical(usize),
}

impl Mirror {
    pub fn summary(self) -> usize {
        match self {
            Mirror::Horizontal(rows) => 100 * rows,
            Mirror::Vertical(cols) => cols,
        }
    }
}

fn mismatches(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// First split of `lines` whose two halves differ in exactly `smudges` cells
fn fold_line<T: AsRef<[u8]>>(lines: &[T], smudges: usize) -> Option<usize> {
    (1..lines.len()).find(|&split| {
        let above = lines[..split].iter().rev();
        let below = &lines[split..];
        above
            .zip(below)
            .map(|(a, b)| mismatches(a.as_ref(), b.as_ref()))
            .sum::<usize>()
            == smudges
    })
}

impl<'a> Pattern<'a> {
    fn columns(&self) -> Vec<Vec<u8>> {
        let width = self.rows.first().map_or(0, |r| r.len());
        (0..width)
            .map(|col| self.rows.iter().map(|row| row[col]).collect())
            .collect()
    }

    /// The mirror whose reflection is off by exactly `smudges` cells,
    /// horizontal ones first
    pub fn mirror(&self, smudges: usize) -> Option<Mirror> {
        fold_line(&self.rows, smudges)
            .map(Mirror::Horizontal)
            .or_else(|| fold_line(&self.columns(), smudges).map(Mirror::Vertical))
    }
}

/// Split on blank lines, checking each pattern is a rectangle of `.` and `#`
pub fn parse_patterns(input: &str) -> Result<Vec<Pattern<'_>>, ParseError> {
    let grid = Grid::new(input);
    if let Some((row, col, b)) = grid.cells().find(|(_, _, b)| !b"#.".contains(b)) {
        return Err(ParseError::line(
            row + 1,
            format!("unknown cell {:?} in column {}", b as char, col + 1),
        ));
    }

    let mut patterns: Vec<Pattern> = Vec::new();
    let mut current: Option<Pattern> = None;
    for (idx, &row) in grid.rows().iter().enumerate() {
        if row.is_empty() {
            patterns.extend(current.take());
        } else if let Some(pattern) = current.as_mut() {
            let width = pattern.rows[0].len();
            if row.len() != width {
                return Err(ParseError::line(
                    idx + 1,
                    format!("width {} in a pattern of width {}", row.len(), width),
                ));
            }
            pattern.rows.push(row);
        } else {
            current = Some(Pattern {
                line: idx + 1,
                rows: vec![row],
            });
        }
    }
    patterns.extend(current);

    if patterns.is_empty() {
        return Err(ParseError::MissingData("no patterns".into()));
    }
    Ok(patterns)
}

fn summarize(patterns: &[Pattern], smudges: usize) -> Result<String, SolveError> {
    let mut total = 0;
    for pattern in patterns {
        let mirror = pattern.mirror(smudges).ok_or_else(|| {
            SolveError::AssumptionViolated(format!(
                "pattern on line {} has no mirror with {} smudge(s)",
                pattern.line, smudges
            ))
        })?;
        total += mirror.summary();
    }
    Ok(total.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pattern<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_patterns(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Summary of reflections";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize(shared, 0)
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Summary of smudged reflections";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize(shared, 1)
    }
}
