//! Day 12: Hot Springs

use crate::utils::math::{checked_sum, overflow};
use crate::utils::parse::parse_lines;
use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["2023", "dynamic-programming"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spring {
    Operational,
    Damaged,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub springs: Vec<Spring>,
    /// Lengths of the contiguous damaged runs, left to right
    pub groups: Vec<usize>,
}

impl Row {
    /// `copies` of the row joined by unknown springs
    pub fn unfold(&self, copies: usize) -> Row {
        Row {
            springs: vec![self.springs.clone(); copies].join(&Spring::Unknown),
            groups: self.groups.repeat(copies),
        }
    }

    /// Ways to fill in the unknown springs that match the groups
    ///
    /// `ways[i][j]` counts arrangements of `springs[i..]` against
    /// `groups[j..]`; row `n + 1` stands for "past the end after a group".
    pub fn arrangements(&self) -> Option<u64> {
        let (springs, groups) = (&self.springs, &self.groups);
        let n = springs.len();
        let mut ways = vec![vec![0u64; groups.len() + 1]; n + 2];
        ways[n][groups.len()] = 1;
        ways[n + 1][groups.len()] = 1;

        for i in (0..n).rev() {
            for j in 0..=groups.len() {
                let mut count = 0u64;
                if springs[i] != Spring::Damaged {
                    count = ways[i + 1][j];
                }
                if let Some(&len) = groups.get(j) {
                    let end = i + len;
                    let fits = springs[i] != Spring::Operational
                        && end <= n
                        && springs[i..end].iter().all(|&s| s != Spring::Operational)
                        && springs.get(end) != Some(&Spring::Damaged);
                    if fits {
                        count = count.checked_add(ways[end + 1][j + 1])?;
                    }
                }
                ways[i][j] = count;
            }
        }
        Some(ways[0][0])
    }
}

fn parse_row(line: &str) -> anyhow::Result<Row> {
    let (springs, groups) = line
        .split_whitespace()
        .collect_tuple()
        .context("expected 'SPRINGS GROUPS'")?;
    let springs = springs
        .chars()
        .map(|c| match c {
            '.' => Ok(Spring::Operational),
            '#' => Ok(Spring::Damaged),
            '?' => Ok(Spring::Unknown),
            _ => bail!("unknown spring {:?}", c),
        })
        .collect::<anyhow::Result<_>>()?;
    let groups = groups
        .split(',')
        .map(|g| {
            let len: usize = g.parse().with_context(|| format!("invalid group {:?}", g))?;
            ensure!(len > 0, "empty group");
            Ok(len)
        })
        .collect::<anyhow::Result<_>>()?;
    Ok(Row { springs, groups })
}

fn total_arrangements(rows: &[Row], copies: usize) -> Result<String, SolveError> {
    rows.iter()
        .map(|row| row.unfold(copies).arrangements())
        .collect::<Option<Vec<_>>>()
        .and_then(checked_sum)
        .map(|total| total.to_string())
        .ok_or_else(|| overflow("number of arrangements"))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Row>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows = parse_lines(input, parse_row)?;
        if rows.is_empty() {
            return Err(ParseError::MissingData("no rows".into()));
        }
        Ok(rows)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Sum of arrangements";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_arrangements(shared, 1)
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Sum of unfolded arrangements";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_arrangements(shared, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

    fn row(line: &str) -> Row {
        parse_row(line).unwrap()
    }

    #[test]
    fn test_part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "21");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "525152");
    }

    #[test]
    fn test_each_row() {
        let folded = [1, 4, 1, 1, 4, 10];
        let unfolded = [1, 16384, 1, 16, 2500, 506250];
        for ((line, one), five) in EXAMPLE.lines().zip(folded).zip(unfolded) {
            let r = row(line);
            assert_eq!(r.arrangements(), Some(one), "{}", line);
            assert_eq!(r.unfold(5).arrangements(), Some(five), "{}", line);
        }
    }

    #[test]
    fn test_group_at_the_very_end() {
        assert_eq!(row("..?????#?? 4,1").arrangements(), Some(2));
        assert_eq!(row("### 3").arrangements(), Some(1));
        assert_eq!(row("#.# 3").arrangements(), Some(0));
    }

    #[test]
    fn test_unfold() {
        let r = row(".# 1").unfold(3);
        assert_eq!(r, row(".#?.#?.# 1,1,1"));
    }

    #[test]
    fn test_too_many_arrangements_is_an_error() {
        // 100 free springs and a single 1-group per copy
        let line = format!("{} 1", "?".repeat(100));
        let rows = vec![row(&line)];
        assert!(matches!(
            total_arrangements(&rows, 20),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Solver::parse("???.### 1,1,3\n??x 1\n"),
            Err(ParseError::Line { line: 2, .. })
        ));
        assert!(Solver::parse("??? 1,0\n").is_err());
        assert!(Solver::parse("???\n").is_err());
        assert!(Solver::parse("??? 1,a\n").is_err());
    }

    /// Count by filling every unknown both ways
    fn brute_force(r: &Row) -> u64 {
        let unknown: Vec<usize> = r
            .springs
            .iter()
            .positions(|&s| s == Spring::Unknown)
            .collect();
        (0u32..1 << unknown.len())
            .filter(|mask| {
                let damaged = |i: usize| match unknown.iter().position(|&u| u == i) {
                    Some(bit) => mask & (1 << bit) != 0,
                    None => r.springs[i] == Spring::Damaged,
                };
                let runs: Vec<usize> = (0..r.springs.len())
                    .chunk_by(|&i| damaged(i))
                    .into_iter()
                    .filter(|(d, _)| *d)
                    .map(|(_, run)| run.count())
                    .collect();
                runs == r.groups
            })
            .count() as u64
    }

    fn any_row() -> impl Strategy<Value = Row> {
        let spring = prop::sample::select(vec![Spring::Operational, Spring::Damaged, Spring::Unknown]);
        (
            prop::collection::vec(spring, 0..12),
            prop::collection::vec(1usize..4, 0..4),
        )
            .prop_map(|(springs, groups)| Row { springs, groups })
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(r in any_row()) {
            prop_assert_eq!(r.arrangements(), Some(brute_force(&r)));
        }
    }
}
