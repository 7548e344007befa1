//! Day 6: Wait For It

use crate::utils::math::overflow;
use crate::utils::parse::numbers;
use anyhow::{Context, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    pub time: u64,
    pub record: u64,
}

impl Race {
    fn beats_record(&self, hold: u64) -> bool {
        u128::from(hold) * u128::from(self.time - hold) > u128::from(self.record)
    }

    /// Number of integer hold times whose distance beats the record
    ///
    /// Winning holds are symmetric around `time / 2`, so only the smallest
    /// one is searched for. The root of `h^2 - t*h + d = 0` gives a float
    /// estimate that is then corrected with exact integer checks.
    pub fn ways_to_win(&self) -> u64 {
        let half = self.time / 2;
        if !self.beats_record(half) {
            return 0;
        }

        let t = self.time as f64;
        let discriminant = (t * t - 4.0 * self.record as f64).max(0.0);
        let estimate = ((t - discriminant.sqrt()) / 2.0).floor().max(0.0) as u64;

        let mut lowest = estimate.min(half);
        while lowest > 0 && self.beats_record(lowest - 1) {
            lowest -= 1;
        }
        while !self.beats_record(lowest) {
            lowest += 1;
        }
        self.time - 2 * lowest + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceSheet<'a> {
    times: &'a str,
    records: &'a str,
}

impl<'a> RaceSheet<'a> {
    /// Column by column races
    pub fn races(&self) -> anyhow::Result<Vec<Race>> {
        let times: Vec<u64> = numbers(self.times).context("Time")?;
        let records: Vec<u64> = numbers(self.records).context("Distance")?;
        ensure!(
            times.len() == records.len(),
            "{} times but {} distances",
            times.len(),
            records.len()
        );
        Ok(times
            .into_iter()
            .zip(records)
            .map(|(time, record)| Race { time, record })
            .collect())
    }

    /// One race read with the spaces between digits ignored
    pub fn single_race(&self) -> anyhow::Result<Race> {
        let joined = |text: &str| -> anyhow::Result<u64> {
            let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            digits
                .parse()
                .with_context(|| format!("invalid kerned number {:?}", text.trim()))
        };
        Ok(Race {
            time: joined(self.times).context("Time")?,
            record: joined(self.records).context("Distance")?,
        })
    }
}

fn parse_sheet(input: &str) -> anyhow::Result<RaceSheet<'_>> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let times = lines
        .next()
        .and_then(|l| l.strip_prefix("Time:"))
        .context("expected 'Time:' line")?;
    let records = lines
        .next()
        .and_then(|l| l.strip_prefix("Distance:"))
        .context("expected 'Distance:' line")?;
    let sheet = RaceSheet { times, records };
    // the kerned race is only checked by part 2, its digits may not fit
    sheet.races()?;
    Ok(sheet)
}

impl AocParser for Solver {
    type SharedData<'a> = RaceSheet<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_sheet(input).map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Product of the margins of error";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let races = shared.races().map_err(|e| SolveError::SolveFailed(e.into()))?;
        races
            .iter()
            .try_fold(1u64, |acc, race| acc.checked_mul(race.ways_to_win()))
            .map(|product| product.to_string())
            .ok_or_else(|| overflow("product of the margins"))
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Margin of error";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let race = shared
            .single_race()
            .map_err(|e| SolveError::SolveFailed(e.into()))?;
        Ok(race.ways_to_win().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
Time:      7  15   30
Distance:  9  40  200
";

    fn brute_force(race: Race) -> u64 {
        (0..=race.time).filter(|&h| race.beats_record(h)).count() as u64
    }

    #[test]
    fn test_part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "288");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "71503");
    }

    #[test]
    fn test_exact_root_does_not_count() {
        // 10 and 20 both reach exactly 200
        let race = Race { time: 30, record: 200 };
        assert_eq!(race.ways_to_win(), 9);
    }

    #[test]
    fn test_unbeatable_record() {
        assert_eq!(Race { time: 4, record: 4 }.ways_to_win(), 0);
        assert_eq!(Race { time: 0, record: 0 }.ways_to_win(), 0);
        assert_eq!(Race { time: 5, record: 6 }.ways_to_win(), 0);
    }

    #[test]
    fn test_puzzle_sized_races() {
        let input = "Time:        49     78     79     80\n\
                     Distance:   298   1185   1066   1181\n";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2269432");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "35865985");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Solver::parse("Time: 1 2\n").is_err());
        assert!(Solver::parse("Time: 1 2\nDistance: 3\n").is_err());
        assert!(Solver::parse("Distance: 1\nTime: 1\n").is_err());
    }

    #[test]
    fn test_oversized_kerned_race_only_fails_part2() {
        // joined, the times read 100100100100100100100, past u64::MAX
        let input = "Time: 100 100 100 100 100 100 100\nDistance: 10 10 10 10 10 10 10\n";
        let mut shared = Solver::parse(input).unwrap();
        let per_race = Race { time: 100, record: 10 }.ways_to_win();
        assert_eq!(per_race, 99);
        assert_eq!(
            Solver::solve_part(&mut shared, 1).unwrap(),
            per_race.pow(7).to_string()
        );
        assert!(matches!(
            Solver::solve_part(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_margin_product_overflow_is_an_error() {
        let input = "Time: 4000000000 4000000000 4000000000\nDistance: 0 0 0\n";
        let mut shared = Solver::parse(input).unwrap();
        assert!(matches!(
            Solver::solve_part(&mut shared, 1),
            Err(SolveError::SolveFailed(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(time in 0u64..500, record in 0u64..70_000) {
            let race = Race { time, record };
            prop_assert_eq!(race.ways_to_win(), brute_force(race));
        }
    }
}
