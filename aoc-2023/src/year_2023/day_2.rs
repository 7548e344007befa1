//! Day 2: Cube Conundrum

use crate::utils::math::{checked_sum, overflow};
use crate::utils::parse::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["2023", "parsing"])]
pub struct Solver;

/// Cubes of each colour shown in one handful
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubeSet {
    pub red: u64,
    pub green: u64,
    pub blue: u64,
}

impl CubeSet {
    fn max(self, other: CubeSet) -> CubeSet {
        CubeSet {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_within(&self, caps: &CubeCaps) -> bool {
        self.red <= caps.red && self.green <= caps.green && self.blue <= caps.blue
    }

    /// Product of the three counts, `None` past 64 bits
    pub fn power(&self) -> Option<u64> {
        self.red.checked_mul(self.green)?.checked_mul(self.blue)
    }
}

/// How many cubes of each colour the bag holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeCaps {
    pub red: u64,
    pub green: u64,
    pub blue: u64,
}

impl Default for CubeCaps {
    fn default() -> Self {
        Self {
            red: 12,
            green: 13,
            blue: 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: u64,
    pub draws: Vec<CubeSet>,
}

impl Game {
    /// A game is possible iff no single draw exceeds the caps
    pub fn is_possible(&self, caps: &CubeCaps) -> bool {
        self.draws.iter().all(|draw| draw.fits_within(caps))
    }

    /// Fewest cubes of each colour that make the game possible
    pub fn minimum_set(&self) -> CubeSet {
        self.draws
            .iter()
            .fold(CubeSet::default(), |acc, draw| acc.max(*draw))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_game)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Sum of the IDs of possible games";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        possible_id_sum(shared, &CubeCaps::default())
            .map(|sum| sum.to_string())
            .ok_or_else(|| overflow("sum of game IDs"))
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Sum of powers";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(|game| game.minimum_set().power())
            .collect::<Option<Vec<_>>>()
            .and_then(checked_sum)
            .map(|total| total.to_string())
            .ok_or_else(|| overflow("sum of powers"))
    }
}

pub fn possible_id_sum(games: &[Game], caps: &CubeCaps) -> Option<u64> {
    checked_sum(
        games
            .iter()
            .filter(|game| game.is_possible(caps))
            .map(|game| game.id),
    )
}

/// `Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green`
pub fn parse_game(line: &str) -> anyhow::Result<Game> {
    let (header, body) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("expected ':' after the game id"))?;
    let id = header
        .trim()
        .strip_prefix("Game ")
        .ok_or_else(|| anyhow!("expected line to start with \"Game \""))?
        .trim()
        .parse()
        .context("invalid game id")?;

    let draws = body
        .split(';')
        .map(parse_draw)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Game { id, draws })
}

fn parse_draw(text: &str) -> anyhow::Result<CubeSet> {
    let mut set = CubeSet::default();
    for item in text.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (count, colour) = item
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected \"<count> <colour>\", got {:?}", item))?;
        let count: u64 = count
            .parse()
            .with_context(|| format!("invalid cube count {:?}", count))?;
        let slot = match colour.trim() {
            "red" => &mut set.red,
            "green" => &mut set.green,
            "blue" => &mut set.blue,
            other => bail!("unknown colour {:?}", other),
        };
        *slot += count;
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn test_part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "8");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2286");
    }

    #[test]
    fn test_caps_are_inclusive() {
        let game = parse_game("Game 7: 12 red, 13 green, 14 blue").unwrap();
        assert!(game.is_possible(&CubeCaps::default()));

        let game = parse_game("Game 8: 1 red; 15 blue").unwrap();
        assert!(!game.is_possible(&CubeCaps::default()));
    }

    #[test]
    fn test_custom_caps() {
        let games = Solver::parse(EXAMPLE).unwrap();
        let caps = CubeCaps {
            red: 20,
            green: 13,
            blue: 15,
        };
        // only game 4 (15 blue, 14 red) and game 3 (20 red) change
        assert_eq!(possible_id_sum(&games, &caps), Some(1 + 2 + 3 + 4 + 5));
        let tight = CubeCaps {
            red: 1,
            green: 1,
            blue: 1,
        };
        assert_eq!(possible_id_sum(&games, &tight), Some(0));
    }

    #[test]
    fn test_minimum_set_power() {
        let game = parse_game("Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green").unwrap();
        assert_eq!(
            game.minimum_set(),
            CubeSet {
                red: 4,
                green: 2,
                blue: 6
            }
        );
        assert_eq!(game.minimum_set().power(), Some(48));
    }

    #[test]
    fn test_huge_counts_fail_instead_of_overflowing() {
        let big = u64::MAX / 2;
        let line = format!("Game 1: {} red, {} green, 2 blue", big, big);
        let mut shared = Solver::parse(&line).unwrap();
        assert_eq!(shared[0].minimum_set().power(), None);
        assert!(matches!(
            Solver::solve_part(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(parse_game("Game x: 1 red").is_err());
        assert!(parse_game("Game 1: 1 purple").is_err());
        assert!(parse_game("Game 1: many red").is_err());
        assert!(parse_game("Round 1: 1 red").is_err());

        let err = Solver::parse("Game 1: 1 red\nGame 2: 2 teal\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"), "{}", err);
    }
}
