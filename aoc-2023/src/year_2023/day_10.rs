//! Day 10: Pipe Maze
//!
//! The loop through `S` is traced once per part. Tiles inside the loop are
//! found with a scanline: crossing a loop tile that opens north flips
//! between outside and inside.

use crate::utils::grid::Grid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid", "graph"])]
pub struct Solver;

const TILES: &[u8] = b"|-LJ7F.S";

type Pos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::East, Heading::West];

    fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }

    /// The neighbouring position, `None` off the top or left edge
    fn step(self, (row, col): Pos) -> Option<Pos> {
        match self {
            Heading::North => Some((row.checked_sub(1)?, col)),
            Heading::South => Some((row + 1, col)),
            Heading::East => Some((row, col + 1)),
            Heading::West => Some((row, col.checked_sub(1)?)),
        }
    }
}

/// The two sides a pipe connects, `None` for ground and the start
fn openings(tile: u8) -> Option<[Heading; 2]> {
    use Heading::*;
    match tile {
        b'|' => Some([North, South]),
        b'-' => Some([East, West]),
        b'L' => Some([North, East]),
        b'J' => Some([North, West]),
        b'7' => Some([South, West]),
        b'F' => Some([South, East]),
        _ => None,
    }
}

fn broken_loop((row, col): Pos) -> SolveError {
    SolveError::AssumptionViolated(format!(
        "loop leaves the pipes at row {}, column {}",
        row + 1,
        col + 1
    ))
}

#[derive(Debug, Clone)]
pub struct Maze<'a> {
    grid: Grid<'a>,
    start: Pos,
}

impl<'a> Maze<'a> {
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        let grid = Grid::new(input);
        if let Some((row, col, b)) = grid.cells().find(|(_, _, b)| !TILES.contains(b)) {
            return Err(ParseError::line(
                row + 1,
                format!("unknown tile {:?} in column {}", b as char, col + 1),
            ));
        }

        let starts: Vec<Pos> = grid
            .cells()
            .filter(|&(_, _, b)| b == b'S')
            .map(|(row, col, _)| (row, col))
            .collect();
        match starts[..] {
            [start] => Ok(Self { grid, start }),
            [] => Err(ParseError::MissingData("no start tile 'S'".into())),
            [_, (again, _), ..] => Err(ParseError::line(again + 1, "second start tile 'S'")),
        }
    }

    fn tile(&self, (row, col): Pos) -> Option<u8> {
        self.grid.get(row, col)
    }

    /// The sides of `S`: the neighbours whose pipes point back at it
    pub fn start_openings(&self) -> Result<[Heading; 2], SolveError> {
        let connected: Vec<Heading> = Heading::ALL
            .into_iter()
            .filter(|&heading| {
                heading
                    .step(self.start)
                    .and_then(|pos| self.tile(pos))
                    .and_then(openings)
                    .is_some_and(|sides| sides.contains(&heading.opposite()))
            })
            .collect();
        match connected[..] {
            [a, b] => Ok([a, b]),
            _ => Err(SolveError::AssumptionViolated(format!(
                "start connects to {} pipes, expected 2",
                connected.len()
            ))),
        }
    }

    /// Every position on the loop, starting at `S`
    pub fn trace_loop(&self) -> Result<Vec<Pos>, SolveError> {
        let [mut heading, _] = self.start_openings()?;
        let mut pos = self.start;
        let mut path = vec![pos];
        loop {
            pos = heading.step(pos).ok_or_else(|| broken_loop(pos))?;
            if pos == self.start {
                return Ok(path);
            }
            let [a, b] = self
                .tile(pos)
                .and_then(openings)
                .ok_or_else(|| broken_loop(pos))?;
            let entry = heading.opposite();
            heading = match (a == entry, b == entry) {
                (true, _) => b,
                (_, true) => a,
                _ => return Err(broken_loop(pos)),
            };
            path.push(pos);
        }
    }

    /// Tiles enclosed by the loop, counted row by row
    pub fn enclosed(&self) -> Result<usize, SolveError> {
        let on_loop: HashSet<Pos> = self.trace_loop()?.into_iter().collect();
        let start_opens_north = self.start_openings()?.contains(&Heading::North);
        let opens_north = |tile: u8| match tile {
            b'S' => start_opens_north,
            _ => openings(tile).is_some_and(|sides| sides.contains(&Heading::North)),
        };

        let mut count = 0;
        let mut inside = false;
        let mut current_row = 0;
        for (row, col, tile) in self.grid.cells() {
            if row != current_row {
                current_row = row;
                inside = false;
            }
            if on_loop.contains(&(row, col)) {
                if opens_north(tile) {
                    inside = !inside;
                }
            } else if inside {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Maze<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Maze::parse(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Steps to the farthest point";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.trace_loop()?.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Tiles enclosed by the loop";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.enclosed()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const SQUARE: &str = "\
-L|F7
7S-7|
L|7||
-L-J|
L|-JF
";

    const WINDING: &str = "\
7-F7-
.FJ|7
SJLL7
|F--J
LJ.LJ
";

    const ENCLOSED: &str = "\
...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";

    const SQUEEZED: &str = "\
..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........
";

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part(&mut shared, part).unwrap()
    }

    #[test]
    fn test_part1_examples() {
        assert_eq!(solve(SQUARE, 1), "4");
        assert_eq!(solve(WINDING, 1), "8");
    }

    #[test]
    fn test_part2_examples() {
        assert_eq!(solve(ENCLOSED, 2), "4");
        assert_eq!(solve(SQUEEZED, 2), "4");
        assert_eq!(solve(SQUARE, 2), "1");
    }

    #[test]
    fn test_start_shape_is_inferred() {
        let maze = Maze::parse(SQUARE).unwrap();
        assert_eq!(maze.start_openings().unwrap(), [Heading::South, Heading::East]);
        let maze = Maze::parse(WINDING).unwrap();
        assert_eq!(maze.start_openings().unwrap(), [Heading::South, Heading::East]);
    }

    #[test]
    fn test_loop_visits_each_tile_once() {
        let path = Maze::parse(ENCLOSED).unwrap().trace_loop().unwrap();
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len());
        assert_eq!(path[0], (1, 1));
    }

    #[test]
    fn test_broken_loop() {
        let err = Maze::parse("S-7\n|.|\nL-.\n").unwrap().trace_loop().unwrap_err();
        assert!(matches!(err, SolveError::AssumptionViolated(_)));

        let err = Maze::parse(".S.\n...\n").unwrap().start_openings().unwrap_err();
        assert!(err.to_string().contains("0 pipes"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Maze::parse("...\n.X.\n"), Err(ParseError::Line { line: 2, .. })));
        assert!(matches!(Maze::parse("...\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Maze::parse("S..\n..S\n"), Err(ParseError::Line { line: 2, .. })));
    }
}
