//! Day 8: Haunted Wasteland
//!
//! Part 2 walks every start node at once. Each path settles into a cycle
//! over `(node, direction index)` states, so it is summarised as a
//! [`CycleRecord`] and the records are merged as congruences instead of
//! stepping all paths together.

mod cycle;
mod network;

pub use cycle::{CycleError, CycleRecord, SyncError, detect_cycle, synchronize};
pub use network::{Direction, Network, NetworkError, NodeId};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["2023", "graph", "cycles"])]
pub struct Solver;

/// Which nodes start and end a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeClass {
    /// Single walk start
    pub origin: &'static str,
    /// Single walk destination
    pub destination: &'static str,
    /// Last character of every ghost start
    pub start_marker: char,
    /// Last character of every ghost terminal
    pub end_marker: char,
}

impl Default for NodeClass {
    fn default() -> Self {
        Self {
            origin: "AAA",
            destination: "ZZZ",
            start_marker: 'A',
            end_marker: 'Z',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Map<'a> {
    pub directions: Vec<Direction>,
    pub network: Network<'a>,
}

impl<'a> Map<'a> {
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (first_no, first) = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("no directions".into()))?;
        let directions = network::parse_directions(first)
            .map_err(|e| ParseError::line(first_no, e))?;
        if directions.is_empty() {
            return Err(ParseError::MissingData("no directions".into()));
        }

        let records = lines
            .map(|(line_no, line)| {
                network::parse_record(line)
                    .map_err(|e| ParseError::line(line_no, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if records.is_empty() {
            return Err(ParseError::MissingData("no nodes".into()));
        }

        let network =
            Network::build(&records).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(Self {
            directions,
            network,
        })
    }

    fn node(&self, name: &str) -> Result<NodeId, SolveError> {
        self.network
            .id(name)
            .ok_or_else(|| SolveError::AssumptionViolated(format!("no node named {}", name)))
    }

    /// Steps from `class.origin` to `class.destination`
    pub fn single_walk(&self, class: &NodeClass) -> Result<u64, SolveError> {
        let from = self.node(class.origin)?;
        let to = self.node(class.destination)?;
        self.network
            .steps_between(from, to, &self.directions)
            .ok_or_else(|| {
                SolveError::AssumptionViolated(format!(
                    "{} never reaches {}",
                    class.origin, class.destination
                ))
            })
    }

    /// Cycle record of every start node, in declaration order
    pub fn cycle_records(&self, class: &NodeClass) -> Result<Vec<CycleRecord>, SolveError> {
        let is_terminal = |id: NodeId| self.network.name(id).ends_with(class.end_marker);
        self.network
            .ending_with(class.start_marker)
            .map(|start| {
                let record = detect_cycle(&self.network, &self.directions, start, is_terminal)
                    .map_err(|e| SolveError::AssumptionViolated(e.to_string()))?;
                debug!(
                    start = self.network.name(start),
                    offset = record.offset,
                    period = record.period,
                    "cycle found"
                );
                if record.offset != record.period {
                    debug!(start = self.network.name(start), "terminal offset differs from period");
                }
                Ok(record)
            })
            .collect()
    }

    /// First step at which every ghost stands on a terminal node
    pub fn ghost_walk(&self, class: &NodeClass) -> Result<u64, SolveError> {
        let records = self.cycle_records(class)?;
        if records.is_empty() {
            return Err(SolveError::AssumptionViolated(format!(
                "no node ends in {:?}",
                class.start_marker
            )));
        }
        synchronize(&records).map_err(|e| SolveError::SolveFailed(Box::new(e)))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Map<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Map::parse(input)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Steps from AAA to ZZZ";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .single_walk(&NodeClass::default())
            .map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Total steps";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .ghost_walk(&NodeClass::default())
            .map(|steps| steps.to_string())
    }
}
