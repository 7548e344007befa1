//! Arena of named nodes with index edges

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("invalid direction {0:?}, expected 'L' or 'R'")]
    InvalidDirection(char),
    #[error("malformed node record {0:?}, expected 'AAA = (BBB, CCC)' with three-character names")]
    MalformedRecord(String),
    #[error("node {0} is declared twice")]
    DuplicateNode(String),
    #[error("node {from} points to undeclared node {target}")]
    UnknownTarget { from: String, target: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl TryFrom<char> for Direction {
    type Error = NetworkError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            other => Err(NetworkError::InvalidDirection(other)),
        }
    }
}

pub fn parse_directions(line: &str) -> Result<Vec<Direction>, NetworkError> {
    line.trim().chars().map(Direction::try_from).collect()
}

/// Index of a node in its [`Network`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node<'a> {
    name: &'a str,
    left: NodeId,
    right: NodeId,
}

/// Every node name is this many characters
pub const NAME_LEN: usize = 3;

/// `(name, left, right)` as written in the input
pub type NodeRecord<'a> = (&'a str, &'a str, &'a str);

pub fn parse_record(line: &str) -> Result<NodeRecord<'_>, NetworkError> {
    let malformed = || NetworkError::MalformedRecord(line.to_string());
    let (name, edges) = line.split_once('=').ok_or_else(malformed)?;
    let (left, right) = edges
        .trim()
        .strip_prefix('(')
        .and_then(|e| e.strip_suffix(')'))
        .and_then(|e| e.split_once(','))
        .ok_or_else(malformed)?;
    let (name, left, right) = (name.trim(), left.trim(), right.trim());
    if [name, left, right].iter().any(|n| n.chars().count() != NAME_LEN) {
        return Err(malformed());
    }
    Ok((name, left, right))
}

#[derive(Debug, Clone)]
pub struct Network<'a> {
    nodes: Vec<Node<'a>>,
    by_name: HashMap<&'a str, NodeId>,
}

impl<'a> Network<'a> {
    /// Build in two passes so records may point forward to later nodes
    pub fn build(records: &[NodeRecord<'a>]) -> Result<Self, NetworkError> {
        let mut by_name = HashMap::with_capacity(records.len());
        for (idx, &(name, _, _)) in records.iter().enumerate() {
            match by_name.entry(name) {
                Entry::Occupied(_) => return Err(NetworkError::DuplicateNode(name.to_string())),
                Entry::Vacant(slot) => {
                    slot.insert(NodeId(idx));
                }
            }
        }

        let resolve = |from: &str, target: &str| {
            by_name
                .get(target)
                .copied()
                .ok_or_else(|| NetworkError::UnknownTarget {
                    from: from.to_string(),
                    target: target.to_string(),
                })
        };
        let nodes = records
            .iter()
            .map(|&(name, left, right)| {
                Ok(Node {
                    name,
                    left: resolve(name, left)?,
                    right: resolve(name, right)?,
                })
            })
            .collect::<Result<Vec<_>, NetworkError>>()?;

        Ok(Self { nodes, by_name })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &'a str {
        self.nodes[id.0].name
    }

    pub fn next(&self, id: NodeId, direction: Direction) -> NodeId {
        let node = &self.nodes[id.0];
        match direction {
            Direction::Left => node.left,
            Direction::Right => node.right,
        }
    }

    /// Nodes whose name ends in `marker`, in declaration order
    pub fn ending_with(&self, marker: char) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.name.ends_with(marker))
            .map(|(idx, _)| NodeId(idx))
    }

    /// Steps from `from` to `to` following `directions` round and round
    ///
    /// `None` once every `(node, direction index)` state could have been
    /// visited without reaching `to`.
    pub fn steps_between(&self, from: NodeId, to: NodeId, directions: &[Direction]) -> Option<u64> {
        let limit = self.len().checked_mul(directions.len())?;
        let mut node = from;
        for (step, &direction) in directions.iter().cycle().enumerate() {
            if node == to {
                return Some(step as u64);
            }
            if step >= limit {
                return None;
            }
            node = self.next(node, direction);
        }
        // only reachable with no directions
        (node == to).then_some(0)
    }
}
