//! Per-path cycle records and their synchronisation point

use super::network::{Direction, Network, NodeId};
use crate::utils::math::{Congruence, MergeError};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;

/// A path is on a terminal node exactly at steps `offset + k * period`, `k >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleRecord {
    pub offset: u64,
    pub period: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("no directions to follow")]
    NoDirections,
    #[error("path from {start} reaches terminal {terminal} at step {step}, before its cycle starts at step {cycle_start}")]
    TerminalBeforeCycle {
        start: String,
        terminal: String,
        step: u64,
        cycle_start: u64,
    },
    #[error("path from {start} never reaches a terminal node")]
    NoTerminalInCycle { start: String },
    #[error("path from {start} reaches terminals at irregular steps {steps:?} within a cycle of {period}")]
    IrregularTerminals {
        start: String,
        steps: Vec<u64>,
        period: u64,
    },
}

/// Walk from `start` until a `(node, direction index)` state repeats
///
/// Step `s` is the state after `s` moves. The walk visits at most
/// `nodes * directions` distinct states. Terminal visits inside the cycle
/// must be evenly spaced so they collapse into a single record; a cycle
/// with one terminal visit is the simplest such case.
pub fn detect_cycle<F>(
    network: &Network<'_>,
    directions: &[Direction],
    start: NodeId,
    is_terminal: F,
) -> Result<CycleRecord, CycleError>
where
    F: Fn(NodeId) -> bool,
{
    if directions.is_empty() {
        return Err(CycleError::NoDirections);
    }

    let mut seen: HashMap<(NodeId, usize), u64> = HashMap::new();
    let mut terminals: Vec<(u64, NodeId)> = Vec::new();
    let mut node = start;
    let mut step = 0u64;

    let cycle_start = loop {
        let phase = (step % directions.len() as u64) as usize;
        match seen.entry((node, phase)) {
            Entry::Occupied(first) => break *first.get(),
            Entry::Vacant(slot) => {
                slot.insert(step);
            }
        }
        if is_terminal(node) {
            terminals.push((step, node));
        }
        node = network.next(node, directions[phase]);
        step += 1;
    };
    let period = step - cycle_start;

    if let Some(&(early, terminal)) = terminals.iter().find(|(t, _)| *t < cycle_start) {
        return Err(CycleError::TerminalBeforeCycle {
            start: network.name(start).to_string(),
            terminal: network.name(terminal).to_string(),
            step: early,
            cycle_start,
        });
    }

    let steps: Vec<u64> = terminals.iter().map(|&(t, _)| t).collect();
    let Some(&offset) = steps.first() else {
        return Err(CycleError::NoTerminalInCycle {
            start: network.name(start).to_string(),
        });
    };

    let count = steps.len() as u64;
    let spacing = period / count;
    let regular = period % count == 0
        && steps
            .iter()
            .zip(0u64..)
            .all(|(&t, k)| t == offset + k * spacing);
    if !regular {
        return Err(CycleError::IrregularTerminals {
            start: network.name(start).to_string(),
            steps,
            period,
        });
    }

    Ok(CycleRecord {
        offset,
        period: spacing,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("no paths to synchronise")]
    NoPaths,
    #[error("path {0} has a zero-length cycle")]
    ZeroPeriod(usize),
    #[error("paths never stand on terminal nodes at the same step")]
    NoSynchronisationPoint,
    #[error("synchronisation step does not fit in 64 bits")]
    Overflow,
}

impl From<MergeError> for SyncError {
    fn from(err: MergeError) -> Self {
        match err {
            MergeError::Incompatible => SyncError::NoSynchronisationPoint,
            MergeError::Overflow => SyncError::Overflow,
        }
    }
}

/// Smallest step `s >= max(offset)` with `s ≡ offset (mod period)` for every record
pub fn synchronize(records: &[CycleRecord]) -> Result<u64, SyncError> {
    let floor = records
        .iter()
        .map(|r| r.offset)
        .max()
        .ok_or(SyncError::NoPaths)?;
    if let Some(idx) = records.iter().position(|r| r.period == 0) {
        return Err(SyncError::ZeroPeriod(idx));
    }

    let combined = records.iter().try_fold(Congruence::new(0, 1), |acc, r| {
        acc.merge(Congruence::new(r.offset, r.period))
    })?;
    combined.first_at_least(floor).ok_or(SyncError::Overflow)
}
