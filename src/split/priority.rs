//! Deterministic machine fill in operator-assigned priority order.

use serde::{Deserialize, Serialize};

use super::allocator::SplitLine;

/// An EDC terminal with a fill priority. Lower priority fills first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMachine {
    pub name: String,
    /// Capacity used for this fill, in rupiah. No safety gap is applied; the
    /// operator picks the figure they are comfortable charging.
    pub limit: u64,
    pub priority: u32,
}

impl RankedMachine {
    pub fn new(name: impl Into<String>, limit: u64, priority: u32) -> Self {
        Self {
            name: name.into(),
            limit,
            priority,
        }
    }
}

/// Fill machines in ascending priority order, each up to its limit.
///
/// Returns the planned lines and whatever could not be placed. Unlike
/// [`split_exact`](super::split_exact) this makes no attempt to disguise
/// amounts or to guarantee full placement; the caller decides what to do with
/// a nonzero leftover.
pub fn split_by_priority(total: u64, machines: &[RankedMachine]) -> (Vec<SplitLine>, u64) {
    let mut ranked: Vec<&RankedMachine> = machines.iter().collect();
    ranked.sort_by_key(|m| m.priority);

    let mut remaining = total;
    let mut lines = Vec::new();
    for machine in ranked {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(machine.limit);
        lines.push(SplitLine {
            machine: machine.name.clone(),
            amount: take,
        });
        remaining -= take;
    }
    (lines, remaining)
}
