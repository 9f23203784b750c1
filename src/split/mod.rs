//! Split planning for large transactions across several EDC machines.
//!
//! # Key Concepts
//! - exact split: randomized greedy slicing plus an exact-total repair pass;
//!   guarantees the plan sums to the requested total while staying under
//!   per-machine limits and swipe budgets
//! - priority fill: deterministic best-effort fill in operator-assigned order

mod allocator;
mod priority;

pub use allocator::{split_exact, split_exact_with, Machine, SplitError, SplitLine, SAFETY_GAP};
pub use priority::{split_by_priority, RankedMachine};
