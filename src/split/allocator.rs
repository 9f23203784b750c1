//! Exact-total split of a large transaction across EDC machines.
//!
//! # Strategy
//! Two phases: a greedy pass that carves the total into per-swipe slices with
//! randomized non-round amounts, then a repair pass that absorbs the drift the
//! randomization introduced, so the plan sums exactly.
//!
//! # Invariants
//! - the returned amounts always sum to the requested total
//! - no line exceeds its machine's limit minus [`SAFETY_GAP`]
//! - no machine carries more lines than `max_swipes`

use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Headroom kept below each machine's hard limit, in rupiah. Charging right at
/// the ceiling tends to trigger limit-related declines.
pub const SAFETY_GAP: u64 = 1_000;

/// Smallest slice the greedy phase will record.
const MIN_SLICE: u64 = 500;

/// Half-open range for the randomized non-round shave.
const ADJUST_LOW: u64 = 237;
const ADJUST_HIGH: u64 = 937;

/// Fallback subtraction when the shave would zero the amount.
const ZERO_GUARD: u64 = 777;

/// An EDC terminal with a per-swipe ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Display name, unique within one split request.
    pub name: String,
    /// Hard per-swipe limit in rupiah.
    pub limit: u64,
}

impl Machine {
    pub fn new(name: impl Into<String>, limit: u64) -> Self {
        Self {
            name: name.into(),
            limit,
        }
    }

    /// Capacity actually usable per swipe, [`SAFETY_GAP`] below the hard limit.
    pub fn usable(&self) -> u64 {
        self.limit.saturating_sub(SAFETY_GAP)
    }
}

/// One planned swipe: a machine name and the amount charged on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitLine {
    pub machine: String,
    pub amount: u64,
}

/// Errors from split planning.
///
/// Both variants are the same user-facing condition (the machines cannot carry
/// the total); they differ in when the planner noticed. The caller should
/// surface the message and ask for more machines, higher limits, or a higher
/// swipe budget rather than retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SplitError {
    /// Aggregate usable capacity is short of the total.
    #[error(
        "total of {total} exceeds the usable capacity of {capacity} \
         ({machines} machines x {max_swipes} swipes)"
    )]
    InsufficientCapacity {
        total: u64,
        capacity: u64,
        machines: usize,
        max_swipes: u32,
    },

    /// The greedy phase stalled with a remainder nothing can absorb.
    #[error("unable to allocate remaining {remaining} with the given limits and swipe budget")]
    Exhausted { remaining: u64 },
}

/// Split `total` across `machines`, keeping every amount below the machine's
/// limit minus [`SAFETY_GAP`], using at most `max_swipes` lines per machine,
/// preferring non-round amounts, and guaranteeing the exact total.
///
/// Amounts are shaved with the operating system's CSPRNG so repeated calls
/// produce different-looking plans; reproducibility is deliberately not a
/// goal. Use [`split_exact_with`] to inject a fixed random source in tests.
///
/// # Postcondition
/// `result.iter().map(|l| l.amount).sum() == total`, asserted before return.
///
/// # Errors
/// [`SplitError::InsufficientCapacity`] when the aggregate usable capacity is
/// short of `total`; [`SplitError::Exhausted`] when the greedy phase stalls
/// with a remainder the placed lines cannot absorb.
pub fn split_exact(
    total: u64,
    machines: &[Machine],
    max_swipes: u32,
) -> Result<Vec<SplitLine>, SplitError> {
    split_exact_with(total, machines, max_swipes, &mut OsRng)
}

/// [`split_exact`] with a caller-supplied random source.
pub fn split_exact_with<R: Rng + ?Sized>(
    total: u64,
    machines: &[Machine],
    max_swipes: u32,
    rng: &mut R,
) -> Result<Vec<SplitLine>, SplitError> {
    let capacity = machines
        .iter()
        .fold(0u64, |acc, m| acc.saturating_add(m.usable()))
        .saturating_mul(max_swipes as u64);
    if capacity < total {
        return Err(SplitError::InsufficientCapacity {
            total,
            capacity,
            machines: machines.len(),
            max_swipes,
        });
    }

    // Own the list so the caller's order is untouched; the stable sort keeps
    // equal limits in caller order.
    let mut sorted: Vec<Machine> = machines.to_vec();
    sorted.sort_by(|a, b| b.limit.cmp(&a.limit));

    let mut counts = vec![0u32; sorted.len()];
    // (index into `sorted`, amount) until the names are attached at the end.
    let mut lines: Vec<(usize, u64)> = Vec::new();
    let mut remaining = total as i64;

    while remaining > 0 {
        let mut progressed = false;

        // A machine with swipe budget that can absorb the whole remainder
        // takes it in one shot. The shave may leave a small residual for the
        // next iteration.
        for (idx, machine) in sorted.iter().enumerate() {
            let usable = machine.usable();
            if counts[idx] < max_swipes && usable > 0 && remaining as u64 <= usable {
                let want = remaining as u64;
                let mut amount = want - rand_adjust(rng, want);
                if amount == 0 {
                    amount = want - ZERO_GUARD;
                }
                tracing::debug!(machine = %machine.name, amount, "single-shot slice");
                lines.push((idx, amount));
                counts[idx] += 1;
                remaining -= amount as i64;
                progressed = true;
                break;
            }
        }
        if remaining == 0 {
            break;
        }
        if progressed {
            continue;
        }

        // Otherwise carve a slice off every machine with budget until the
        // remainder is gone or the pass runs out of machines.
        for (idx, machine) in sorted.iter().enumerate() {
            let usable = machine.usable();
            if counts[idx] >= max_swipes || usable < MIN_SLICE {
                continue;
            }
            let base = usable.min(remaining as u64);
            let amount = (base - rand_adjust(rng, base)).max(MIN_SLICE);
            tracing::debug!(machine = %machine.name, amount, "greedy slice");
            lines.push((idx, amount));
            counts[idx] += 1;
            remaining -= amount as i64;
            progressed = true;
            if remaining <= 0 {
                break;
            }
        }

        if !progressed {
            // Stalled: every machine is at its swipe cap or has no usable
            // headroom. A remainder the placed lines can still soak up goes to
            // the repair pass; anything larger is a hard failure.
            let headroom: u64 = lines
                .iter()
                .map(|&(idx, amount)| sorted[idx].usable() - amount)
                .sum();
            if lines.is_empty() || remaining as u64 > headroom {
                return Err(SplitError::Exhausted {
                    remaining: remaining as u64,
                });
            }
            break;
        }
    }

    repair(total, &sorted, &mut lines);

    let sum: u64 = lines.iter().map(|&(_, amount)| amount).sum();
    assert_eq!(sum, total, "split plan does not sum to the requested total");

    Ok(lines
        .into_iter()
        .map(|(idx, amount)| SplitLine {
            machine: sorted[idx].name.clone(),
            amount,
        })
        .collect())
}

/// Absorb the difference between the greedy plan and the requested total.
///
/// Three escalating steps: one line that can take the whole difference and
/// stay non-round, then a non-round-preserving spread across lines, then a
/// forced spread that accepts round results. Exactness beats cosmetics.
fn repair(total: u64, machines: &[Machine], lines: &mut [(usize, u64)]) {
    let sum: i64 = lines.iter().map(|&(_, amount)| amount as i64).sum();
    let mut diff = total as i64 - sum;
    if diff == 0 {
        return;
    }
    tracing::debug!(diff, "repairing plan total");

    // Step 1: a single line absorbs the whole difference.
    for line in lines.iter_mut() {
        let headroom = (machines[line.0].usable() - line.1) as i64;
        let adjusted = line.1 as i64 + diff;
        let fits = if diff > 0 {
            diff <= headroom
        } else {
            -diff < line.1 as i64 - MIN_SLICE as i64
        };
        if fits && is_non_round(adjusted as u64) {
            line.1 = adjusted as u64;
            diff = 0;
            break;
        }
    }

    // Step 2: spread bounded steps across lines, still keeping them non-round.
    if diff != 0 {
        for line in lines.iter_mut() {
            if diff == 0 {
                break;
            }
            let step = if diff > 0 {
                diff.min((machines[line.0].usable() - line.1) as i64)
            } else {
                -(-diff).min((line.1 as i64 - MIN_SLICE as i64).max(0))
            };
            if step == 0 {
                continue;
            }
            let adjusted = line.1 as i64 + step;
            if is_non_round(adjusted as u64) {
                line.1 = adjusted as u64;
                diff -= step;
            }
        }
    }

    // Step 3: force the remainder in, last line first, bounded only by
    // capacity and positivity. Round amounts are accepted here.
    if diff != 0 {
        tracing::warn!(diff, "forced absorption; plan may contain round amounts");
        for line in lines.iter_mut().rev() {
            if diff == 0 {
                break;
            }
            if diff > 0 {
                let step = diff.min((machines[line.0].usable() - line.1) as i64);
                line.1 = (line.1 as i64 + step) as u64;
                diff -= step;
            } else {
                let step = (-diff).min(line.1 as i64 - 1);
                line.1 -= step as u64;
                diff += step;
            }
        }
    }
}

/// Random shave that turns a round amount into a non-round one.
///
/// Already non-round amounts pass through untouched (returns 0). The upper
/// bound is clamped so the shaved amount never goes negative.
fn rand_adjust<R: Rng + ?Sized>(rng: &mut R, amount: u64) -> u64 {
    if is_non_round(amount) {
        return 0;
    }
    let high = ADJUST_HIGH.min((ADJUST_LOW + 1).max(amount.saturating_sub(1)));
    rng.gen_range(ADJUST_LOW..high)
}

/// Amounts divisible by 1000 look engineered; everything else passes.
fn is_non_round(amount: u64) -> bool {
    amount % 1_000 != 0
}
