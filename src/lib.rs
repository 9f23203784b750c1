//! # gestun-core
//!
//! Calculation core for a card-cashing ("gestun") service: fee quotes,
//! marketplace settlement estimates, transfer-time estimates, and the split
//! planner that divides a large transaction across several EDC payment
//! terminals.
//!
//! The presentation layer (forms, receipt text, download buttons) lives
//! elsewhere; this crate only computes.
//!
//! ## Modules
//! - `split`: exact-total split planning across capacity-limited EDC machines
//! - `fees`: gross/net quotes, surcharges, profit margins
//! - `marketplace`: checkout settlement estimates with itemized deductions
//! - `schedule`: service tiers, durations, completion estimates in WIB
//! - `format`: rupiah and rate rendering
//! - `export`: CSV rendering of split plans

pub mod export;
pub mod fees;
pub mod format;
pub mod marketplace;
pub mod schedule;
pub mod split;

pub use fees::{Quote, QuoteBasis, Rate};
pub use split::{split_exact, Machine, SplitError, SplitLine};
