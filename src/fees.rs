//! Fee arithmetic for gestun quotes.
//!
//! Two quote bases mirror how the business talks about a deal:
//! - gross ("gesek kotor"): the card is charged a known amount and the fee
//!   comes out of it;
//! - net ("gesek bersih"): the customer wants a known transfer and the charge
//!   is grossed up to cover the fee.

use serde::{Deserialize, Serialize};

/// Standard fixed surcharges from the fee sheet, in rupiah.
pub mod surcharge {
    /// Administration for a first-time customer.
    pub const NEW_CUSTOMER_ADMIN: u64 = 10_000;
    /// Transfer to a non-BCA bank.
    pub const NON_BCA_TRANSFER: u64 = 10_000;
    /// Transaction on a physical EDC machine.
    pub const EDC_TRANSACTION: u64 = 3_000;
    /// QRIS payment arranged over WhatsApp.
    pub const QRIS_BY_WHATSAPP: u64 = 3_000;
}

/// Sell rate for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rate {
    /// Percentage of the charged amount, e.g. `2.5`.
    Percent(f64),
    /// Flat rupiah amount regardless of transaction size.
    Flat(u64),
}

/// Which side of the deal the customer fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteBasis {
    /// The charge is fixed; payout = charge - fee - surcharges.
    Gross,
    /// The payout is fixed; the charge is grossed up to cover fee and
    /// surcharges.
    Net,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FeeError {
    #[error("percentage rate must be at least 0 and below 100, got {0}")]
    RateOutOfRange(f64),
}

/// A fully computed quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Amount charged on the card.
    pub charge: u64,
    /// Fee kept by the service.
    pub fee: u64,
    /// Fixed surcharges on top of the rate.
    pub surcharges: u64,
    /// Amount transferred to the customer.
    pub payout: u64,
}

/// Compute a quote for `amount` on the given basis.
///
/// For [`QuoteBasis::Gross`], `amount` is the card charge; the payout is
/// clamped at zero when fee and surcharges exceed it. For [`QuoteBasis::Net`],
/// `amount` is the desired transfer and the charge is grossed up.
///
/// With a percentage rate on the net basis, `charge` and `fee` are each
/// rounded to whole rupiah independently, so reconciling
/// `charge - fee - surcharges` can land a rupiah off the requested net.
/// `payout` always reports the requested amount and is the authoritative
/// figure.
///
/// # Errors
/// [`FeeError::RateOutOfRange`] for a percentage rate outside `[0, 100)`.
pub fn quote(
    basis: QuoteBasis,
    amount: u64,
    rate: Rate,
    surcharges: u64,
) -> Result<Quote, FeeError> {
    if let Rate::Percent(p) = rate {
        if !(0.0..100.0).contains(&p) {
            return Err(FeeError::RateOutOfRange(p));
        }
    }

    Ok(match basis {
        QuoteBasis::Gross => {
            let fee = match rate {
                Rate::Percent(p) => (amount as f64 * p / 100.0).round() as u64,
                Rate::Flat(flat) => flat,
            };
            Quote {
                charge: amount,
                fee,
                surcharges,
                payout: amount.saturating_sub(fee).saturating_sub(surcharges),
            }
        }
        QuoteBasis::Net => {
            let (charge, fee) = match rate {
                Rate::Percent(p) => {
                    let keep = 1.0 - p / 100.0;
                    let charge = ((amount + surcharges) as f64 / keep).round() as u64;
                    let fee = (charge as f64 * p / 100.0).round() as u64;
                    (charge, fee)
                }
                Rate::Flat(flat) => (amount + surcharges + flat, flat),
            };
            Quote {
                charge,
                fee,
                surcharges,
                payout: amount,
            }
        }
    })
}

/// Fee taken out of a known gross charge at a percentage rate.
///
/// # Precondition
/// `percent < 100`.
pub fn gross_fee(charge: u64, percent: f64) -> u64 {
    debug_assert!(percent < 100.0);
    (charge as f64 * percent / 100.0).round() as u64
}

/// Fee required on top of a known net transfer to gross it up.
///
/// # Precondition
/// `percent < 100`.
pub fn net_fee(net: u64, percent: f64) -> u64 {
    debug_assert!(percent < 100.0);
    let grossed = net as f64 / (1.0 - percent / 100.0);
    (grossed - net as f64).round() as u64
}

/// Profit margin in percentage points after the merchant discount rate.
pub fn profit_margin_percent(sell_percent: f64, mdr_percent: f64) -> f64 {
    sell_percent - mdr_percent
}

/// Profit in rupiah after MDR, for a flat sell rate on a given basis amount.
/// Negative when the MDR eats the whole flat fee.
pub fn profit_margin_flat(flat_rate: u64, basis_amount: u64, mdr_percent: f64) -> i64 {
    let mdr = (basis_amount as f64 * mdr_percent / 100.0).round() as i64;
    flat_rate as i64 - mdr
}
