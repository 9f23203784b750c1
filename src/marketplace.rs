//! Settlement estimates for marketplace checkouts cashed out through gestun.
//!
//! A checkout amount loses a merchant fee (marketplace side), a gestun fee
//! (cash-out side), and whatever fixed costs apply. The estimate returns an
//! itemized breakdown so the operator can show the customer where the money
//! went.

use serde::{Deserialize, Serialize};

/// Marketplace shop fee (Tokopedia only), in rupiah.
pub const SHOP_FEE: u64 = 10_000;

/// Super-kilat handling for marketplace cash-outs, in rupiah.
pub const SUPER_KILAT_FEE: u64 = 30_000;

/// One deduction in the settlement breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostItem {
    pub label: String,
    pub amount: u64,
}

impl CostItem {
    pub fn new(label: impl Into<String>, amount: u64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Inputs for a settlement estimate.
#[derive(Debug, Clone)]
pub struct SettlementRequest {
    /// Checkout amount on the marketplace, in rupiah.
    pub checkout: u64,
    /// Marketplace merchant fee; `None` when the seller absorbs it.
    pub merchant_fee_percent: Option<f64>,
    /// Gestun cash-out fee.
    pub gestun_fee_percent: f64,
    /// Fixed costs that apply to this deal (shop fee, super kilat, admin,
    /// transfer), in presentation order.
    pub extras: Vec<CostItem>,
}

/// An itemized settlement estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Deductions in presentation order: merchant fee, gestun fee, extras.
    pub items: Vec<CostItem>,
    pub total_deductions: u64,
    /// Estimated amount received, clamped at zero.
    pub payout: u64,
}

/// Estimate the payout for a marketplace checkout.
pub fn estimate(request: &SettlementRequest) -> Settlement {
    let mut items = Vec::with_capacity(request.extras.len() + 2);

    match request.merchant_fee_percent {
        Some(percent) => {
            let amount = (request.checkout as f64 * percent / 100.0).round() as u64;
            items.push(CostItem::new(format!("Merchant fee ({}%)", percent), amount));
        }
        None => items.push(CostItem::new("Merchant fee (none)", 0)),
    }

    let gestun = (request.checkout as f64 * request.gestun_fee_percent / 100.0).round() as u64;
    items.push(CostItem::new(
        format!("Gestun fee ({}%)", request.gestun_fee_percent),
        gestun,
    ));

    items.extend(request.extras.iter().cloned());

    let total_deductions = items.iter().map(|item| item.amount).sum();
    Settlement {
        payout: request.checkout.saturating_sub(total_deductions),
        total_deductions,
        items,
    }
}
