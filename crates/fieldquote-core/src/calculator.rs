//! # Quote Calculator
//!
//! Pure computation of monetary fields from line-item inputs.
//! No I/O, no mutation of shared state, no clock access.
//!
//! ## Rounding Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Three-Step Rounding Order                            │
//! │                                                                         │
//! │  quantity × unit_price                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round2 ──► subtotal          (1st rounding)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal × tax_rate / 100                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round2 ──► tax_amount        (2nd rounding)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal + tax_amount                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round2 ──► total             (3rd rounding)                            │
//! │                                                                         │
//! │  The order is part of the contract: tax is computed from the ROUNDED    │
//! │  subtotal. qty=3, price=33.335, rate=25 gives 100.01 / 25.00 / 125.01;  │
//! │  rounding once at the end would diverge on such boundaries.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quote-level totals sum the already-rounded per-item values and round each
//! sum again (sum-of-rounded-parts; the final round2 only guards against
//! floating-point summation drift).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round2;

// =============================================================================
// Output Types
// =============================================================================

/// Derived monetary fields of a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Aggregated monetary fields of a whole quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

// =============================================================================
// Per-Item Calculation
// =============================================================================

/// Computes the derived monetary fields of one line item.
///
/// ## Preconditions (caller contract, see [`crate::validation`])
/// - `quantity > 0`
/// - `unit_price >= 0`
/// - `0 <= tax_rate <= 100`
///
/// Violations are rejected by the validation step before this runs; this
/// function does not re-check them.
///
/// ## Example
/// ```rust
/// use fieldquote_core::calculator::line_item_totals;
///
/// let t = line_item_totals(1.0, 20000.0, 25.0);
/// assert_eq!(t.subtotal, 20000.0);
/// assert_eq!(t.tax_amount, 5000.0);
/// assert_eq!(t.total, 25000.0);
/// ```
pub fn line_item_totals(quantity: f64, unit_price: f64, tax_rate: f64) -> LineItemTotals {
    let subtotal = round2(quantity * unit_price);
    let tax_amount = round2(subtotal * tax_rate / 100.0);
    let total = round2(subtotal + tax_amount);

    LineItemTotals {
        subtotal,
        tax_amount,
        total,
    }
}

// =============================================================================
// Quote-Level Aggregation
// =============================================================================

/// Sums already-rounded per-item totals into quote-level totals.
///
/// Each field is summed independently and rounded again. The inputs are
/// rounded values, so the second round2 only absorbs summation drift; it
/// never re-derives anything from raw quantities. An empty item list yields
/// all zeros.
pub fn quote_totals(items: &[LineItemTotals]) -> QuoteTotals {
    let mut subtotal = 0.0;
    let mut tax_amount = 0.0;
    let mut total = 0.0;

    for item in items {
        subtotal += item.subtotal;
        tax_amount += item.tax_amount;
        total += item.total;
    }

    QuoteTotals {
        subtotal: round2(subtotal),
        tax_amount: round2(tax_amount),
        total: round2(total),
    }
}

// =============================================================================
// Profit Estimation
// =============================================================================

/// Estimates profit from the quote's costing inputs.
///
/// `(subtotal + material_cost) × markup_percentage / 100`, present only when
/// both `material_cost` and `markup_percentage` are present. Not rounded:
/// this is an internal estimate, never a billed amount.
pub fn profit_estimate(
    subtotal: f64,
    material_cost: Option<f64>,
    markup_percentage: Option<f64>,
) -> Option<f64> {
    match (material_cost, markup_percentage) {
        (Some(material), Some(markup)) => Some((subtotal + material) * markup / 100.0),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_item_totals() {
        let t = line_item_totals(2.0, 10.0, 10.0);
        assert_eq!(t.subtotal, 20.0);
        assert_eq!(t.tax_amount, 2.0);
        assert_eq!(t.total, 22.0);
    }

    #[test]
    fn test_zero_price_and_zero_tax() {
        let t = line_item_totals(5.0, 0.0, 25.0);
        assert_eq!(t.subtotal, 0.0);
        assert_eq!(t.tax_amount, 0.0);
        assert_eq!(t.total, 0.0);

        let t = line_item_totals(3.0, 12.5, 0.0);
        assert_eq!(t.subtotal, 37.5);
        assert_eq!(t.tax_amount, 0.0);
        assert_eq!(t.total, 37.5);
    }

    /// The rounding-order contract: subtotal is rounded BEFORE tax is
    /// computed, and tax before the total. A single rounding pass at the
    /// end would give a different tax here.
    #[test]
    fn test_rounding_order_reference_fixture() {
        let t = line_item_totals(3.0, 33.335, 25.0);
        assert_eq!(t.subtotal, 100.01); // ×100 lands on the 10000.5 tie, rounds away
        assert_eq!(t.tax_amount, 25.0); // round2(100.01 × 0.25) = 25.00
        assert_eq!(t.total, 125.01);
    }

    /// Pure function: identical inputs always give identical outputs.
    #[test]
    fn test_recalculation_is_idempotent() {
        let a = line_item_totals(3.0, 33.335, 25.0);
        let b = line_item_totals(3.0, 33.335, 25.0);
        assert_eq!(a, b);

        let qa = quote_totals(&[a, b]);
        let qb = quote_totals(&[a, b]);
        assert_eq!(qa, qb);
    }

    #[test]
    fn test_empty_quote_is_all_zeros() {
        let t = quote_totals(&[]);
        assert_eq!(t.subtotal, 0.0);
        assert_eq!(t.tax_amount, 0.0);
        assert_eq!(t.total, 0.0);
    }

    /// Quote totals are sums of ROUNDED parts, not a global rounding pass
    /// over raw values. Three items whose raw subtotals are all 10.005
    /// (rounding up individually) sum to 30.03; rounding the raw sum
    /// 30.015 once would give 30.02.
    #[test]
    fn test_sum_of_rounded_parts_not_global_rounding() {
        let item = line_item_totals(1.0, 10.005, 0.0);
        assert_eq!(item.subtotal, 10.01);

        let t = quote_totals(&[item, item, item]);
        assert_eq!(t.subtotal, 30.03);
        assert_ne!(t.subtotal, round2(3.0 * 10.005)); // the global pass: 30.02
    }

    /// Float-edge quantities: 10.005 arrived at two different ways rounds
    /// two different ways, and the quote total honors each item's own
    /// rounded value.
    #[test]
    fn test_float_edge_items_round_individually() {
        let up = line_item_totals(1.0, 10.005, 0.0); // stored above the tie
        let down = line_item_totals(3.0, 3.335, 0.0); // raw 10.004999...
        assert_eq!(up.subtotal, 10.01);
        assert_eq!(down.subtotal, 10.0);

        let t = quote_totals(&[up, down]);
        assert_eq!(t.subtotal, 20.01);
    }

    /// The seed-data fixture: two items at 25% tax.
    #[test]
    fn test_seed_fixture_end_to_end() {
        let a = line_item_totals(1.0, 20000.0, 25.0);
        let b = line_item_totals(1.0, 5000.0, 25.0);

        assert_eq!((a.subtotal, a.tax_amount, a.total), (20000.0, 5000.0, 25000.0));
        assert_eq!((b.subtotal, b.tax_amount, b.total), (5000.0, 1250.0, 6250.0));

        let t = quote_totals(&[a, b]);
        assert_eq!(t.subtotal, 25000.0);
        assert_eq!(t.tax_amount, 6250.0);
        assert_eq!(t.total, 31250.0);
    }

    #[test]
    fn test_profit_estimate_requires_both_inputs() {
        assert_eq!(profit_estimate(1000.0, Some(200.0), Some(10.0)), Some(120.0));
        assert_eq!(profit_estimate(1000.0, None, Some(10.0)), None);
        assert_eq!(profit_estimate(1000.0, Some(200.0), None), None);
        assert_eq!(profit_estimate(1000.0, None, None), None);
    }
}
