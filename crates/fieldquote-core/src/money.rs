//! # Money Module
//!
//! Monetary rounding for quote calculations.
//!
//! ## Why f64 With Explicit Rounding?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE COMPATIBILITY PROBLEM                                              │
//! │                                                                         │
//! │  Quote totals are contractually defined by double-precision math:       │
//! │    round2(x) == Math.round(x * 100) / 100                               │
//! │                                                                         │
//! │  3 × 3.335 is NOT 10.005 in IEEE-754 — it lands a hair below it and     │
//! │  must round DOWN to 10.00. Exact-decimal arithmetic would say 10.01.    │
//! │  Which way a .005 boundary falls depends on the double representation,  │
//! │  and the stored fixtures bake those representations in.                 │
//! │                                                                         │
//! │  OUR SOLUTION: keep f64 end-to-end and round at every step              │
//! │  (subtotal, then tax, then total) so stored totals reproduce the        │
//! │  reference fixtures bit-for-bit.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fieldquote_core::money::round2;
//!
//! assert_eq!(round2(10.005), 10.01);
//! assert_eq!(round2(3.0 * 33.335), 100.01);
//! ```

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a monetary value to 2 decimal places, half away from zero.
///
/// ## Contract
/// Matches `Math.round(x * 100) / 100` for the non-negative values quote
/// math produces. `f64::round` ties away from zero, which is exactly the
/// `round2` the quote fixtures were generated with.
///
/// Negative amounts never reach this function: validation rejects negative
/// prices before any calculation runs.
///
/// ## Example
/// ```rust
/// use fieldquote_core::money::round2;
///
/// assert_eq!(round2(25.0025), 25.00);
/// assert_eq!(round2(1.005), 1.0); // 1.005 sits just BELOW the tie in f64
/// ```
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount the way receipts and quote PDFs display it.
///
/// For debugging and the seed tool only. The frontend formats for locale.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

// =============================================================================
// Unit Tests
// =============================================================================
