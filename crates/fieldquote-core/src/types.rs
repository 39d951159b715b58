//! # Domain Types
//!
//! Core domain types for FieldQuote quotes.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Quote       │   │  QuoteLineItem  │   │   QuoteStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  Draft          │       │
//! │  │  customer_id    │   │  name           │   │  Sent           │       │
//! │  │  status         │   │  quantity       │   │  Accepted       │       │
//! │  │  subtotal       │   │  unit_price     │   │  Rejected       │       │
//! │  │  tax_amount     │   │  tax_rate       │   │  Expired        │       │
//! │  │  total          │   │  subtotal/total │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Input DTOs (never carry derived fields):                               │
//! │  LineItemInput ──► QuoteDraft / QuoteUpdate                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recompute-On-Write
//! Derived monetary fields (`subtotal`, `tax_amount`, `total`,
//! `profit_estimate`) exist only on the output types. The input DTOs carry
//! the three raw item inputs and nothing else, so a caller can never smuggle
//! in stale or forged totals: every write recomputes from scratch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::calculator;
use crate::error::CoreError;

// =============================================================================
// Quote Status
// =============================================================================

/// The status of a quote.
///
/// ## Permissive Transition Table
/// Any status may transition to any other known status; the only invalid
/// request is one naming a status outside this set. See [`crate::lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// Quote is being drafted (items being edited).
    Draft,
    /// Quote has been sent to the customer.
    Sent,
    /// Customer accepted the quote.
    Accepted,
    /// Customer rejected the quote.
    Rejected,
    /// Quote lapsed without a decision.
    Expired,
}

impl QuoteStatus {
    /// All known statuses, in lifecycle order.
    pub const ALL: [QuoteStatus; 5] = [
        QuoteStatus::Draft,
        QuoteStatus::Sent,
        QuoteStatus::Accepted,
        QuoteStatus::Rejected,
        QuoteStatus::Expired,
    ];

    /// The lowercase wire representation (matches the JSON enum values).
    pub const fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Expired => "expired",
        }
    }
}

impl FromStr for QuoteStatus {
    type Err = CoreError;

    /// Parses the wire representation.
    ///
    /// Anything outside the five known values is an [`CoreError::InvalidStatus`],
    /// the single error condition of the lifecycle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QuoteStatus::Draft),
            "sent" => Ok(QuoteStatus::Sent),
            "accepted" => Ok(QuoteStatus::Accepted),
            "rejected" => Ok(QuoteStatus::Rejected),
            "expired" => Ok(QuoteStatus::Expired),
            other => Err(CoreError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for QuoteStatus {
    fn default() -> Self {
        QuoteStatus::Draft
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A single priced row within a quote.
///
/// `subtotal`, `tax_amount` and `total` are derived and always recomputed
/// from `quantity`, `unit_price` and `tax_rate`; they are never accepted
/// from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,

    /// Display name shown on the quote.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Quantity (> 0, decimal; 1.5 hours of labour is a valid quantity).
    pub quantity: f64,

    /// Price per unit (>= 0).
    pub unit_price: f64,

    /// Tax rate as a percentage in [0, 100].
    pub tax_rate: f64,

    /// Derived: round2(quantity × unit_price).
    pub subtotal: f64,

    /// Derived: round2(subtotal × tax_rate / 100).
    pub tax_amount: f64,

    /// Derived: round2(subtotal + tax_amount).
    pub total: f64,
}

impl QuoteLineItem {
    /// Materializes a line item from raw input, computing the derived fields.
    ///
    /// Input must already be validated (see [`crate::validation`]);
    /// calculation assumes its preconditions hold.
    pub fn from_input(input: &LineItemInput) -> Self {
        let totals =
            calculator::line_item_totals(input.quantity, input.unit_price, input.tax_rate);
        QuoteLineItem {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            quantity: input.quantity,
            unit_price: input.unit_price,
            tax_rate: input.tax_rate,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
        }
    }

    /// The already-rounded per-item totals, for quote-level aggregation.
    pub fn totals(&self) -> calculator::LineItemTotals {
        calculator::LineItemTotals {
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
            total: self.total,
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A quote: an ordered list of line items with aggregated totals and a
/// lifecycle status.
///
/// ## Ownership
/// A `Quote` is exclusively owned by the backing store. The core never holds
/// a long-lived reference: it receives a quote-shaped value, computes or
/// validates, and returns a new value for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Company (tenant) this quote belongs to. Resolved by the auth
    /// collaborator; carried here only for store scoping.
    pub company_id: String,

    /// Customer the quote is addressed to. Existence is the store's
    /// responsibility, not verified here.
    pub customer_id: String,

    /// Short title shown in lists.
    pub title: String,

    /// Ordered line items. Insertion order is significant for display,
    /// not for totals.
    pub items: Vec<QuoteLineItem>,

    /// Lifecycle status.
    pub status: QuoteStatus,

    /// Derived: round2(Σ item.subtotal) — sum of rounded parts.
    pub subtotal: f64,

    /// Derived: round2(Σ item.tax_amount).
    pub tax_amount: f64,

    /// Derived: round2(Σ item.total).
    pub total: f64,

    /// Estimated labour hours (profit estimation input only).
    pub hours: Option<f64>,

    /// Estimated material cost (profit estimation input only).
    pub material_cost: Option<f64>,

    /// Markup percentage (profit estimation input only).
    pub markup_percentage: Option<f64>,

    /// Derived: (subtotal + material_cost) × markup_percentage / 100,
    /// present only when both inputs are present.
    pub profit_estimate: Option<f64>,

    /// Set once at creation, immutable.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Bumped on every write.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    /// Stamped every time the quote transitions into `sent`
    /// (re-sending overwrites it).
    #[ts(as = "Option<String>")]
    pub sent_at: Option<DateTime<Utc>>,

    /// Advisory expiry supplied by the caller; the core never auto-expires.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Input DTOs
// =============================================================================

/// Raw line-item input, as received from the API layer.
///
/// Carries only the three calculation inputs plus display fields;
/// derived monetary fields cannot be expressed here at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub tax_rate: f64,
}

/// Input for creating a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub customer_id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    /// Optional explicit initial status; defaults to `draft`.
    /// Creating directly in `sent` stamps `sent_at`.
    pub status: Option<String>,
    pub hours: Option<f64>,
    pub material_cost: Option<f64>,
    pub markup_percentage: Option<f64>,
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Input for updating a quote's content.
///
/// Status is deliberately absent: status changes go through the lifecycle
/// transition operation, never through a content update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUpdate {
    pub title: String,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    pub hours: Option<f64>,
    pub material_cost: Option<f64>,
    pub markup_percentage: Option<f64>,
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
