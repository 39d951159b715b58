//! # fieldquote-core: Pure Business Logic for FieldQuote
//!
//! This crate is the **heart** of FieldQuote, the quoting core of a
//! multi-tenant field-service CRM. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      FieldQuote Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Customer UI ──► Quote Editor ──► Send / Accept / Reject      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP (out of tree)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    API routes                                   │   │
//! │  │    list/create/read/update/delete quotes, set status            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ fieldquote-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ calculator │  │ lifecycle │  │ validation│  │   │
//! │  │   │   Quote   │  │ item/quote │  │ status    │  │   rules   │  │   │
//! │  │   │  LineItem │  │   totals   │  │ machine   │  │  checks   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               fieldquote-store (Persistence Layer)              │   │
//! │  │        repository trait, in-memory mock, SQLite store           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Quote, QuoteLineItem, QuoteStatus, input DTOs)
//! - [`money`] - round2 and monetary formatting
//! - [`calculator`] - Line-item and quote totals, profit estimation
//! - [`lifecycle`] - Status transition machine
//! - [`validation`] - Calculation preconditions
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **No Clock**: Time is always a parameter, never read
//! 4. **Recompute-On-Write**: Derived monetary fields are always recomputed
//!    from raw inputs and never accepted from a caller
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use fieldquote_core::calculator::{line_item_totals, quote_totals};
//!
//! let roof = line_item_totals(1.0, 20000.0, 25.0);
//! let gutters = line_item_totals(1.0, 5000.0, 25.0);
//!
//! let quote = quote_totals(&[roof, gutters]);
//! assert_eq!(quote.subtotal, 25000.0);
//! assert_eq!(quote.tax_amount, 6250.0);
//! assert_eq!(quote.total, 31250.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fieldquote_core::Quote` instead of
// `use fieldquote_core::types::Quote`

pub use calculator::{LineItemTotals, QuoteTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
