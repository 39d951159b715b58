//! # Error Types
//!
//! Domain-specific error types for fieldquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fieldquote-core errors (this file)                                     │
//! │  ├── CoreError        - Domain errors (invalid status, ...)             │
//! │  └── ValidationError  - Input precondition failures                     │
//! │                                                                         │
//! │  fieldquote-store errors (separate crate)                               │
//! │  ├── StoreError       - Persistence failures (not found, query, ...)    │
//! │  └── ServiceError     - Core or Store, at the orchestration seam        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → API response        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Violations are rejected, never coerced (a negative price is an error,
//!    not something to clamp to zero)

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught by
/// the surrounding application and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status transition named a target outside the known set.
    ///
    /// ## When This Occurs
    /// - `transition(quote, "bogus")` with anything other than
    ///   `draft | sent | accepted | rejected | expired`
    ///
    /// The transition is atomic: when this error is returned, the quote
    /// is untouched.
    #[error("Invalid quote status: '{value}'")]
    InvalidStatus { value: String },

    /// Quote cannot be found.
    ///
    /// ## When This Occurs
    /// - Quote ID doesn't exist in the backing store
    /// - Quote was deleted by a concurrent request
    #[error("Quote not found: {0}")]
    QuoteNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet the calculation
/// preconditions. Validation is a distinct step that runs before any
/// calculation; the calculators assume validated input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value is not finite (NaN or infinity slipped through JSON parsing).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
