//! # Validation Module
//!
//! Precondition checks for quote input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API route (Rust)                                             │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: calculation preconditions                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  └── NOT NULL / foreign key constraints (SQLite store)                 │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Violations are rejected, never coerced: a negative unit price is an error,
//! not something to clamp to zero. The calculators in [`crate::calculator`]
//! assume these checks have already passed.

use crate::error::ValidationError;
use crate::types::{LineItemInput, QuoteDraft, QuoteUpdate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a quote title.
///
/// The only rule is non-emptiness (after trimming); length is a display
/// concern, not a validation one.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    Ok(())
}

/// Validates a line-item display name.
///
/// Same rule as the quote title, reported against the `name` field.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be finite (JSON can't express NaN, but belt and braces)
/// - Must be strictly positive (> 0); fractional quantities are fine
///   (1.5 hours of labour)
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (>= 0); zero is allowed (free items)
pub fn validate_unit_price(unit_price: f64) -> ValidationResult<()> {
    if !unit_price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "unitPrice".to_string(),
        });
    }

    if unit_price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unitPrice".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate (percentage).
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_tax_rate(tax_rate: f64) -> ValidationResult<()> {
    if !tax_rate.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "taxRate".to_string(),
        });
    }

    if !(0.0..=100.0).contains(&tax_rate) {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates one line-item input (all calculation preconditions).
pub fn validate_line_item(item: &LineItemInput) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    validate_tax_rate(item.tax_rate)?;
    Ok(())
}

/// Validates a list of line-item inputs.
///
/// A quote may hold zero or more items; there is no count cap. Each item
/// must individually satisfy the calculation preconditions.
pub fn validate_items(items: &[LineItemInput]) -> ValidationResult<()> {
    for item in items {
        validate_line_item(item)?;
    }

    Ok(())
}

/// Validates a quote creation input.
pub fn validate_draft(draft: &QuoteDraft) -> ValidationResult<()> {
    if draft.customer_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customerId".to_string(),
        });
    }

    validate_title(&draft.title)?;
    validate_items(&draft.items)?;
    Ok(())
}

/// Validates a quote content update.
pub fn validate_update(update: &QuoteUpdate) -> ValidationResult<()> {
    validate_title(&update.title)?;
    validate_items(&update.items)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
