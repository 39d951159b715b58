//! # Quote Lifecycle
//!
//! Status transitions for quotes and the timestamp side effects they produce.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Permissive Transition Table                            │
//! │                                                                         │
//! │          draft ◄──────────────────────────┐                             │
//! │            │                              │                             │
//! │            ▼                              │                             │
//! │          sent ◄───────────────┐           │                             │
//! │         ╱  │  ╲               │           │                             │
//! │        ▼   ▼   ▼              │           │                             │
//! │  accepted rejected expired ───┴───────────┘                             │
//! │                                                                         │
//! │  The arrows above are the EXPECTED flow, but the table is permissive:   │
//! │  ANY status may transition to ANY known status. The only validation     │
//! │  is that the target is one of the five enumerated values. Restricting   │
//! │  terminal states is an unresolved product question; current behavior    │
//! │  is preserved deliberately.                                             │
//! │                                                                         │
//! │  Side effect: target == sent  ⇒  sent_at = now (ALWAYS, overwriting     │
//! │  any previous value — re-sending a quote refreshes its timestamp).      │
//! │  No other target produces a timestamp side effect.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are pure: the function borrows the quote, returns a new one,
//! and takes the clock as a parameter. An invalid target returns an error
//! and the input is untouched (atomic by construction).

use chrono::{DateTime, Utc};

use crate::error::CoreResult;
use crate::types::{Quote, QuoteStatus};

// =============================================================================
// Transition
// =============================================================================

/// Applies a status transition with an already-parsed target.
///
/// Infallible: every known status is reachable from every status.
/// Stamps `sent_at` iff the target is [`QuoteStatus::Sent`] and bumps
/// `updated_at`; everything else is carried over unchanged.
pub fn apply(quote: &Quote, target: QuoteStatus, now: DateTime<Utc>) -> Quote {
    let mut updated = quote.clone();
    updated.status = target;
    updated.updated_at = now;

    // Triggered by the TARGET being sent, not by any prior-state condition:
    // re-sending overwrites the previous timestamp.
    if target == QuoteStatus::Sent {
        updated.sent_at = Some(now);
    }

    updated
}

/// Requests a status transition by wire value.
///
/// ## Errors
/// [`crate::error::CoreError::InvalidStatus`] when `target` is not one of
/// `draft | sent | accepted | rejected | expired`. This is the lifecycle's
/// only error condition; on error no mutation has occurred.
///
/// ## Example
/// ```rust,ignore
/// let sent = lifecycle::transition(&quote, "sent", Utc::now())?;
/// assert!(sent.sent_at.is_some());
/// ```
pub fn transition(quote: &Quote, target: &str, now: DateTime<Utc>) -> CoreResult<Quote> {
    let target: QuoteStatus = target.parse()?;
    Ok(apply(quote, target, now))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quote_in(status: QuoteStatus) -> Quote {
        let created = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
        Quote {
            id: "q-1".to_string(),
            company_id: "c-1".to_string(),
            customer_id: "cust-1".to_string(),
            title: "Bathroom refit".to_string(),
            items: vec![],
            status,
            subtotal: 0.0,
            tax_amount: 0.0,
            total: 0.0,
            hours: None,
            material_cost: None,
            markup_percentage: None,
            profit_estimate: None,
            created_at: created,
            updated_at: created,
            sent_at: None,
            expires_at: None,
        }
    }

    /// Every (state, target) pair of known statuses succeeds, including
    /// transitions out of accepted/rejected/expired and self-transitions.
    #[test]
    fn test_any_status_reaches_any_known_status() {
        let now = Utc::now();
        for from in QuoteStatus::ALL {
            for to in QuoteStatus::ALL {
                let quote = quote_in(from);
                let updated = transition(&quote, to.as_str(), now).unwrap();
                assert_eq!(updated.status, to, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_rejected_reachable_from_every_state() {
        let now = Utc::now();
        for from in QuoteStatus::ALL {
            let updated = transition(&quote_in(from), "rejected", now).unwrap();
            assert_eq!(updated.status, QuoteStatus::Rejected);
            assert!(updated.sent_at.is_none()); // only `sent` stamps a timestamp
        }
    }

    #[test]
    fn test_sent_stamps_sent_at() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let updated = transition(&quote_in(QuoteStatus::Draft), "sent", now).unwrap();
        assert_eq!(updated.status, QuoteStatus::Sent);
        assert_eq!(updated.sent_at, Some(now));
        assert_eq!(updated.updated_at, now);
    }

    /// Re-send semantics: a second transition into `sent` overwrites the
    /// first timestamp with the later one.
    #[test]
    fn test_resend_overwrites_sent_at() {
        let first = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 2, 3, 8, 30, 0).unwrap();

        let once = transition(&quote_in(QuoteStatus::Draft), "sent", first).unwrap();
        let twice = transition(&once, "sent", second).unwrap();

        assert_eq!(twice.sent_at, Some(second));
        assert_ne!(twice.sent_at, once.sent_at);
    }

    #[test]
    fn test_non_sent_targets_preserve_sent_at() {
        let sent_time = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 2, 9, 12, 0, 0).unwrap();

        let sent = transition(&quote_in(QuoteStatus::Draft), "sent", sent_time).unwrap();
        let accepted = transition(&sent, "accepted", later).unwrap();

        // sent_at is never reset by subsequent transitions
        assert_eq!(accepted.sent_at, Some(sent_time));
        assert_eq!(accepted.updated_at, later);
    }

    /// The only error condition: an unknown target. The input quote is
    /// borrowed, so failure cannot have mutated it.
    #[test]
    fn test_invalid_target_is_rejected_atomically() {
        let quote = quote_in(QuoteStatus::Sent);
        let before = quote.clone();

        let err = transition(&quote, "bogus", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoreError::InvalidStatus { ref value } if value == "bogus"
        ));
        assert_eq!(quote, before);
    }

    #[test]
    fn test_transition_touches_nothing_else() {
        let now = Utc::now();
        let quote = quote_in(QuoteStatus::Draft);
        let updated = transition(&quote, "expired", now).unwrap();

        assert_eq!(updated.id, quote.id);
        assert_eq!(updated.title, quote.title);
        assert_eq!(updated.created_at, quote.created_at);
        assert_eq!(updated.total, quote.total);
        assert_eq!(updated.customer_id, quote.customer_id);
    }
}
