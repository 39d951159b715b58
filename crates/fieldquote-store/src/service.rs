//! # Quote Service
//!
//! Orchestration of quote operations: validation → calculation → lifecycle
//! → persistence. This is the layer API routes call into.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quote Operations                                  │
//! │                                                                         │
//! │  create_quote(draft)                                                    │
//! │    ├── validate draft (title, customer, item preconditions)             │
//! │    ├── materialize items, compute totals + profit estimate              │
//! │    └── repo.create                                                      │
//! │                                                                         │
//! │  update_quote(id, update)                                               │
//! │    ├── repo.get ──► NotFound?                                           │
//! │    ├── validate update                                                  │
//! │    ├── RECOMPUTE everything from raw inputs (recompute-on-write)        │
//! │    └── repo.update (last write wins)                                    │
//! │                                                                         │
//! │  set_status(id, target)                                                 │
//! │    ├── repo.get ──► NotFound?                                           │
//! │    ├── lifecycle::transition (InvalidStatus? nothing persisted)         │
//! │    └── repo.update                                                      │
//! │                                                                         │
//! │  delete_quote(id) ── unconditional, any status                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ServiceResult, StoreError};
use crate::repository::QuoteRepository;
use fieldquote_core::{
    calculator, lifecycle, validation, Quote, QuoteDraft, QuoteLineItem, QuoteStatus, QuoteUpdate,
};

/// Quote operations over any [`QuoteRepository`].
#[derive(Debug)]
pub struct QuoteService<R: QuoteRepository> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    /// Wraps a repository.
    pub fn new(repo: R) -> Self {
        QuoteService { repo }
    }

    /// Creates a quote from raw input.
    ///
    /// Derived fields are computed here and only here; whatever totals a
    /// client might have sent never existed on the input type. A quote is
    /// created in `draft` unless the draft names another known status
    /// explicitly; creating directly in `sent` stamps `sent_at`.
    pub async fn create_quote(&self, company_id: &str, draft: QuoteDraft) -> ServiceResult<Quote> {
        validation::validate_draft(&draft)?;

        let status = match draft.status.as_deref() {
            Some(value) => value.parse::<QuoteStatus>()?,
            None => QuoteStatus::Draft,
        };

        let now = Utc::now();
        let items: Vec<QuoteLineItem> =
            draft.items.iter().map(QuoteLineItem::from_input).collect();
        let totals =
            calculator::quote_totals(&items.iter().map(|i| i.totals()).collect::<Vec<_>>());

        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            customer_id: draft.customer_id.trim().to_string(),
            title: draft.title.trim().to_string(),
            items,
            status,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
            hours: draft.hours,
            material_cost: draft.material_cost,
            markup_percentage: draft.markup_percentage,
            profit_estimate: calculator::profit_estimate(
                totals.subtotal,
                draft.material_cost,
                draft.markup_percentage,
            ),
            created_at: now,
            updated_at: now,
            sent_at: (status == QuoteStatus::Sent).then_some(now),
            expires_at: draft.expires_at,
        };

        self.repo.create(&quote).await?;
        info!(id = %quote.id, status = %quote.status, total = quote.total, "Quote created");
        Ok(quote)
    }

    /// Fetches a quote; an unknown id (or another company's quote) is a
    /// NotFound error at this layer.
    pub async fn get_quote(&self, company_id: &str, id: &str) -> ServiceResult<Quote> {
        self.repo
            .get(company_id, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Quote", id).into())
    }

    /// Lists a company's quotes, newest first.
    pub async fn list_quotes(&self, company_id: &str) -> ServiceResult<Vec<Quote>> {
        Ok(self.repo.list(company_id).await?)
    }

    /// Replaces a quote's content and recomputes every derived field.
    ///
    /// `id`, `customer_id`, `created_at`, `status` and `sent_at` are
    /// preserved; status changes go through [`Self::set_status`] only.
    pub async fn update_quote(
        &self,
        company_id: &str,
        id: &str,
        update: QuoteUpdate,
    ) -> ServiceResult<Quote> {
        let existing = self.get_quote(company_id, id).await?;
        validation::validate_update(&update)?;

        let now = Utc::now();
        let items: Vec<QuoteLineItem> =
            update.items.iter().map(QuoteLineItem::from_input).collect();
        let totals =
            calculator::quote_totals(&items.iter().map(|i| i.totals()).collect::<Vec<_>>());

        let quote = Quote {
            title: update.title.trim().to_string(),
            items,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
            hours: update.hours,
            material_cost: update.material_cost,
            markup_percentage: update.markup_percentage,
            profit_estimate: calculator::profit_estimate(
                totals.subtotal,
                update.material_cost,
                update.markup_percentage,
            ),
            updated_at: now,
            expires_at: update.expires_at,
            ..existing
        };

        self.repo.update(&quote).await?;
        debug!(id = %quote.id, total = quote.total, "Quote updated");
        Ok(quote)
    }

    /// Requests a status transition by wire value.
    ///
    /// Fails with `InvalidStatus` for a target outside the known set, in
    /// which case nothing is persisted. Any known status is reachable from
    /// any other; transitioning into `sent` (re)stamps `sent_at`.
    pub async fn set_status(
        &self,
        company_id: &str,
        id: &str,
        target: &str,
    ) -> ServiceResult<Quote> {
        let existing = self.get_quote(company_id, id).await?;
        let updated = lifecycle::transition(&existing, target, Utc::now())?;

        self.repo.update(&updated).await?;
        info!(id = %updated.id, from = %existing.status, to = %updated.status, "Quote status changed");
        Ok(updated)
    }

    /// Deletes a quote by id, unconditionally (no status guard).
    pub async fn delete_quote(&self, company_id: &str, id: &str) -> ServiceResult<()> {
        self.repo.delete(company_id, id).await?;
        info!(id = %id, "Quote deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::memory::MemoryStore;
    use fieldquote_core::{CoreError, LineItemInput, ValidationError};

    const COMPANY: &str = "acme";

    fn service() -> QuoteService<MemoryStore> {
        QuoteService::new(MemoryStore::new())
    }

    fn item(name: &str, quantity: f64, unit_price: f64, tax_rate: f64) -> LineItemInput {
        LineItemInput {
            name: name.to_string(),
            description: None,
            quantity,
            unit_price,
            tax_rate,
        }
    }

    fn seed_draft() -> QuoteDraft {
        QuoteDraft {
            customer_id: "cust-1".to_string(),
            title: "Roof job".to_string(),
            items: vec![
                item("Roof repair", 1.0, 20000.0, 25.0),
                item("Gutter cleaning", 1.0, 5000.0, 25.0),
            ],
            status: None,
            hours: None,
            material_cost: None,
            markup_percentage: None,
            expires_at: None,
        }
    }

    /// The end-to-end seed fixture from the demo data.
    #[tokio::test]
    async fn test_create_computes_seed_fixture_totals() {
        let service = service();
        let quote = service.create_quote(COMPANY, seed_draft()).await.unwrap();

        assert_eq!(quote.status, QuoteStatus::Draft);
        assert_eq!(quote.subtotal, 25000.0);
        assert_eq!(quote.tax_amount, 6250.0);
        assert_eq!(quote.total, 31250.0);

        let items = &quote.items;
        assert_eq!(
            (items[0].subtotal, items[0].tax_amount, items[0].total),
            (20000.0, 5000.0, 25000.0)
        );
        assert_eq!(
            (items[1].subtotal, items[1].tax_amount, items[1].total),
            (5000.0, 1250.0, 6250.0)
        );

        // And it is actually persisted
        let loaded = service.get_quote(COMPANY, &quote.id).await.unwrap();
        assert_eq!(loaded.total, 31250.0);
    }

    #[tokio::test]
    async fn test_create_with_no_items_is_all_zeros() {
        let service = service();
        let mut draft = seed_draft();
        draft.items.clear();

        let quote = service.create_quote(COMPANY, draft).await.unwrap();
        assert_eq!(quote.subtotal, 0.0);
        assert_eq!(quote.tax_amount, 0.0);
        assert_eq!(quote.total, 0.0);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_items() {
        let service = service();
        let mut draft = seed_draft();
        draft.items.push(item("Bad", -1.0, 10.0, 0.0));

        let err = service.create_quote(COMPANY, draft).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_directly_in_sent_stamps_sent_at() {
        let service = service();
        let mut draft = seed_draft();
        draft.status = Some("sent".to_string());

        let quote = service.create_quote(COMPANY, draft).await.unwrap();
        assert_eq!(quote.status, QuoteStatus::Sent);
        assert!(quote.sent_at.is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_initial_status() {
        let service = service();
        let mut draft = seed_draft();
        draft.status = Some("archived".to_string());

        let err = service.create_quote(COMPANY, draft).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::InvalidStatus { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_recomputes_and_ignores_stale_totals() {
        let service = service();
        let quote = service.create_quote(COMPANY, seed_draft()).await.unwrap();

        let update = QuoteUpdate {
            title: "Roof job, revised".to_string(),
            items: vec![item("Roof repair", 2.0, 20000.0, 25.0)],
            hours: Some(24.0),
            material_cost: Some(10000.0),
            markup_percentage: Some(20.0),
            expires_at: None,
        };
        let updated = service
            .update_quote(COMPANY, &quote.id, update)
            .await
            .unwrap();

        assert_eq!(updated.subtotal, 40000.0);
        assert_eq!(updated.tax_amount, 10000.0);
        assert_eq!(updated.total, 50000.0);
        // (40000 + 10000) × 20 / 100
        assert_eq!(updated.profit_estimate, Some(10000.0));

        // Identity and lifecycle fields survive a content update
        assert_eq!(updated.id, quote.id);
        assert_eq!(updated.created_at, quote.created_at);
        assert_eq!(updated.status, quote.status);
        assert_eq!(updated.sent_at, quote.sent_at);
    }

    #[tokio::test]
    async fn test_set_status_permissive_and_resend_overwrites() {
        let service = service();
        let quote = service.create_quote(COMPANY, seed_draft()).await.unwrap();

        let sent = service.set_status(COMPANY, &quote.id, "sent").await.unwrap();
        let first_sent_at = sent.sent_at.unwrap();

        // Terminal-looking states transition freely
        let accepted = service
            .set_status(COMPANY, &quote.id, "accepted")
            .await
            .unwrap();
        assert_eq!(accepted.status, QuoteStatus::Accepted);
        assert_eq!(accepted.sent_at, Some(first_sent_at));

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        // Re-sending from accepted refreshes the timestamp
        let resent = service.set_status(COMPANY, &quote.id, "sent").await.unwrap();
        let second_sent_at = resent.sent_at.unwrap();
        assert!(second_sent_at > first_sent_at);
    }

    #[tokio::test]
    async fn test_set_status_invalid_target_persists_nothing() {
        let service = service();
        let quote = service.create_quote(COMPANY, seed_draft()).await.unwrap();

        let err = service
            .set_status(COMPANY, &quote.id, "bogus")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::InvalidStatus { .. })
        ));

        let stored = service.get_quote(COMPANY, &quote.id).await.unwrap();
        assert_eq!(stored.status, QuoteStatus::Draft);
        assert!(stored.sent_at.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let service = service();
        let quote = service.create_quote(COMPANY, seed_draft()).await.unwrap();
        service.set_status(COMPANY, &quote.id, "accepted").await.unwrap();

        // Deleting an accepted quote succeeds; there is no status guard
        service.delete_quote(COMPANY, &quote.id).await.unwrap();

        let err = service.get_quote(COMPANY, &quote.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_scopes_to_company() {
        let service = service();
        service.create_quote(COMPANY, seed_draft()).await.unwrap();
        service.create_quote("globex", seed_draft()).await.unwrap();

        assert_eq!(service.list_quotes(COMPANY).await.unwrap().len(), 1);
        assert_eq!(service.list_quotes("globex").await.unwrap().len(), 1);
        assert!(service.list_quotes("initech").await.unwrap().is_empty());
    }
}
