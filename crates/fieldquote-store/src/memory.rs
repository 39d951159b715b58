//! # In-Memory Store
//!
//! The development-mode "database": a process-wide mutable collection with
//! lifecycle tied to process start/stop and no persistence guarantee.
//!
//! ## Thread Safety
//! The collection is wrapped in `tokio::sync::RwLock` because:
//! 1. Multiple requests may read the quote list concurrently
//! 2. Only one request should modify it at a time
//! 3. Lookups are linear scans - fine for a dev store, never for production
//!
//! There is deliberately no version counter or conflict detection: two
//! simultaneous updates to the same quote race and the later write wins,
//! exactly like the surrounding system behaves.

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::QuoteRepository;
use async_trait::async_trait;
use fieldquote_core::Quote;

/// Array-backed quote store for development and tests.
///
/// ## Invariants
/// - Quote ids are unique within the collection
/// - `list` orders by `created_at` descending, matching the SQLite store,
///   even when a quote carries a backdated creation timestamp
#[derive(Debug, Default)]
pub struct MemoryStore {
    quotes: RwLock<Vec<Quote>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore {
            quotes: RwLock::new(Vec::new()),
        }
    }

    /// Number of quotes currently held (diagnostics and tests).
    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    /// Whether the store holds no quotes.
    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }
}

#[async_trait]
impl QuoteRepository for MemoryStore {
    async fn get(&self, company_id: &str, id: &str) -> StoreResult<Option<Quote>> {
        let quotes = self.quotes.read().await;
        Ok(quotes
            .iter()
            .find(|q| q.id == id && q.company_id == company_id)
            .cloned())
    }

    async fn list(&self, company_id: &str) -> StoreResult<Vec<Quote>> {
        let quotes = self.quotes.read().await;
        let mut listed: Vec<Quote> = quotes
            .iter()
            .rev()
            .filter(|q| q.company_id == company_id)
            .cloned()
            .collect();
        // Same ordering as the SQLite store's ORDER BY created_at DESC;
        // the stable sort keeps later insertions first among equal timestamps
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn create(&self, quote: &Quote) -> StoreResult<()> {
        debug!(id = %quote.id, company_id = %quote.company_id, "Creating quote (memory)");

        let mut quotes = self.quotes.write().await;
        if quotes.iter().any(|q| q.id == quote.id) {
            return Err(StoreError::Internal(format!(
                "duplicate quote id: {}",
                quote.id
            )));
        }
        quotes.push(quote.clone());
        Ok(())
    }

    async fn update(&self, quote: &Quote) -> StoreResult<()> {
        debug!(id = %quote.id, "Updating quote (memory)");

        let mut quotes = self.quotes.write().await;
        match quotes
            .iter()
            .position(|q| q.id == quote.id && q.company_id == quote.company_id)
        {
            Some(index) => {
                // Last write wins, no version check
                quotes[index] = quote.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("Quote", &quote.id)),
        }
    }

    async fn delete(&self, company_id: &str, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting quote (memory)");

        let mut quotes = self.quotes.write().await;
        match quotes
            .iter()
            .position(|q| q.id == id && q.company_id == company_id)
        {
            Some(index) => {
                quotes.remove(index);
                Ok(())
            }
            None => Err(StoreError::not_found("Quote", id)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldquote_core::QuoteStatus;

    fn quote(id: &str, company_id: &str) -> Quote {
        let now = Utc::now();
        Quote {
            id: id.to_string(),
            company_id: company_id.to_string(),
            customer_id: "cust-1".to_string(),
            title: "Fence repair".to_string(),
            items: vec![],
            status: QuoteStatus::Draft,
            subtotal: 0.0,
            tax_amount: 0.0,
            total: 0.0,
            hours: None,
            material_cost: None,
            markup_percentage: None,
            profit_estimate: None,
            created_at: now,
            updated_at: now,
            sent_at: None,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let store = MemoryStore::new();
        store.create(&quote("q-1", "acme")).await.unwrap();

        let found = store.get("acme", "q-1").await.unwrap();
        assert_eq!(found.unwrap().id, "q-1");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none_not_error() {
        let store = MemoryStore::new();
        assert!(store.get("acme", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_company_scoping() {
        let store = MemoryStore::new();
        store.create(&quote("q-1", "acme")).await.unwrap();

        // Another company can neither see nor delete it
        assert!(store.get("globex", "q-1").await.unwrap().is_none());
        let err = store.delete("globex", "q-1").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryStore::new();
        store.create(&quote("q-1", "acme")).await.unwrap();
        store.create(&quote("q-2", "acme")).await.unwrap();
        store.create(&quote("q-3", "globex")).await.unwrap();

        let listed = store.list("acme").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-2", "q-1"]);
    }

    /// Ordering follows `created_at`, not insertion order: a backdated
    /// quote inserted last still lists last, as it would in SQLite.
    #[tokio::test]
    async fn test_list_orders_by_created_at_not_insertion() {
        let store = MemoryStore::new();
        store.create(&quote("q-1", "acme")).await.unwrap();

        let mut backdated = quote("q-0", "acme");
        backdated.created_at = Utc::now() - chrono::Duration::hours(1);
        store.create(&backdated).await.unwrap();

        let listed = store.list("acme").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-1", "q-0"]);
    }

    #[tokio::test]
    async fn test_update_replaces_wholesale() {
        let store = MemoryStore::new();
        store.create(&quote("q-1", "acme")).await.unwrap();

        let mut changed = quote("q-1", "acme");
        changed.title = "Fence replacement".to_string();
        store.update(&changed).await.unwrap();

        let found = store.get("acme", "q-1").await.unwrap().unwrap();
        assert_eq!(found.title, "Fence replacement");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let store = MemoryStore::new();

        let err = store.update(&quote("ghost", "acme")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let err = store.delete("acme", "ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_regardless_of_status() {
        let store = MemoryStore::new();
        let mut accepted = quote("q-1", "acme");
        accepted.status = QuoteStatus::Accepted;
        store.create(&accepted).await.unwrap();

        // No guard against deleting non-draft quotes
        store.delete("acme", "q-1").await.unwrap();
        assert!(store.is_empty().await);
    }
}
