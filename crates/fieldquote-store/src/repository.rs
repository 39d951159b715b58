//! # Repository Interface
//!
//! The one seam between quote logic and storage representation.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  QuoteService                                                           │
//! │       │                                                                 │
//! │       │  repo.get(company_id, id)                                       │
//! │       ▼                                                                 │
//! │  QuoteRepository (trait)                                                │
//! │  ├── get(&self, company_id, id)                                         │
//! │  ├── list(&self, company_id)                                            │
//! │  ├── create(&self, quote)                                               │
//! │  ├── update(&self, quote)                                               │
//! │  └── delete(&self, company_id, id)                                      │
//! │       │                         │                                       │
//! │       ▼                         ▼                                       │
//! │  MemoryStore              SqliteStore                                   │
//! │  (dev / tests)            (production shape)                            │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Quote logic never depends on storage representation                  │
//! │  • The dev mock and the real store interchange freely                   │
//! │  • SQL is isolated in one place                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is scoped by `company_id`: a quote is only visible to the
//! company that owns it. A mismatched company behaves exactly like a missing
//! id (NotFound, never a permission hint).

use async_trait::async_trait;

use crate::error::StoreResult;
use fieldquote_core::Quote;

/// Storage capability set for quotes: `get / list / create / update / delete`.
///
/// ## Contract
/// - `get` returns `Ok(None)` for an unknown id; it is not an error to ask
/// - `update` and `delete` of an unknown id fail with `StoreError::NotFound`
/// - No conflict detection: concurrent updates to the same quote are
///   last-write-wins, inherited from the surrounding system
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Fetches a quote by id within a company.
    async fn get(&self, company_id: &str, id: &str) -> StoreResult<Option<Quote>>;

    /// Lists a company's quotes, most recently created first.
    async fn list(&self, company_id: &str) -> StoreResult<Vec<Quote>>;

    /// Persists a new quote (id assigned by the caller).
    async fn create(&self, quote: &Quote) -> StoreResult<()>;

    /// Replaces a stored quote wholesale, items included.
    async fn update(&self, quote: &Quote) -> StoreResult<()>;

    /// Deletes a quote unconditionally, regardless of status.
    async fn delete(&self, company_id: &str, id: &str) -> StoreResult<()>;
}
