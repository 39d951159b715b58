//! # fieldquote-store: Persistence Layer for FieldQuote
//!
//! This crate provides quote persistence behind a single repository
//! interface, plus the service layer that API routes call into.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      FieldQuote Data Flow                               │
//! │                                                                         │
//! │  API route (POST /api/quotes)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 fieldquote-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌───────────────────┐   ┌─────────────┐   │   │
//! │  │   │ QuoteService │──►│  QuoteRepository  │◄──│ migrations  │   │   │
//! │  │   │ (service.rs) │   │  (trait)          │   │ (embedded)  │   │   │
//! │  │   └──────────────┘   └─────┬──────┬──────┘   └─────────────┘   │   │
//! │  │                           ╱        ╲                           │   │
//! │  │                          ▼          ▼                          │   │
//! │  │                   MemoryStore   SqliteStore                    │   │
//! │  │                   (dev/tests)   (production)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or an in-process Vec for dev)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - The `QuoteRepository` trait (get/list/create/update/delete)
//! - [`memory`] - In-memory dev store (linear scans, no persistence)
//! - [`sqlite`] - Pooled SQLite store with embedded migrations
//! - [`service`] - `QuoteService`: validation → calculation → lifecycle → store
//! - [`error`] - Store and service error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fieldquote_store::{QuoteService, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::connect(StoreConfig::new("quotes.db")).await?;
//! let service = QuoteService::new(store);
//!
//! let quote = service.create_quote("company-1", draft).await?;
//! let sent = service.set_status("company-1", &quote.id, "sent").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod repository;
pub mod service;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ServiceError, ServiceResult, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::QuoteRepository;
pub use service::QuoteService;
pub use sqlite::{SqliteStore, StoreConfig};
