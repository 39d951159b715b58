//! # Seed Data Generator
//!
//! Populates a quote database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p fieldquote-store --bin seed
//!
//! # Specify database path
//! cargo run -p fieldquote-store --bin seed -- --db ./data/fieldquote.db
//! ```
//!
//! ## Generated Quotes
//! Creates the demo company's quotes, including the reference fixture used
//! throughout the test suite: a two-item roof job at 25% tax whose totals
//! are 25000 / 6250 / 31250.

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fieldquote_core::money::format_amount;
use fieldquote_core::{LineItemInput, QuoteDraft};
use fieldquote_store::{QuoteService, SqliteStore, StoreConfig};

/// Demo tenant everything is seeded under.
const DEMO_COMPANY_ID: &str = "00000000-0000-0000-0000-000000000001";
const DEMO_CUSTOMER_ID: &str = "00000000-0000-0000-0000-000000000101";

fn item(name: &str, quantity: f64, unit_price: f64, tax_rate: f64) -> LineItemInput {
    LineItemInput {
        name: name.to_string(),
        description: None,
        quantity,
        unit_price,
        tax_rate,
    }
}

fn demo_drafts() -> Vec<QuoteDraft> {
    vec![
        // The reference fixture: item totals {20000,5000,25000} and
        // {5000,1250,6250}, quote totals {25000, 6250, 31250}
        QuoteDraft {
            customer_id: DEMO_CUSTOMER_ID.to_string(),
            title: "Roof repair and gutters".to_string(),
            items: vec![
                item("Roof repair", 1.0, 20000.0, 25.0),
                item("Gutter cleaning", 1.0, 5000.0, 25.0),
            ],
            status: None,
            hours: Some(16.0),
            material_cost: Some(8000.0),
            markup_percentage: Some(15.0),
            expires_at: None,
        },
        QuoteDraft {
            customer_id: DEMO_CUSTOMER_ID.to_string(),
            title: "Bathroom refit".to_string(),
            items: vec![
                item("Demolition", 8.0, 450.0, 25.0),
                item("Tiling", 24.0, 520.0, 25.0),
                item("Plumbing fixtures", 1.0, 12500.0, 25.0),
            ],
            status: Some("sent".to_string()),
            hours: Some(32.0),
            material_cost: Some(15000.0),
            markup_percentage: Some(20.0),
            expires_at: None,
        },
        QuoteDraft {
            customer_id: DEMO_CUSTOMER_ID.to_string(),
            title: "Fence inspection".to_string(),
            items: vec![item("Site visit", 1.0, 0.0, 0.0)],
            status: None,
            hours: None,
            material_cost: None,
            markup_percentage: None,
            expires_at: None,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./fieldquote_dev.db");

    let mut i = 1;
    while i < args.len() {
        if args[i].as_str() == "--db" {
            if i + 1 < args.len() {
                db_path = args[i + 1].clone();
                i += 1;
            }
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding quote database");

    let store = SqliteStore::connect(StoreConfig::new(&db_path)).await?;
    let service = QuoteService::new(store);

    for draft in demo_drafts() {
        let quote = service.create_quote(DEMO_COMPANY_ID, draft).await?;
        info!(
            id = %quote.id,
            title = %quote.title,
            status = %quote.status,
            total = %format_amount(quote.total),
            "Seeded quote"
        );
    }

    info!("Seeding complete");
    Ok(())
}
