//! # Seed Data Generator
//!
//! Populates the state file with a development menu.
//!
//! ## Usage
//! ```bash
//! # Seed the default state file (./data.json)
//! cargo run -p bistro-store --bin seed
//!
//! # Specify the state file path
//! cargo run -p bistro-store --bin seed -- --state ./var/data.json
//! ```
//!
//! Existing users and orders are untouched; menu entries with the same id
//! are overwritten (existing carts keep their snapshots either way).

use bistro_core::Money;
use bistro_store::{StateStore, StoreConfig, StoreResult};
use std::env;

/// Development menu: (item id, name, price in whole units).
const MENU: &[(&str, &str, u64)] = &[
    ("1", "Pizza Margherita", 500),
    ("2", "Pizza Pepperoni", 560),
    ("3", "Pasta Carbonara", 430),
    ("4", "Caesar Salad", 320),
    ("5", "Borscht", 280),
    ("6", "Pelmeni", 350),
    ("7", "Grilled Chicken", 480),
    ("8", "French Fries", 150),
    ("9", "Cheesecake", 240),
    ("10", "Ice Cream", 180),
    ("11", "Cola", 120),
    ("12", "Fresh Orange Juice", 200),
    ("13", "Tea", 80),
    ("14", "Coffee", 140),
];

#[tokio::main]
async fn main() -> StoreResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = parse_state_path().unwrap_or_else(|| "data.json".to_string());

    let store = StateStore::open(StoreConfig::new(&path)).await?;

    for &(item_id, name, price) in MENU {
        store
            .add_menu_item(item_id, name, Money::from_units(price))
            .await?;
    }

    let menu = store.menu().await?;
    println!("Seeded {} menu items into {}", menu.len(), path);

    Ok(())
}

/// Pulls `--state <path>` out of the argument list, if present.
fn parse_state_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--state")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
