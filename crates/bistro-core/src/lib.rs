//! # bistro-core: Pure Business Logic for Bistro
//!
//! This crate is the **heart** of Bistro, a chat-driven ordering workflow.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Bistro Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Chat Transport (out of repo)                │   │
//! │  │    commands ──► button presses ──► formatted replies        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                  bistro-store (StateStore)                  │   │
//! │  │       lock ──► load ──► mutate ──► save, per action         │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                  │   │
//! │  │                                                             │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────────────┐    │   │
//! │  │   │   types   │  │   money   │  │      document       │    │   │
//! │  │   │ MenuItem  │  │   Money   │  │    StateDocument    │    │   │
//! │  │   │ User,Order│  │whole units│  │  cart/order logic   │    │   │
//! │  │   └───────────┘  └───────────┘  └─────────────────────┘    │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (MenuItem, User, Order)
//! - [`document`] - The StateDocument aggregate and all state transitions
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every transition is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Prices are whole currency units (u64), never floats
//! 4. **Snapshot Semantics**: Carts and orders hold value copies of menu
//!    items taken at action time; later menu edits never rewrite history
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::{Money, MenuItem, StateDocument};
//!
//! let mut doc = StateDocument::default();
//! doc.upsert_menu_item("1", MenuItem::new("Pizza", Money::from_units(500)));
//!
//! doc.ensure_user("42");
//! doc.add_to_cart("42", "1").unwrap();
//!
//! let order_id = doc.place_order("42").unwrap();
//! assert_eq!(order_id, "1");
//! assert!(doc.cart("42").is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bistro_core::Money` instead of
// `use bistro_core::money::Money`

pub use document::StateDocument;
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use types::{MenuItem, Order, User};
