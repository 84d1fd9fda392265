//! # bistro-store: Persistence Layer for Bistro
//!
//! This crate provides durable, whole-document persistence for the Bistro
//! state document, and the store operations the chat transport calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Data Flow                             │
//! │                                                                     │
//! │  Chat transport ("add to cart" button press)                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  bistro-store (THIS CRATE)                  │   │
//! │  │                                                             │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌─────────────┐  │   │
//! │  │   │  StateStore   │   │ StateBackend  │   │   errors    │  │   │
//! │  │   │  (store.rs)   │   │ (backend.rs)  │   │ (error.rs)  │  │   │
//! │  │   │               │   │               │   │             │  │   │
//! │  │   │ lock          │──►│ FileBackend   │   │StorageError │  │   │
//! │  │   │ load/mutate/  │   │ MemoryBackend │   │ StoreError  │  │   │
//! │  │   │ save          │   │               │   │             │  │   │
//! │  │   └───────────────┘   └───────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Single JSON document:  {"users": {}, "menu": {}, "orders": {}}     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - StoreConfig and the StateStore facade
//! - [`backend`] - StateBackend trait, file and in-memory implementations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_store::{StateStore, StoreConfig};
//!
//! // Open (and bootstrap, on first run) the state file
//! let store = StateStore::open(StoreConfig::new("data.json")).await?;
//!
//! // One user action = one load/mutate/save cycle
//! store.ensure_user("42").await?;
//! let added = store.add_to_cart("42", "1").await?;
//! let order_id = store.place_order("42").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileBackend, MemoryBackend, StateBackend};
pub use error::{StorageError, StoreError, StoreResult};
pub use store::{StateStore, StoreConfig};
