//! # State Store
//!
//! Store configuration and the StateStore facade.
//!
//! ## One Action, One Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Whole-Document Read-Modify-Write                   │
//! │                                                                     │
//! │  chat action ("add to cart")                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  lock ──► load ──► mutate (bistro-core) ──► save ──► unlock         │
//! │                                                                     │
//! │  • Nothing is cached between actions: every action sees the        │
//! │    document as persisted.                                          │
//! │  • A failed action saves nothing: all-or-nothing per call.         │
//! │  • The lock makes the store the single writer, so two concurrent   │
//! │    checkouts can never mint the same order id or overwrite each    │
//! │    other's changes.                                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock serializes within ONE store instance. Running two processes
//! against the same state file is unsupported, same as the system this
//! replaces.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use bistro_core::{MenuItem, Money, Order, StateDocument};

use crate::backend::{FileBackend, MemoryBackend, StateBackend};
use crate::error::{StorageError, StoreResult};

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data.json")
///     .pretty(false);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the JSON state file.
    pub path: PathBuf,

    /// Write human-readable, indented JSON.
    /// Default: true (the state file doubles as the admin's debugging view)
    pub pretty: bool,

    /// Bootstrap and persist an empty document when none exists.
    /// Default: true
    pub create_missing: bool,
}

impl StoreConfig {
    /// Creates a store configuration for the given state file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            pretty: true,
            create_missing: true,
        }
    }

    /// Sets whether the document is written indented.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets whether a missing document is bootstrapped on load.
    pub fn create_missing(mut self, create: bool) -> Self {
        self.create_missing = create;
        self
    }
}

// =============================================================================
// State Store
// =============================================================================

/// Durable, whole-document persistence of the Bistro state, and every
/// operation the chat transport calls.
///
/// All mutations go `lock → load → mutate → save`; the business rules
/// themselves live in [`bistro_core::StateDocument`]. Generic over the
/// backend so tests run against [`MemoryBackend`] and production against
/// [`FileBackend`].
#[derive(Debug)]
pub struct StateStore<B: StateBackend> {
    backend: B,
    pretty: bool,
    create_missing: bool,
    /// Single-writer serialization point for the load/mutate/save cycle.
    lock: Mutex<()>,
}

impl StateStore<FileBackend> {
    /// Opens a file-backed store and bootstraps the state file if needed.
    ///
    /// ## What This Does
    /// 1. Creates the [`FileBackend`] for `config.path`
    /// 2. Performs one load, which persists an empty document on first run
    ///    (when `create_missing` is set)
    /// 3. Fails with `StorageError` if the file exists but is unreadable
    ///    or corrupt
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.path.display(), "Opening state store");

        let store = StateStore {
            backend: FileBackend::new(&config.path),
            pretty: config.pretty,
            create_missing: config.create_missing,
            lock: Mutex::new(()),
        };

        // Surface unreadable/corrupt files at startup, not on the first
        // user action.
        let doc = store.load().await?;
        info!(
            users = doc.users.len(),
            menu_items = doc.menu.len(),
            orders = doc.orders.len(),
            "State store ready"
        );

        Ok(store)
    }
}

impl StateStore<MemoryBackend> {
    /// Creates an in-memory store (for tests and ephemeral runs).
    pub fn in_memory() -> Self {
        StateStore::with_backend(MemoryBackend::new())
    }
}

impl<B: StateBackend> StateStore<B> {
    /// Creates a store over an arbitrary backend, compact output,
    /// bootstrap enabled.
    pub fn with_backend(backend: B) -> Self {
        StateStore {
            backend,
            pretty: false,
            create_missing: true,
            lock: Mutex::new(()),
        }
    }

    // =========================================================================
    // Load / Save
    // =========================================================================

    /// Reads the persisted document.
    ///
    /// When no document exists yet and `create_missing` is set, an empty
    /// document is persisted and returned, so a fresh deployment starts
    /// from `{"users": {}, "menu": {}, "orders": {}}`.
    ///
    /// ## Errors
    /// `StorageError::Read` if the medium is unreadable,
    /// `StorageError::Corrupt` if the document doesn't parse or violates
    /// the schema. No partial recovery, no migration.
    pub async fn load(&self) -> StoreResult<StateDocument> {
        let _guard = self.lock.lock().await;
        self.load_locked().await
    }

    /// Serializes and overwrites the whole persisted document.
    pub async fn save(&self, doc: &StateDocument) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        self.save_locked(doc).await
    }

    /// Load half of a cycle; caller holds the lock.
    async fn load_locked(&self) -> StoreResult<StateDocument> {
        match self.backend.read().await? {
            Some(raw) => {
                let doc = serde_json::from_str(&raw).map_err(StorageError::corrupt)?;
                Ok(doc)
            }
            None if self.create_missing => {
                info!(backend = %self.backend.describe(), "No state document found, bootstrapping empty one");
                let doc = StateDocument::default();
                self.save_locked(&doc).await?;
                Ok(doc)
            }
            None => Ok(StateDocument::default()),
        }
    }

    /// Save half of a cycle; caller holds the lock.
    async fn save_locked(&self, doc: &StateDocument) -> StoreResult<()> {
        let raw = if self.pretty {
            serde_json::to_string_pretty(doc).map_err(StorageError::corrupt)?
        } else {
            serde_json::to_string(doc).map_err(StorageError::corrupt)?
        };
        self.backend.write(&raw).await?;
        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Registers a user on first contact. Idempotent; saves only when the
    /// user is actually new.
    pub async fn ensure_user(&self, user_id: &str) -> StoreResult<bool> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_locked().await?;

        let created = doc.ensure_user(user_id);
        if created {
            self.save_locked(&doc).await?;
            info!(user_id, "Registered new user");
        } else {
            debug!(user_id, "User already known");
        }

        Ok(created)
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// The current menu, keyed by item id.
    pub async fn menu(&self) -> StoreResult<BTreeMap<String, MenuItem>> {
        let _guard = self.lock.lock().await;
        let doc = self.load_locked().await?;
        Ok(doc.menu)
    }

    /// Administrator: inserts or overwrites a menu item.
    ///
    /// Overwriting never touches existing carts or orders; those hold
    /// frozen snapshots.
    pub async fn add_menu_item(
        &self,
        item_id: &str,
        name: &str,
        price: Money,
    ) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_locked().await?;

        doc.upsert_menu_item(item_id, MenuItem::new(name, price));
        self.save_locked(&doc).await?;

        info!(item_id, name, %price, "Menu item upserted");
        Ok(())
    }

    /// Administrator: removes a menu item. Returns it if it existed.
    pub async fn remove_menu_item(&self, item_id: &str) -> StoreResult<Option<MenuItem>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_locked().await?;

        let removed = doc.remove_menu_item(item_id);
        if removed.is_some() {
            self.save_locked(&doc).await?;
            info!(item_id, "Menu item removed");
        } else {
            debug!(item_id, "Menu item to remove was not on the menu");
        }

        Ok(removed)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Appends a snapshot of the menu item to the user's cart and returns
    /// the snapshot.
    pub async fn add_to_cart(&self, user_id: &str, item_id: &str) -> StoreResult<MenuItem> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_locked().await?;

        let snapshot = match doc.add_to_cart(user_id, item_id) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(user_id, item_id, %err, "Add to cart rejected");
                return Err(err.into());
            }
        };
        self.save_locked(&doc).await?;

        debug!(user_id, item_id, name = %snapshot.name, "Added item to cart");
        Ok(snapshot)
    }

    /// The user's pending cart, in add order.
    pub async fn cart(&self, user_id: &str) -> StoreResult<Vec<MenuItem>> {
        let _guard = self.lock.lock().await;
        let doc = self.load_locked().await?;
        Ok(doc.cart(user_id).to_vec())
    }

    /// Sum of the cart's frozen prices.
    pub async fn cart_total(&self, user_id: &str) -> StoreResult<Money> {
        let _guard = self.lock.lock().await;
        let doc = self.load_locked().await?;
        Ok(doc.cart_total(user_id))
    }

    /// Empties the user's cart.
    pub async fn clear_cart(&self, user_id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_locked().await?;

        doc.clear_cart(user_id);
        self.save_locked(&doc).await?;

        debug!(user_id, "Cleared cart");
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Checkout: converts the user's cart into a new order and returns the
    /// order id.
    pub async fn place_order(&self, user_id: &str) -> StoreResult<String> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_locked().await?;

        let order_id = match doc.place_order(user_id) {
            Ok(order_id) => order_id,
            Err(err) => {
                warn!(user_id, %err, "Checkout rejected");
                return Err(err.into());
            }
        };
        self.save_locked(&doc).await?;

        info!(user_id, order_id, "Order placed");
        Ok(order_id)
    }

    /// The user's order history as `(order_id, order)` pairs, in creation
    /// order.
    pub async fn orders_for_user(&self, user_id: &str) -> StoreResult<Vec<(String, Order)>> {
        let _guard = self.lock.lock().await;
        let doc = self.load_locked().await?;

        Ok(doc
            .orders_for_user(user_id)
            .into_iter()
            .map(|(id, order)| (id.to_string(), order.clone()))
            .collect())
    }

    /// Administrator: every order, keyed by order id.
    pub async fn all_orders(&self) -> StoreResult<BTreeMap<String, Order>> {
        let _guard = self.lock.lock().await;
        let doc = self.load_locked().await?;
        Ok(doc.orders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
