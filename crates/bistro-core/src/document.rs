//! # State Document
//!
//! The root aggregate: everything the system persists, plus every state
//! transition, as pure functions.
//!
//! ## Per-User State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Cart / Order Lifecycle                          │
//! │                                                                     │
//! │   first contact                                                     │
//! │        │                                                            │
//! │        ▼                                                            │
//! │   ensure_user ──────► ACTIVE (cart EMPTY)                           │
//! │                          │        ▲                                 │
//! │              add_to_cart │        │ clear_cart                      │
//! │                          ▼        │ place_order (emits Order)       │
//! │                       ACTIVE (cart NONEMPTY)                        │
//! │                                                                     │
//! │   Users have no terminal state; orders are append-only.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why BTreeMap?
//! The persisted document must serialize deterministically so that
//! load-then-save is byte-stable. BTreeMap iterates in key order, which
//! gives that for free; creation order of orders is recovered from the
//! numeric ids (orders are never deleted, so id order IS creation order).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{MenuItem, Order, User};

// =============================================================================
// State Document
// =============================================================================

/// The whole persisted state: users, menu, and orders.
///
/// Every mutation the system performs is a method on this type, so the
/// persistence layer can stay a thin `load → mutate → save` shell with no
/// business logic of its own.
///
/// Unknown top-level fields are rejected on deserialization: a document
/// with extra structure was written by something newer (or something else
/// entirely), and silently dropping its data on the next save would be
/// worse than failing the load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDocument {
    /// Chat users by external chat-account id.
    pub users: BTreeMap<String, User>,

    /// Menu items by item id.
    pub menu: BTreeMap<String, MenuItem>,

    /// Placed orders by order id (stringified creation index, starting
    /// at "1").
    pub orders: BTreeMap<String, Order>,
}

impl StateDocument {
    // =========================================================================
    // Users
    // =========================================================================

    /// Registers a user on first contact.
    ///
    /// Returns `true` if the user was created, `false` if already known.
    /// Idempotent; users are never deleted.
    pub fn ensure_user(&mut self, user_id: &str) -> bool {
        if self.users.contains_key(user_id) {
            return false;
        }
        self.users.insert(user_id.to_string(), User::default());
        true
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Appends a *value copy* of the menu item to the user's cart and
    /// returns the snapshot.
    ///
    /// ## Snapshot Semantics
    /// The copy is taken here. If the administrator later reprices or
    /// removes the menu item, this cart entry keeps the fields it had at
    /// add time.
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` if `item_id` is not on the menu; the cart
    /// is left unchanged.
    pub fn add_to_cart(&mut self, user_id: &str, item_id: &str) -> CoreResult<MenuItem> {
        let snapshot = self
            .menu
            .get(item_id)
            .cloned()
            .ok_or_else(|| CoreError::item_not_found(item_id))?;

        self.users
            .entry(user_id.to_string())
            .or_default()
            .cart
            .push(snapshot.clone());

        Ok(snapshot)
    }

    /// The user's pending cart, in add order. Empty for unknown users.
    pub fn cart(&self, user_id: &str) -> &[MenuItem] {
        self.users
            .get(user_id)
            .map(|user| user.cart.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of the cart's frozen prices. Zero for unknown users.
    pub fn cart_total(&self, user_id: &str) -> Money {
        self.users
            .get(user_id)
            .map(User::cart_total)
            .unwrap_or_else(Money::zero)
    }

    /// Empties the user's cart. No-op for unknown users.
    pub fn clear_cart(&mut self, user_id: &str) {
        if let Some(user) = self.users.get_mut(user_id) {
            user.cart.clear();
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Checkout: converts the user's cart into a new order and empties the
    /// cart.
    ///
    /// The order id is the stringified successor of the current order
    /// count — `"1"` for the first order ever placed. Orders are never
    /// deleted, so the count only grows and ids never collide (the caller
    /// is responsible for serializing concurrent checkouts; see
    /// bistro-store).
    ///
    /// ## Errors
    /// `CoreError::EmptyCart` if there is nothing to order; no order is
    /// created.
    pub fn place_order(&mut self, user_id: &str) -> CoreResult<String> {
        let user = self
            .users
            .entry(user_id.to_string())
            .or_default();

        if user.cart.is_empty() {
            return Err(CoreError::empty_cart(user_id));
        }

        let items = std::mem::take(&mut user.cart);
        let order_id = (self.orders.len() + 1).to_string();

        self.orders.insert(
            order_id.clone(),
            Order {
                user: user_id.to_string(),
                items,
            },
        );

        Ok(order_id)
    }

    /// The user's order history as `(order_id, order)` pairs, in creation
    /// order.
    ///
    /// Creation order is ascending numeric id; ids that don't parse (a
    /// document written by some other tool) sort after the numeric ones,
    /// lexicographically.
    pub fn orders_for_user<'a>(&'a self, user_id: &str) -> Vec<(&'a str, &'a Order)> {
        let mut orders: Vec<(&str, &Order)> = self
            .orders
            .iter()
            .filter(|(_, order)| order.user == user_id)
            .map(|(id, order)| (id.as_str(), order))
            .collect();

        orders.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });

        orders
    }

    // =========================================================================
    // Menu (administrator)
    // =========================================================================

    /// Inserts or overwrites a menu item.
    ///
    /// Overwriting does NOT touch existing cart or order entries for the
    /// same id; those are frozen snapshots.
    pub fn upsert_menu_item(&mut self, item_id: impl Into<String>, item: MenuItem) {
        self.menu.insert(item_id.into(), item);
    }

    /// Removes a menu item. Returns the removed item, if it existed.
    ///
    /// Existing carts keep their snapshots; the item simply stops being
    /// addable.
    pub fn remove_menu_item(&mut self, item_id: &str) -> Option<MenuItem> {
        self.menu.remove(item_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_menu() -> StateDocument {
        let mut doc = StateDocument::default();
        doc.upsert_menu_item("1", MenuItem::new("Pizza", Money::from_units(500)));
        doc.upsert_menu_item("2", MenuItem::new("Cola", Money::from_units(120)));
        doc
    }

    #[test]
    fn test_ensure_user_is_idempotent() {
        let mut doc = StateDocument::default();
        assert!(doc.ensure_user("42"));
        assert!(!doc.ensure_user("42"));
        assert_eq!(doc.users.len(), 1);
        assert!(doc.cart("42").is_empty());
    }

    #[test]
    fn test_cart_empty_for_unknown_user() {
        let doc = StateDocument::default();
        assert!(doc.cart("nobody").is_empty());
        assert_eq!(doc.cart_total("nobody"), Money::zero());
    }

    #[test]
    fn test_add_to_cart_appends_snapshot() {
        let mut doc = doc_with_menu();
        doc.ensure_user("42");

        let added = doc.add_to_cart("42", "1").unwrap();
        assert_eq!(added, MenuItem::new("Pizza", Money::from_units(500)));
        assert_eq!(doc.cart("42").len(), 1);

        doc.add_to_cart("42", "2").unwrap();
        assert_eq!(doc.cart("42").len(), 2);
        assert_eq!(doc.cart_total("42"), Money::from_units(620));
    }

    #[test]
    fn test_add_to_cart_missing_item_leaves_cart_unchanged() {
        let mut doc = doc_with_menu();
        doc.ensure_user("42");
        doc.add_to_cart("42", "1").unwrap();

        let err = doc.add_to_cart("42", "99").unwrap_err();
        assert_eq!(err, CoreError::item_not_found("99"));
        assert_eq!(doc.cart("42").len(), 1);
    }

    #[test]
    fn test_snapshot_survives_menu_reprice() {
        let mut doc = doc_with_menu();
        doc.add_to_cart("42", "1").unwrap();

        // Reprice the pizza after it was added.
        doc.upsert_menu_item("1", MenuItem::new("Pizza", Money::from_units(900)));

        assert_eq!(doc.cart("42")[0], MenuItem::new("Pizza", Money::from_units(500)));

        // New additions pick up the new price.
        doc.add_to_cart("42", "1").unwrap();
        assert_eq!(doc.cart("42")[1].price, Money::from_units(900));
    }

    #[test]
    fn test_snapshot_survives_menu_removal() {
        let mut doc = doc_with_menu();
        doc.add_to_cart("42", "1").unwrap();

        assert!(doc.remove_menu_item("1").is_some());
        assert_eq!(doc.cart("42").len(), 1);

        // But the item is no longer addable.
        let err = doc.add_to_cart("42", "1").unwrap_err();
        assert_eq!(err, CoreError::item_not_found("1"));
    }

    #[test]
    fn test_clear_cart() {
        let mut doc = doc_with_menu();
        doc.add_to_cart("42", "1").unwrap();
        doc.clear_cart("42");
        assert!(doc.cart("42").is_empty());

        // Unknown user: no-op, no panic.
        doc.clear_cart("nobody");
    }

    #[test]
    fn test_place_order_on_empty_cart_creates_nothing() {
        let mut doc = doc_with_menu();
        doc.ensure_user("42");

        let err = doc.place_order("42").unwrap_err();
        assert_eq!(err, CoreError::empty_cart("42"));
        assert!(doc.orders.is_empty());
    }

    #[test]
    fn test_place_order_moves_cart_into_order() {
        let mut doc = doc_with_menu();
        doc.add_to_cart("42", "1").unwrap();
        doc.add_to_cart("42", "2").unwrap();

        let order_id = doc.place_order("42").unwrap();
        assert_eq!(order_id, "1");
        assert!(doc.cart("42").is_empty());

        let order = &doc.orders["1"];
        assert_eq!(order.user, "42");
        assert_eq!(
            order.items,
            vec![
                MenuItem::new("Pizza", Money::from_units(500)),
                MenuItem::new("Cola", Money::from_units(120)),
            ]
        );
    }

    #[test]
    fn test_sequential_orders_get_sequential_ids() {
        let mut doc = doc_with_menu();

        doc.add_to_cart("42", "1").unwrap();
        assert_eq!(doc.place_order("42").unwrap(), "1");

        doc.add_to_cart("7", "2").unwrap();
        assert_eq!(doc.place_order("7").unwrap(), "2");
    }

    #[test]
    fn test_orders_for_user_filters_and_preserves_creation_order() {
        let mut doc = doc_with_menu();

        // Interleave two users' orders; push past "9" to catch
        // lexicographic-vs-numeric ordering bugs ("10" < "2" as strings).
        for round in 0..6 {
            for user in ["42", "7"] {
                doc.add_to_cart(user, if round % 2 == 0 { "1" } else { "2" })
                    .unwrap();
                doc.place_order(user).unwrap();
            }
        }
        assert_eq!(doc.orders.len(), 12);

        let mine = doc.orders_for_user("42");
        assert_eq!(mine.len(), 6);
        let ids: Vec<&str> = mine.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["1", "3", "5", "7", "9", "11"]);
        assert!(mine.iter().all(|(_, order)| order.user == "42"));

        assert!(doc.orders_for_user("nobody").is_empty());
    }

    #[test]
    fn test_spec_scenario_pizza() {
        // menu = {"1": {"name": "Pizza", "price": 500}}; user "42" adds it
        // and checks out.
        let mut doc = StateDocument::default();
        doc.upsert_menu_item("1", MenuItem::new("Pizza", Money::from_units(500)));
        doc.ensure_user("42");

        doc.add_to_cart("42", "1").unwrap();
        assert_eq!(doc.place_order("42").unwrap(), "1");

        let orders = doc.orders_for_user("42");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].1.user, "42");
        assert_eq!(
            orders[0].1.items,
            vec![MenuItem::new("Pizza", Money::from_units(500))]
        );
        assert!(doc.cart("42").is_empty());
    }

    #[test]
    fn test_document_round_trip_is_stable() {
        let mut doc = doc_with_menu();
        doc.add_to_cart("42", "1").unwrap();
        doc.place_order("42").unwrap();
        doc.add_to_cart("42", "2").unwrap();

        let first = serde_json::to_string(&doc).unwrap();
        let reloaded: StateDocument = serde_json::from_str(&first).unwrap();
        let second = serde_json::to_string(&reloaded).unwrap();

        assert_eq!(reloaded, doc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_top_level_field_is_rejected() {
        let raw = r#"{"users": {}, "menu": {}, "orders": {}, "sessions": {}}"#;
        let result: Result<StateDocument, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_record_is_rejected() {
        // Price must be a non-negative integer.
        let raw = r#"{"users": {}, "menu": {"1": {"name": "Pizza", "price": -5}}, "orders": {}}"#;
        let result: Result<StateDocument, _> = serde_json::from_str(raw);
        assert!(result.is_err());

        // Missing required field.
        let raw = r#"{"users": {}, "menu": {"1": {"name": "Pizza"}}, "orders": {}}"#;
        let result: Result<StateDocument, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }
}
