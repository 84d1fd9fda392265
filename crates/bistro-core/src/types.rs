//! # Domain Types
//!
//! Core domain records used throughout Bistro.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                              │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    MenuItem     │   │      User       │   │      Order      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  name           │   │  cart:          │   │  user (id)      │   │
//! │  │  price (Money)  │   │   Vec<MenuItem> │   │  items:         │   │
//! │  │                 │   │                 │   │   Vec<MenuItem> │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  Identity lives in the enclosing StateDocument mappings: menu       │
//! │  items, users, and orders are keyed by string ids; the records      │
//! │  themselves carry no id field. That keeps cart and order entries    │
//! │  exact value snapshots of menu entries.                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! A cart entry is a *frozen copy* of the menu item at the moment it was
//! added; an order's items are the frozen cart at checkout. The
//! administrator can reprice or rename a menu item afterwards without
//! rewriting anybody's cart or order history.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on the menu, and equally a snapshot of one inside a cart or an
/// order.
///
/// The item id is the key of the `menu` mapping, not a field here, so a
/// snapshot is a plain value copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display name shown in chat ("Pizza").
    pub name: String,

    /// Price in whole currency units at the time this record was written.
    /// For cart/order entries this is the *frozen* price, not a reference
    /// to the current menu.
    pub price: Money,
}

impl MenuItem {
    /// Creates a new menu item.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        MenuItem {
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A chat user known to the system.
///
/// Created on first contact, never deleted. The only mutable state is the
/// cart; identity (the chat-account id) is the key of the `users` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Pending, unconfirmed selection. Ordered: items appear in the order
    /// they were added.
    pub cart: Vec<MenuItem>,
}

impl User {
    /// Sum of the cart's frozen prices.
    pub fn cart_total(&self) -> Money {
        self.cart.iter().map(|item| item.price).sum()
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Immutable once created; orders are never deleted (order ids are derived
/// from the order count and deletion would make them collide).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Id of the user who placed the order (back-reference into `users`,
    /// not ownership).
    pub user: String,

    /// The cart as it stood at checkout, frozen.
    pub items: Vec<MenuItem>,
}

impl Order {
    /// Sum of the order's frozen prices.
    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.price).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
