//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  bistro-core errors (this file)                                     │
//! │  └── CoreError       - Domain rule violations                      │
//! │                                                                     │
//! │  bistro-store errors (separate crate)                              │
//! │  ├── StorageError    - Persisted document unreadable/unwritable    │
//! │  └── StoreError      - Storage + Core, what callers see            │
//! │                                                                     │
//! │  Flow: CoreError → StoreError → transport → user-visible message   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, user id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent domain rule violations. They should be caught by
/// the transport layer and translated to user-friendly chat messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A menu item cannot be found.
    ///
    /// ## When This Occurs
    /// - The item id in an add-to-cart action doesn't exist in the menu
    /// - The administrator removed the item between menu display and the
    ///   button press (stale keyboard)
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Checkout attempted with nothing in the cart.
    ///
    /// ## When This Occurs
    /// - The user presses "place order" before adding any items
    /// - A previous checkout already emptied the cart (double press)
    #[error("Cart is empty for user {user_id}")]
    EmptyCart { user_id: String },
}

impl CoreError {
    /// Creates an ItemNotFound error.
    pub fn item_not_found(item_id: impl Into<String>) -> Self {
        CoreError::ItemNotFound(item_id.into())
    }

    /// Creates an EmptyCart error.
    pub fn empty_cart(user_id: impl Into<String>) -> Self {
        CoreError::EmptyCart {
            user_id: user_id.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::item_not_found("7");
        assert_eq!(err.to_string(), "Menu item not found: 7");

        let err = CoreError::empty_cart("42");
        assert_eq!(err.to_string(), "Cart is empty for user 42");
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(
            CoreError::item_not_found("7"),
            CoreError::ItemNotFound("7".to_string())
        );
        assert_ne!(
            CoreError::item_not_found("7"),
            CoreError::empty_cart("7")
        );
    }
}
