//! # Money Type
//!
//! Integer-only money for menu prices and cart totals.
//!
//! ## Why Integers?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   The Floating Point Problem                        │
//! │                                                                     │
//! │  0.1 + 0.2 == 0.30000000000000004   ← never acceptable for money   │
//! │                                                                     │
//! │  Bistro prices are whole currency units (a menu says 500, not      │
//! │  499.99), so Money wraps a u64 unit count:                         │
//! │                                                                     │
//! │  Money::from_units(500)  ← "Pizza — 500"                           │
//! │  sum of cart prices      ← exact, no rounding anywhere             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why u64?
//! Prices are non-negative by the data model; unsigned makes negative
//! prices unrepresentable instead of merely invalid.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

// =============================================================================
// Money
// =============================================================================

/// A non-negative amount of money in whole currency units.
///
/// Serializes as a bare number (`500`, not `{"units": 500}`) so the
/// persisted document keeps the flat `{"name": "Pizza", "price": 500}`
/// shape.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Creates money from whole currency units.
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        Money(units)
    }

    /// Returns the amount in whole currency units.
    #[inline]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Saturating addition.
    ///
    /// A cart total can in principle exceed u64::MAX only with absurd
    /// inputs; saturating keeps the arithmetic total-function rather
    /// than panicking mid-checkout.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Display
// =============================================================================

/// Formats as the bare unit count; the transport layer appends whatever
/// currency marker the chat audience expects.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.saturating_add(other);
    }
}

/// Summation (for cart totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
