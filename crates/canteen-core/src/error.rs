//! # Error Types
//!
//! Domain-specific error types for canteen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  canteen-core errors (this file)                                    │
//! │  ├── CartError        - stock ceilings, bad line indices            │
//! │  └── SettlementError  - tender validation failures                  │
//! │                                                                     │
//! │  canteen-checkout errors (separate crate)                           │
//! │  └── CheckoutError    - remote rejection, transport failures        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant carries a human-readable message (via `thiserror`) plus a
//! stable `kind()` string, so the UI shell can pick toast vs. inline-field
//! feedback without string-matching messages.

use thiserror::Error;

use crate::types::Portion;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors raised by cart mutations.
///
/// All of these are detected before any mutation: a failing operation
/// leaves the cart exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested portion is not offered (or has no price) for the item.
    #[error("{item} is not available as a {portion} portion")]
    PortionUnavailable { item: String, portion: Portion },

    /// Adding/incrementing would exceed the item's counted stock.
    ///
    /// Only raised for stock-tracked items; made-to-order items are never
    /// blocked locally (the server validates ingredient stock at checkout).
    #[error("only {available} of {item} in stock ({in_cart} already in cart)")]
    StockExceeded {
        item: String,
        available: i64,
        in_cart: i64,
    },

    /// The line index does not exist in the cart.
    #[error("no cart line at index {index}")]
    LineNotFound { index: usize },

    /// The cart already holds the maximum number of distinct lines.
    #[error("cart cannot have more than {max} lines")]
    CartFull { max: usize },

    /// A single line's quantity would exceed the allowed maximum.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },
}

impl CartError {
    /// Stable machine-distinguishable kind for UI mapping.
    pub const fn kind(&self) -> &'static str {
        match self {
            CartError::PortionUnavailable { .. } => "portion_unavailable",
            CartError::StockExceeded { .. } => "stock_exceeded",
            CartError::LineNotFound { .. } => "line_not_found",
            CartError::CartFull { .. } => "cart_full",
            CartError::QuantityTooLarge { .. } => "quantity_too_large",
        }
    }
}

// =============================================================================
// Settlement Error
// =============================================================================

/// Tender validation failures, evaluated in a fixed order before any
/// network call. Always recoverable by adjusting cart/payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Checkout attempted with no lines in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Credit or mixed tender selected without a linked account.
    #[error("a linked account is required for credit/mixed payment")]
    MissingAccount,

    /// Mixed tender without a positive cash amount.
    #[error("cash amount must be entered and greater than zero")]
    InvalidCashAmount,

    /// Mixed tender where cash covers the whole total. A UX guard: the
    /// cashier should use plain cash settlement instead.
    #[error("cash amount must be less than the total for mixed payment (use cash instead)")]
    CashCoversFullAmount,
}

impl SettlementError {
    /// Stable machine-distinguishable kind for UI mapping.
    pub const fn kind(&self) -> &'static str {
        match self {
            SettlementError::EmptyCart => "empty_cart",
            SettlementError::MissingAccount => "missing_account",
            SettlementError::InvalidCashAmount => "invalid_cash_amount",
            SettlementError::CashCoversFullAmount => "cash_covers_full_amount",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_messages() {
        let err = CartError::StockExceeded {
            item: "Samosa".to_string(),
            available: 2,
            in_cart: 2,
        };
        assert_eq!(
            err.to_string(),
            "only 2 of Samosa in stock (2 already in cart)"
        );
        assert_eq!(err.kind(), "stock_exceeded");
    }

    #[test]
    fn test_settlement_error_kinds() {
        assert_eq!(SettlementError::EmptyCart.kind(), "empty_cart");
        assert_eq!(
            SettlementError::CashCoversFullAmount.kind(),
            "cash_covers_full_amount"
        );
    }
}
