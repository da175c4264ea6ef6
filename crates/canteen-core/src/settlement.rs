//! # Settlement Engine
//!
//! Validates the chosen tender against the cart total and produces the
//! cash/credit split. A purely validating transform: no side effects, no
//! I/O, evaluated entirely before any network call.
//!
//! ## Rule Order
//! ```text
//! 1. cart must be non-empty                        → EmptyCart
//! 2. credit/mixed need a linked account            → MissingAccount
//! 3. mixed: cash tendered present and > 0          → InvalidCashAmount
//!           cash tendered strictly < cart total    → CashCoversFullAmount
//! 4. success: split per tender
//! ```
//!
//! `CashCoversFullAmount` is a deliberate UX guard, not a mathematical
//! necessity: when cash covers everything the cashier should settle as
//! plain cash.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::SettlementError;
use crate::money::Money;
use crate::types::PaymentType;

// =============================================================================
// Settlement Breakdown
// =============================================================================

/// How a cart total splits across cash and account credit.
///
/// Derived on demand, never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettlementBreakdown {
    pub total: Money,
    pub cash_portion: Money,
    pub credit_portion: Money,
    /// Present exactly when credit_portion is charged to an account.
    pub account_id: Option<String>,
}

// =============================================================================
// Settlement
// =============================================================================

/// Validates the cart's tender state and produces the settlement split.
///
/// Rules are evaluated in a fixed order (see module docs); the first
/// violation wins. The cart is not modified.
pub fn settle(cart: &Cart) -> Result<SettlementBreakdown, SettlementError> {
    if cart.is_empty() {
        return Err(SettlementError::EmptyCart);
    }

    if cart.payment_type.requires_account() && cart.linked_account_id.is_none() {
        return Err(SettlementError::MissingAccount);
    }

    let total = cart.total();

    match cart.payment_type {
        PaymentType::Cash => Ok(SettlementBreakdown {
            total,
            cash_portion: total,
            credit_portion: Money::zero(),
            account_id: None,
        }),
        PaymentType::Credit => Ok(SettlementBreakdown {
            total,
            cash_portion: Money::zero(),
            credit_portion: total,
            account_id: cart.linked_account_id.clone(),
        }),
        PaymentType::Mixed => {
            let tendered = match cart.cash_tendered {
                Some(amount) if amount.is_positive() => amount,
                _ => return Err(SettlementError::InvalidCashAmount),
            };
            if tendered >= total {
                return Err(SettlementError::CashCoversFullAmount);
            }
            Ok(SettlementBreakdown {
                total,
                cash_portion: tendered,
                credit_portion: total - tendered,
                account_id: cart.linked_account_id.clone(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, Portion};

    fn cart_with_total(paisa: i64) -> Cart {
        let item = CatalogItem {
            id: 1,
            name: "Thali".into(),
            category: None,
            description: None,
            available_portions: vec![Portion::Full],
            price_full: Some(Money::from_paisa(paisa)),
            price_half: None,
            stock_quantity: None,
            is_active: true,
        };
        let mut cart = Cart::new();
        cart.add_line(&item, Portion::Full).unwrap();
        cart
    }

    #[test]
    fn test_empty_cart_rejected_first() {
        let mut cart = Cart::new();
        cart.set_payment(PaymentType::Credit); // missing account too, but
                                               // emptiness wins
        assert_eq!(settle(&cart), Err(SettlementError::EmptyCart));
    }

    #[test]
    fn test_cash_settlement() {
        let cart = cart_with_total(20000);
        let breakdown = settle(&cart).unwrap();
        assert_eq!(breakdown.total, Money::from_paisa(20000));
        assert_eq!(breakdown.cash_portion, Money::from_paisa(20000));
        assert_eq!(breakdown.credit_portion, Money::zero());
        assert!(breakdown.account_id.is_none());
    }

    #[test]
    fn test_credit_requires_account() {
        let mut cart = cart_with_total(20000);
        cart.set_payment(PaymentType::Credit);
        assert_eq!(settle(&cart), Err(SettlementError::MissingAccount));

        cart.link_account(Some("STU-042".into()));
        let breakdown = settle(&cart).unwrap();
        assert_eq!(breakdown.cash_portion, Money::zero());
        assert_eq!(breakdown.credit_portion, Money::from_paisa(20000));
        assert_eq!(breakdown.account_id.as_deref(), Some("STU-042"));
    }

    #[test]
    fn test_mixed_settlement_split() {
        // total 200.00, cash 80.00 => credit 120.00
        let mut cart = cart_with_total(20000);
        cart.set_payment(PaymentType::Mixed);
        cart.link_account(Some("STU-042".into()));
        cart.set_cash_tendered(Some(Money::from_paisa(8000)));

        let breakdown = settle(&cart).unwrap();
        assert_eq!(breakdown.cash_portion, Money::from_paisa(8000));
        assert_eq!(breakdown.credit_portion, Money::from_paisa(12000));
        assert_eq!(breakdown.account_id.as_deref(), Some("STU-042"));
    }

    #[test]
    fn test_mixed_cash_must_be_positive() {
        let mut cart = cart_with_total(20000);
        cart.set_payment(PaymentType::Mixed);
        cart.link_account(Some("STU-042".into()));

        cart.set_cash_tendered(None);
        assert_eq!(settle(&cart), Err(SettlementError::InvalidCashAmount));

        cart.set_cash_tendered(Some(Money::zero()));
        assert_eq!(settle(&cart), Err(SettlementError::InvalidCashAmount));
    }

    #[test]
    fn test_mixed_cash_covering_total_rejected() {
        let mut cart = cart_with_total(20000);
        cart.set_payment(PaymentType::Mixed);
        cart.link_account(Some("STU-042".into()));

        cart.set_cash_tendered(Some(Money::from_paisa(20000)));
        assert_eq!(settle(&cart), Err(SettlementError::CashCoversFullAmount));

        cart.set_cash_tendered(Some(Money::from_paisa(25000)));
        assert_eq!(settle(&cart), Err(SettlementError::CashCoversFullAmount));
    }

    #[test]
    fn test_settle_does_not_mutate_cart() {
        let cart = cart_with_total(20000);
        let before = cart.clone();
        let _ = settle(&cart);
        assert_eq!(cart.total(), before.total());
        assert_eq!(cart.line_count(), before.line_count());
    }
}
