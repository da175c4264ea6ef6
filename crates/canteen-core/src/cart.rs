//! # Order Cart
//!
//! The mutable ordered collection of lines the cashier builds up before
//! checkout, plus the chosen tender state.
//!
//! ## Cart Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  • lines are unique per (item, portion); adding again increments    │
//! │  • line order = insertion order (receipt token numbering depends    │
//! │    on it)                                                           │
//! │  • stock-tracked items carry a stock ceiling snapshotted at         │
//! │    add-time; local checks are advisory, the server is the           │
//! │    authority at checkout                                            │
//! │  • made-to-order items (no stock count) are never blocked locally   │
//! │  • every failing operation leaves the cart unchanged                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is owned by exactly one checkout session; there is no locking
//! here because there is exactly one mutator (see the orchestrator).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CartError;
use crate::money::Money;
use crate::types::{CatalogItem, PaymentType, Portion};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the order cart.
///
/// Price and name are frozen at add-time: a catalog refresh mid-session
/// never changes what an already-carted line costs or prints as.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Catalog item id.
    pub item_id: i64,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Portion variant for this line.
    pub portion: Portion,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity, always > 0 (a line at 0 is removed instead).
    pub quantity: i64,

    /// Item stock level at add-time, for local bound-checking only.
    /// `None` for made-to-order items.
    pub stock_ceiling: Option<i64>,
}

impl CartLine {
    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The order cart for the current checkout session.
///
/// Created empty at session start and cleared on successful or abandoned
/// checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,

    /// Chosen tender.
    pub payment_type: PaymentType,

    /// Account charged for credit/mixed tenders.
    pub linked_account_id: Option<String>,

    /// Cash handed over; only meaningful for mixed tenders.
    pub cash_tendered: Option<Money>,
}

impl Cart {
    /// Creates a new empty cart with cash tender selected.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `(item, portion)` to the cart.
    ///
    /// If a line for the pair already exists its quantity is incremented,
    /// otherwise a new line is appended with quantity 1 and the item's
    /// current stock level snapshotted as the line's ceiling.
    ///
    /// For stock-tracked items the quantity already carted for the pair
    /// must be strictly below the stock level, otherwise `StockExceeded`
    /// is returned and the cart is unchanged.
    pub fn add_line(&mut self, item: &CatalogItem, portion: Portion) -> Result<(), CartError> {
        let unit_price = item
            .price(portion)
            .ok_or_else(|| CartError::PortionUnavailable {
                item: item.name.clone(),
                portion,
            })?;

        if let Some(stock) = item.stock_quantity {
            let in_cart = self.quantity_of(item.id, portion);
            if in_cart >= stock {
                return Err(CartError::StockExceeded {
                    item: item.name.clone(),
                    available: stock,
                    in_cart,
                });
            }
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.item_id == item.id && l.portion == portion)
        {
            line.quantity += 1;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CartError::CartFull {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine {
            item_id: item.id,
            name: item.name.clone(),
            portion,
            unit_price,
            quantity: 1,
            stock_ceiling: item.stock_quantity,
        });
        Ok(())
    }

    /// Changes a line's quantity by `delta` (may be negative).
    ///
    /// A resulting quantity ≤ 0 removes the line. Increments are checked
    /// against the line's stock ceiling; a violation returns
    /// `StockExceeded` and leaves the cart unchanged.
    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Result<(), CartError> {
        let line = self
            .lines
            .get(index)
            .ok_or(CartError::LineNotFound { index })?;

        let new_quantity = line.quantity + delta;
        if new_quantity <= 0 {
            self.lines.remove(index);
            return Ok(());
        }

        if delta > 0 {
            if let Some(ceiling) = line.stock_ceiling {
                if new_quantity > ceiling {
                    return Err(CartError::StockExceeded {
                        item: line.name.clone(),
                        available: ceiling,
                        in_cart: line.quantity,
                    });
                }
            }
            if new_quantity > MAX_LINE_QUANTITY {
                return Err(CartError::QuantityTooLarge {
                    requested: new_quantity,
                    max: MAX_LINE_QUANTITY,
                });
            }
        }

        self.lines[index].quantity = new_quantity;
        Ok(())
    }

    /// Removes a line unconditionally.
    pub fn remove_line(&mut self, index: usize) -> Result<(), CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound { index });
        }
        self.lines.remove(index);
        Ok(())
    }

    /// Empties the cart and resets tender state to plain cash.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.payment_type = PaymentType::Cash;
        self.linked_account_id = None;
        self.cash_tendered = None;
    }

    /// Selects the tender, dropping state the new tender makes meaningless
    /// (cash keeps no account or tendered amount; credit keeps no tendered
    /// amount).
    pub fn set_payment(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;
        match payment_type {
            PaymentType::Cash => {
                self.linked_account_id = None;
                self.cash_tendered = None;
            }
            PaymentType::Credit => {
                self.cash_tendered = None;
            }
            PaymentType::Mixed => {}
        }
    }

    /// Links (or unlinks) the account to charge.
    pub fn link_account(&mut self, account_id: Option<String>) {
        self.linked_account_id = account_id;
    }

    /// Records the cash handed over for a mixed tender.
    pub fn set_cash_tendered(&mut self, amount: Option<Money>) {
        self.cash_tendered = amount;
    }

    /// Exact cart total: Σ unit_price × quantity.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Total quantity across all lines (the cart badge count).
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity already carted for an `(item, portion)` pair.
    fn quantity_of(&self, item_id: i64, portion: Portion) -> i64 {
        self.lines
            .iter()
            .filter(|l| l.item_id == item_id && l.portion == portion)
            .map(|l| l.quantity)
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: i64, price_paisa: i64, stock: Option<i64>) -> CatalogItem {
        CatalogItem {
            id,
            name: format!("Item {id}"),
            category: None,
            description: None,
            available_portions: vec![Portion::Full, Portion::Half],
            price_full: Some(Money::from_paisa(price_paisa)),
            price_half: Some(Money::from_paisa(price_paisa / 2)),
            stock_quantity: stock,
            is_active: true,
        }
    }

    #[test]
    fn test_add_line_and_total() {
        let mut cart = Cart::new();
        let a = test_item(1, 6000, None); // Rs. 60.00
        let b = test_item(2, 7100, None); // half = Rs. 35.50

        cart.add_line(&a, Portion::Full).unwrap();
        cart.add_line(&a, Portion::Full).unwrap();
        cart.add_line(&b, Portion::Half).unwrap();

        // 60.00 × 2 + 35.50 = 155.50, exactly
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total(), Money::from_paisa(15550));
    }

    #[test]
    fn test_same_item_different_portion_is_separate_line() {
        let mut cart = Cart::new();
        let item = test_item(1, 6000, None);

        cart.add_line(&item, Portion::Full).unwrap();
        cart.add_line(&item, Portion::Half).unwrap();

        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_portion_not_offered() {
        let mut cart = Cart::new();
        let mut item = test_item(1, 6000, None);
        item.available_portions = vec![Portion::Full];

        let err = cart.add_line(&item, Portion::Half).unwrap_err();
        assert_eq!(err.kind(), "portion_unavailable");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stock_ceiling_blocks_third_unit() {
        let mut cart = Cart::new();
        let item = test_item(1, 5000, Some(2));

        cart.add_line(&item, Portion::Full).unwrap();
        cart.add_line(&item, Portion::Full).unwrap();

        // third add must fail and the cart must stay at quantity 2
        let err = cart.add_line(&item, Portion::Full).unwrap_err();
        assert!(matches!(
            err,
            CartError::StockExceeded {
                available: 2,
                in_cart: 2,
                ..
            }
        ));
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_change_quantity_respects_ceiling() {
        let mut cart = Cart::new();
        let item = test_item(1, 5000, Some(2));

        cart.add_line(&item, Portion::Full).unwrap();
        cart.change_quantity(0, 1).unwrap();

        let err = cart.change_quantity(0, 1).unwrap_err();
        assert_eq!(err.kind(), "stock_exceeded");
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_made_to_order_never_blocked_locally() {
        let mut cart = Cart::new();
        let item = test_item(1, 5000, None);

        for _ in 0..50 {
            cart.add_line(&item, Portion::Full).unwrap();
        }
        assert_eq!(cart.total_quantity(), 50);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let item = test_item(1, 5000, None);

        cart.add_line(&item, Portion::Full).unwrap();
        cart.change_quantity(0, -1).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_line_and_bad_index() {
        let mut cart = Cart::new();
        let item = test_item(1, 5000, None);

        cart.add_line(&item, Portion::Full).unwrap();
        cart.remove_line(0).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.remove_line(0),
            Err(CartError::LineNotFound { index: 0 })
        ));
        assert!(matches!(
            cart.change_quantity(5, 1),
            Err(CartError::LineNotFound { index: 5 })
        ));
    }

    #[test]
    fn test_clear_resets_tender_state() {
        let mut cart = Cart::new();
        let item = test_item(1, 5000, None);

        cart.add_line(&item, Portion::Full).unwrap();
        cart.set_payment(PaymentType::Mixed);
        cart.link_account(Some("STU-042".into()));
        cart.set_cash_tendered(Some(Money::from_paisa(2000)));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.payment_type, PaymentType::Cash);
        assert!(cart.linked_account_id.is_none());
        assert!(cart.cash_tendered.is_none());
    }

    #[test]
    fn test_switching_to_cash_drops_account_state() {
        let mut cart = Cart::new();
        cart.set_payment(PaymentType::Mixed);
        cart.link_account(Some("STU-042".into()));
        cart.set_cash_tendered(Some(Money::from_paisa(2000)));

        cart.set_payment(PaymentType::Credit);
        assert!(cart.cash_tendered.is_none());
        assert_eq!(cart.linked_account_id.as_deref(), Some("STU-042"));

        cart.set_payment(PaymentType::Cash);
        assert!(cart.linked_account_id.is_none());
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        let item = test_item(1, 100, None);

        cart.add_line(&item, Portion::Full).unwrap();
        cart.change_quantity(0, MAX_LINE_QUANTITY - 1).unwrap();

        let err = cart.change_quantity(0, 1).unwrap_err();
        assert_eq!(err.kind(), "quantity_too_large");
        assert_eq!(cart.lines[0].quantity, MAX_LINE_QUANTITY);
    }
}
