//! # Domain Types
//!
//! Core domain types used throughout the canteen POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  CatalogItem ──┐                                                    │
//! │                ├──► Cart ──► SettlementBreakdown ──► Transaction    │
//! │  Recipe ───────┤                                          │         │
//! │  Ingredient ───┘                                          ▼         │
//! │  (availability gates what the cart accepts)        ReceiptToken     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog, recipe and ingredient collections are refreshed wholesale and
//! are immutable within a cart session; the cart snapshots what it needs
//! (price, stock ceiling) at add-time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::MIN_RECIPE_INGREDIENTS;

// =============================================================================
// Portion
// =============================================================================

/// A sellable size variant of a catalog item, each with its own price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Portion {
    Full,
    Half,
}

impl Portion {
    /// Wire name of the portion (`"full"` / `"half"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Portion::Full => "full",
            Portion::Half => "half",
        }
    }
}

impl std::fmt::Display for Portion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Type
// =============================================================================

/// How a transaction is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Physical cash for the full amount.
    Cash,
    /// Full amount charged to a linked credit account.
    Credit,
    /// Partly cash, remainder charged to a linked account.
    Mixed,
}

impl PaymentType {
    /// Wire name of the payment type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::Credit => "credit",
            PaymentType::Mixed => "mixed",
        }
    }

    /// Whether this tender requires a linked account.
    pub const fn requires_account(&self) -> bool {
        matches!(self, PaymentType::Credit | PaymentType::Mixed)
    }
}

impl Default for PaymentType {
    fn default() -> Self {
        PaymentType::Cash
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable menu item from the catalog snapshot.
///
/// Immutable within a cart session; the next catalog refresh supersedes it
/// wholesale (no partial patching).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Backend identifier.
    pub id: i64,

    /// Display name shown to the cashier and on receipt tokens.
    pub name: String,

    /// Menu category used by the UI filter.
    pub category: Option<String>,

    /// Optional description for menu cards.
    pub description: Option<String>,

    /// Which portions this item is offered in.
    pub available_portions: Vec<Portion>,

    /// Price for a full portion, if offered.
    pub price_full: Option<Money>,

    /// Price for a half portion, if offered.
    pub price_half: Option<Money>,

    /// Pre-counted stock level. `None` means made-to-order: availability
    /// is bounded only by ingredient supply at checkout time.
    pub stock_quantity: Option<i64>,

    /// Whether the item is currently sellable (soft delete).
    pub is_active: bool,
}

impl CatalogItem {
    /// Returns the price for a portion, or `None` when the portion is not
    /// offered or carries no price.
    pub fn price(&self, portion: Portion) -> Option<Money> {
        if !self.available_portions.contains(&portion) {
            return None;
        }
        match portion {
            Portion::Full => self.price_full,
            Portion::Half => self.price_half,
        }
    }

    /// Whether this item tracks a pre-counted stock level.
    #[inline]
    pub fn is_stock_tracked(&self) -> bool {
        self.stock_quantity.is_some()
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// A raw ingredient held in inventory.
///
/// Quantities are decimals (kitchens measure in fractions of a kg/l), so
/// these fields use [`Decimal`] rather than integers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    /// Measurement unit (kg, g, l, ml, pc, ...).
    pub unit: String,
    #[ts(as = "String")]
    pub current_quantity: Decimal,
    #[ts(as = "String")]
    pub reorder_level: Decimal,
}

impl Ingredient {
    /// Whether current stock has fallen to or below the reorder level.
    pub fn is_below_reorder(&self) -> bool {
        self.current_quantity <= self.reorder_level
    }
}

// =============================================================================
// Recipe
// =============================================================================

/// One ingredient line of a recipe: how much of the ingredient one unit of
/// the item consumes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    #[ts(as = "String")]
    pub quantity_per_unit: Decimal,
}

/// The fixed per-unit ingredient consumption required to produce one unit
/// of a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recipe {
    pub item_id: i64,
    /// Ordered ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// A recipe with fewer than [`MIN_RECIPE_INGREDIENTS`] lines is
    /// incomplete and must not authorize activation or production.
    pub fn is_complete(&self) -> bool {
        self.ingredients.len() >= MIN_RECIPE_INGREDIENTS
    }
}

// =============================================================================
// Credit Account
// =============================================================================

/// A named account that credit and mixed tenders charge against.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreditAccount {
    /// Business identifier (e.g. a student roll number), not a DB key.
    pub account_id: String,
    pub name: String,
    /// "student" or "teacher" in practice; kept open-ended.
    pub account_type: String,
    pub balance: Money,
}

// =============================================================================
// Transaction (external result)
// =============================================================================

/// A line of a completed transaction, echoed back by the Transaction
/// Service with its computed total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionLine {
    pub item_name: String,
    pub portion: Portion,
    pub quantity: i64,
    pub unit_price: Money,
    /// unit_price × quantity, as computed server-side.
    pub line_total: Money,
}

/// A completed transaction as returned by the Transaction Service.
///
/// Consumed as an opaque result; the core never constructs one locally.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    /// Lines in their original cart insertion order. Token numbering
    /// depends on this order.
    pub lines: Vec<TransactionLine>,
    pub payment_type: PaymentType,
    pub total_amount: Money,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_portions() -> CatalogItem {
        CatalogItem {
            id: 1,
            name: "Momo".into(),
            category: Some("Snacks".into()),
            description: None,
            available_portions: vec![Portion::Full],
            price_full: Some(Money::from_paisa(12000)),
            price_half: Some(Money::from_paisa(7000)),
            stock_quantity: None,
            is_active: true,
        }
    }

    #[test]
    fn test_price_requires_offered_portion() {
        let item = item_with_portions();
        assert_eq!(item.price(Portion::Full), Some(Money::from_paisa(12000)));
        // price_half is set but the portion is not offered
        assert_eq!(item.price(Portion::Half), None);
    }

    #[test]
    fn test_portion_wire_names() {
        assert_eq!(
            serde_json::to_string(&Portion::Full).unwrap(),
            "\"full\""
        );
        assert_eq!(
            serde_json::from_str::<Portion>("\"half\"").unwrap(),
            Portion::Half
        );
    }

    #[test]
    fn test_payment_type_default_and_accounts() {
        assert_eq!(PaymentType::default(), PaymentType::Cash);
        assert!(!PaymentType::Cash.requires_account());
        assert!(PaymentType::Credit.requires_account());
        assert!(PaymentType::Mixed.requires_account());
    }

    #[test]
    fn test_recipe_completeness() {
        let mut recipe = Recipe {
            item_id: 1,
            ingredients: vec![RecipeIngredient {
                ingredient_id: 10,
                quantity_per_unit: Decimal::ONE,
            }],
        };
        assert!(!recipe.is_complete());

        recipe.ingredients.push(RecipeIngredient {
            ingredient_id: 11,
            quantity_per_unit: Decimal::new(25, 2),
        });
        assert!(recipe.is_complete());
    }

    #[test]
    fn test_ingredient_reorder_flag() {
        let ing = Ingredient {
            id: 1,
            name: "Flour".into(),
            unit: "kg".into(),
            current_quantity: Decimal::new(2500, 3),
            reorder_level: Decimal::from(3),
        };
        assert!(ing.is_below_reorder());
    }
}
