//! # Wire Payloads
//!
//! Boundary shapes exchanged with the Transaction Service REST API.
//!
//! Monetary values cross the wire as decimal strings or JSON decimals,
//! never floats built locally; catalog prices arrive as strings
//! (`"60.00"`) and are parsed into [`Money`] on the way in.
//!
//! List endpoints may return either a bare array or a paginated
//! `{"results": [...]}` object; [`Page`] absorbs both.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use canteen_core::{
    Cart, CatalogItem, CreditAccount, Ingredient, Money, PaymentType, Portion, Recipe,
    RecipeIngredient, SettlementBreakdown, Transaction, TransactionLine,
};

use crate::error::CheckoutError;

// =============================================================================
// Pagination Envelope
// =============================================================================

/// A list response: plain array or DRF-style page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Page<T> {
    Paged { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Page<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Page::Paged { results } => results,
            Page::Plain(items) => items,
        }
    }
}

// =============================================================================
// Catalog / Inventory Responses
// =============================================================================

/// A food item as the backend serializes it.
#[derive(Debug, Deserialize)]
pub struct FoodItemDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available_portions: Vec<Portion>,
    /// Decimal string, e.g. `"60.00"`.
    #[serde(default)]
    pub price_full: Option<String>,
    #[serde(default)]
    pub price_half: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl TryFrom<FoodItemDto> for CatalogItem {
    type Error = CheckoutError;

    fn try_from(dto: FoodItemDto) -> Result<Self, Self::Error> {
        let parse_price = |field: &str, value: Option<String>| -> Result<Option<Money>, CheckoutError> {
            value
                .map(|s| {
                    s.parse::<Money>().map_err(|_| CheckoutError::InvalidResponse {
                        message: format!("unparseable {field}: {s:?}"),
                    })
                })
                .transpose()
        };

        Ok(CatalogItem {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            description: dto.description,
            available_portions: dto.available_portions,
            price_full: parse_price("price_full", dto.price_full)?,
            price_half: parse_price("price_half", dto.price_half)?,
            stock_quantity: dto.stock_quantity,
            is_active: dto.is_active,
        })
    }
}

/// An inventory ingredient as the backend serializes it.
#[derive(Debug, Deserialize)]
pub struct IngredientDto {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub current_quantity: Decimal,
    #[serde(default)]
    pub reorder_level: Decimal,
}

impl From<IngredientDto> for Ingredient {
    fn from(dto: IngredientDto) -> Self {
        Ingredient {
            id: dto.id,
            name: dto.name,
            unit: dto.unit,
            current_quantity: dto.current_quantity,
            reorder_level: dto.reorder_level,
        }
    }
}

/// One recipe line as serialized by the backend.
#[derive(Debug, Deserialize)]
pub struct RecipeLineDto {
    /// Ingredient id.
    pub ingredient: i64,
    pub quantity: Decimal,
}

/// A recipe as serialized by the backend.
#[derive(Debug, Deserialize)]
pub struct RecipeDto {
    /// The catalog item this recipe produces.
    pub food_item: i64,
    #[serde(default)]
    pub ingredients: Vec<RecipeLineDto>,
}

impl From<RecipeDto> for Recipe {
    fn from(dto: RecipeDto) -> Self {
        Recipe {
            item_id: dto.food_item,
            ingredients: dto
                .ingredients
                .into_iter()
                .map(|l| RecipeIngredient {
                    ingredient_id: l.ingredient,
                    quantity_per_unit: l.quantity,
                })
                .collect(),
        }
    }
}

/// A credit account as serialized by the backend.
#[derive(Debug, Deserialize)]
pub struct AccountDto {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub account_type: String,
    /// Decimal string balance.
    pub balance: String,
}

impl TryFrom<AccountDto> for CreditAccount {
    type Error = CheckoutError;

    fn try_from(dto: AccountDto) -> Result<Self, Self::Error> {
        let balance = dto
            .balance
            .parse::<Money>()
            .map_err(|_| CheckoutError::InvalidResponse {
                message: format!("unparseable balance: {:?}", dto.balance),
            })?;
        Ok(CreditAccount {
            account_id: dto.account_id,
            name: dto.name,
            account_type: dto.account_type,
            balance,
        })
    }
}

// =============================================================================
// Transaction Creation
// =============================================================================

/// One order line of a transaction-creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLineRequest {
    /// Catalog item id.
    pub food_item: i64,
    pub portion_type: Portion,
    /// Unit price fixed to 2 decimal places, as a string.
    pub unit_price: String,
    pub quantity: i64,
}

/// The transaction-creation request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub payment_type: PaymentType,
    pub lines: Vec<TransactionLineRequest>,
    /// Required for credit/mixed, explicit null otherwise.
    pub linked_account: Option<String>,
    /// Present only for mixed tenders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_amount: Option<Decimal>,
}

impl CreateTransactionRequest {
    /// Builds the request from a validated cart and its settlement split.
    pub fn from_cart(cart: &Cart, breakdown: &SettlementBreakdown) -> Self {
        CreateTransactionRequest {
            payment_type: cart.payment_type,
            lines: cart
                .lines
                .iter()
                .map(|line| TransactionLineRequest {
                    food_item: line.item_id,
                    portion_type: line.portion,
                    unit_price: line.unit_price.to_decimal_string(),
                    quantity: line.quantity,
                })
                .collect(),
            linked_account: breakdown.account_id.clone(),
            cash_amount: match cart.payment_type {
                PaymentType::Mixed => Some(breakdown.cash_portion.to_decimal()),
                _ => None,
            },
        }
    }
}

/// The transaction-creation response. Opaque beyond the id.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionResponse {
    pub id: i64,
}

// =============================================================================
// Receipt Fetch
// =============================================================================

/// The receipt resource: an immutable payload under a stable token.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptEnvelope {
    #[serde(default)]
    pub token: Option<String>,
    pub payload: ReceiptPayload,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub portion: Portion,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptAccount {
    pub name: String,
    pub account_id: String,
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptPayment {
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub total_amount: Decimal,
    #[serde(default)]
    pub paid_amount: Option<Decimal>,
    #[serde(default)]
    pub credit_amount: Option<Decimal>,
    #[serde(default)]
    pub account: Option<ReceiptAccount>,
}

/// The printable receipt representation of a completed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptPayload {
    #[serde(default)]
    pub institution: Option<Institution>,
    pub transaction_id: i64,
    pub date: String,
    pub items: Vec<ReceiptItem>,
    pub payment: ReceiptPayment,

    // Local enrichment for printing, not sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_paid: Option<String>,
}

impl ReceiptPayload {
    /// Lifts the receipt into the core [`Transaction`] shape so tokens can
    /// be composed from it.
    pub fn to_transaction(&self) -> Result<Transaction, CheckoutError> {
        let money = |field: &str, value: Decimal| -> Result<Money, CheckoutError> {
            Money::from_decimal(value).ok_or_else(|| CheckoutError::InvalidResponse {
                message: format!("{field} out of range: {value}"),
            })
        };

        let lines = self
            .items
            .iter()
            .map(|item| {
                Ok(TransactionLine {
                    item_name: item.name.clone(),
                    portion: item.portion,
                    quantity: item.quantity,
                    unit_price: money("unit_price", item.unit_price)?,
                    line_total: money("line_total", item.line_total)?,
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;

        Ok(Transaction {
            id: self.transaction_id,
            lines,
            payment_type: self.payment.payment_type,
            total_amount: money("total_amount", self.payment.total_amount)?,
            timestamp: parse_receipt_date(&self.date)?,
        })
    }
}

/// Parses the receipt's ISO-8601 date, with or without an offset.
fn parse_receipt_date(raw: &str) -> Result<DateTime<Utc>, CheckoutError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| CheckoutError::InvalidResponse {
            message: format!("unparseable receipt date: {raw:?}"),
        })
}

// =============================================================================
// Stock Update Side Channel
// =============================================================================

/// The action carried by a stock update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    /// Production from ingredients: the backend deducts recipe quantities.
    Produce,
    /// Manual correction; does not touch ingredient inventory.
    Correct,
}

/// Fire-and-forget stock update against a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdateRequest {
    pub action: StockAction,
    /// Signed quantity delta.
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
