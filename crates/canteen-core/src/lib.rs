//! # canteen-core: Pure Business Logic for the Canteen POS
//!
//! This crate is the **heart** of the canteen point-of-sale. It contains the
//! order cart, the stock-constrained availability calculation, payment
//! settlement and receipt-token derivation as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Canteen POS Architecture                     │
//! │                                                                     │
//! │   UI Shell (web)                                                    │
//! │        │                                                            │
//! │   canteen-checkout      Orchestrator + Transaction Service client   │
//! │        │                                                            │
//! │   ★ canteen-core ★      catalog   cart   settlement   receipt       │
//! │                                                                     │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Recipe, Ingredient, Transaction)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Catalog snapshot, ingredient index, availability calculator
//! - [`cart`] - The order cart and its stock-ceiling rules
//! - [`settlement`] - Cash/credit/mixed tender validation
//! - [`receipt`] - One-token-per-unit receipt composition
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation helpers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database, network and file system access are FORBIDDEN here
//! 3. **Integer Money**: monetary values are paisa (i64), never floats
//! 4. **Explicit Errors**: typed error enums, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod receipt;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use catalog::{CatalogSnapshot, IngredientIndex};
pub use error::{CartError, SettlementError};
pub use money::Money;
pub use receipt::{compose_tokens, ReceiptToken};
pub use settlement::{settle, SettlementBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum number of ingredient lines a recipe needs to count as complete.
///
/// A recipe with fewer lines must not authorize item activation or
/// production; the availability calculator treats it as non-produceable.
pub const MIN_RECIPE_INGREDIENTS: usize = 2;

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts and keeps transactions a sane size for the
/// thermal receipt printer.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
