//! # Catalog Snapshot & Availability Calculator
//!
//! An immutable-per-refresh view of the sellable catalog, the
//! recipe/ingredient index, and the pure calculation of how many units of a
//! recipe-backed item the kitchen can still produce.
//!
//! ## Refresh Model
//! ```text
//! backend poll ──► CatalogSnapshot   (full replacement, never patched)
//!              ──► IngredientIndex   (recipes + ingredient stock levels)
//!                        │
//!                        ▼
//!              max_produceable(item)  = min over recipe lines of
//!                                       floor(stock / qty_per_unit)
//! ```
//!
//! Both aggregates are owned values handed to whoever needs them; a refresh
//! produces a brand new value rather than mutating in place (the checkout
//! orchestrator decides *when* a new snapshot may be applied).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::types::{CatalogItem, Ingredient, Recipe};

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// The sellable catalog as of one refresh.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    items: Vec<CatalogItem>,
    fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from a full item list.
    pub fn new(items: Vec<CatalogItem>, fetched_at: DateTime<Utc>) -> Self {
        CatalogSnapshot { items, fetched_at }
    }

    /// An empty snapshot (before the first refresh completes).
    pub fn empty() -> Self {
        CatalogSnapshot {
            items: Vec::new(),
            fetched_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// When this snapshot was fetched.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Looks up an item by id.
    pub fn item(&self, id: i64) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// All items, in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items currently offered for sale.
    pub fn active_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|i| i.is_active)
    }

    /// Distinct categories in catalog order, for the UI filter bar.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for item in &self.items {
            if let Some(cat) = item.category.as_deref() {
                if !seen.contains(&cat) {
                    seen.push(cat);
                }
            }
        }
        seen
    }
}

// =============================================================================
// Ingredient Index
// =============================================================================

/// Recipes keyed by item id plus current ingredient stock levels.
///
/// Replaced wholesale on each inventory refresh, like the catalog.
#[derive(Debug, Clone, Default)]
pub struct IngredientIndex {
    ingredients: HashMap<i64, Ingredient>,
    recipes: HashMap<i64, Recipe>,
}

impl IngredientIndex {
    /// Builds an index from full ingredient and recipe lists.
    pub fn new(ingredients: Vec<Ingredient>, recipes: Vec<Recipe>) -> Self {
        IngredientIndex {
            ingredients: ingredients.into_iter().map(|i| (i.id, i)).collect(),
            recipes: recipes.into_iter().map(|r| (r.item_id, r)).collect(),
        }
    }

    /// Looks up an ingredient by id.
    pub fn ingredient(&self, id: i64) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    /// Looks up the recipe for a catalog item.
    pub fn recipe_for(&self, item_id: i64) -> Option<&Recipe> {
        self.recipes.get(&item_id)
    }

    /// Maximum units of an item the current ingredient stock can produce.
    ///
    /// ## Rules
    /// - no recipe, or an incomplete recipe (fewer than 2 lines) ⇒ 0
    ///   (treated as "not produceable", never "unlimited")
    /// - a line whose ingredient is missing from the index does not
    ///   constrain the result (a dangling id is a data-entry artifact,
    ///   not a stock signal)
    /// - a line with a non-positive per-unit quantity is skipped likewise
    /// - otherwise the result is the minimum of
    ///   `floor(stock / quantity_per_unit)` over the resolvable lines;
    ///   if nothing resolved, 0
    ///
    /// Pure and deterministic; this is advisory only — the server re-checks
    /// ingredient stock authoritatively at transaction creation.
    pub fn max_produceable(&self, item_id: i64) -> i64 {
        match self.recipe_for(item_id) {
            Some(recipe) => self.max_produceable_from(recipe),
            None => 0,
        }
    }

    /// Same calculation given a recipe directly.
    pub fn max_produceable_from(&self, recipe: &Recipe) -> i64 {
        if !recipe.is_complete() {
            return 0;
        }

        let mut min_possible: Option<i64> = None;
        for line in &recipe.ingredients {
            let Some(ingredient) = self.ingredients.get(&line.ingredient_id) else {
                continue;
            };
            if line.quantity_per_unit.is_sign_negative() || line.quantity_per_unit.is_zero() {
                continue;
            }

            let possible = (ingredient.current_quantity / line.quantity_per_unit)
                .floor()
                .to_i64()
                .unwrap_or(0)
                .max(0);

            min_possible = Some(match min_possible {
                Some(current) => current.min(possible),
                None => possible,
            });
        }

        min_possible.unwrap_or(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
