//! # Transaction Service Client
//!
//! Thin REST client for the backend the canteen terminal talks to. Every
//! network call of the engine goes through here.
//!
//! ## Endpoints
//! ```text
//! POST /api/transactions/                    create a transaction
//! GET  /api/transactions/{id}/receipt/       fetch the receipt payload
//! GET  /api/food-items/?is_active=true       catalog refresh
//! GET  /api/inventory/ingredients/           ingredient stock levels
//! GET  /api/inventory/recipes/               recipes
//! GET  /api/accounts/                        credit accounts
//! POST /api/food-items/{id}/update_stock/    stock side channel
//! ```
//!
//! Non-2xx responses become [`CheckoutError::Rejected`] carrying the
//! server's `detail` message; connection/timeout problems become
//! [`CheckoutError::Transport`].

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use canteen_core::{CatalogSnapshot, CreditAccount, IngredientIndex};

use crate::error::{CheckoutError, CheckoutResult};
use crate::wire::{
    AccountDto, CreateTransactionRequest, CreateTransactionResponse, FoodItemDto, IngredientDto,
    Page, ReceiptEnvelope, RecipeDto, StockUpdateRequest,
};

// =============================================================================
// Client
// =============================================================================

/// REST client for the Transaction Service.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl TransactionClient {
    /// Creates a client for the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        TransactionClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Attaches a bearer token for authenticated deployments.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Maps non-2xx responses to `Rejected` with the server's reason.
    async fn check(response: reqwest::Response) -> CheckoutResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .or_else(|| v.get("error"))
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        warn!(status = status.as_u16(), %reason, "transaction service rejected request");
        Err(CheckoutError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CheckoutResult<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // =========================================================================
    // Checkout Path
    // =========================================================================

    /// Creates a transaction. The server validates stock authoritatively
    /// and performs the ledger/stock updates atomically.
    pub async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> CheckoutResult<CreateTransactionResponse> {
        debug!(
            lines = request.lines.len(),
            payment = %request.payment_type,
            "submitting transaction"
        );
        let response = self
            .request(reqwest::Method::POST, "/api/transactions/")
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetches the immutable receipt payload for a created transaction.
    pub async fn fetch_receipt(&self, transaction_id: i64) -> CheckoutResult<ReceiptEnvelope> {
        self.get_json(&format!("/api/transactions/{transaction_id}/receipt/"))
            .await
    }

    // =========================================================================
    // Refresh Path (read-only)
    // =========================================================================

    /// Fetches the active catalog as a fresh snapshot.
    pub async fn fetch_catalog(&self) -> CheckoutResult<CatalogSnapshot> {
        let page: Page<FoodItemDto> = self.get_json("/api/food-items/?is_active=true").await?;
        let items = page
            .into_vec()
            .into_iter()
            .map(TryInto::try_into)
            .collect::<CheckoutResult<Vec<_>>>()?;
        debug!(items = items.len(), "catalog refreshed");
        Ok(CatalogSnapshot::new(items, Utc::now()))
    }

    /// Fetches ingredients and recipes as a fresh index.
    pub async fn fetch_inventory(&self) -> CheckoutResult<IngredientIndex> {
        let ingredients: Page<IngredientDto> =
            self.get_json("/api/inventory/ingredients/").await?;
        let recipes: Page<RecipeDto> = self.get_json("/api/inventory/recipes/").await?;

        Ok(IngredientIndex::new(
            ingredients.into_vec().into_iter().map(Into::into).collect(),
            recipes.into_vec().into_iter().map(Into::into).collect(),
        ))
    }

    /// Fetches the credit accounts available for credit/mixed tenders.
    pub async fn fetch_accounts(&self) -> CheckoutResult<Vec<CreditAccount>> {
        let page: Page<AccountDto> = self.get_json("/api/accounts/").await?;
        page.into_vec().into_iter().map(TryInto::try_into).collect()
    }

    // =========================================================================
    // Stock Side Channel
    // =========================================================================

    /// Posts a production/correction stock update for a catalog item.
    ///
    /// Fire-and-forget from the checkout engine's point of view: not part
    /// of the cart path, shares only the item-id namespace.
    pub async fn update_stock(
        &self,
        item_id: i64,
        request: &StockUpdateRequest,
    ) -> CheckoutResult<()> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/api/food-items/{item_id}/update_stock/"),
            )
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
