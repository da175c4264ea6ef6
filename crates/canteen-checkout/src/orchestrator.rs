//! # Checkout Orchestrator
//!
//! Sequences a checkout: freeze the cart, create the transaction remotely,
//! fetch the receipt, derive the per-unit tokens, clear the cart.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │   Idle ──► Validating ──► Submitting ──► AwaitingReceipt ──► Settled│
//! │                │               │               │                    │
//! │                ▼               ▼               ▼                    │
//! │            Rejected         Failed          Failed                  │
//! │        (cart unchanged)  (cart PRESERVED, commit status unknown)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The orchestrator owns the single mutable [`Cart`] for the session. The
//! two network calls are the engine's only suspension points, strictly
//! sequential. Catalog/inventory refreshes arriving mid-flight are
//! buffered and applied once the flight ends — a refresh never mutates
//! state a checkout is reading.
//!
//! There is no mid-flight cancellation: once submission begins the
//! operation runs to completion or failure. On a transport failure the
//! transaction's existence is unknown; the engine generates no idempotency
//! key and never resubmits on its own.

use tracing::{info, warn};

use canteen_core::{
    compose_tokens, settle, Cart, CatalogSnapshot, CreditAccount, IngredientIndex, PaymentType,
    ReceiptToken, SettlementError,
};

use crate::client::TransactionClient;
use crate::error::{CheckoutError, CheckoutResult};
use crate::wire::{CreateTransactionRequest, ReceiptPayload};

// =============================================================================
// Checkout State
// =============================================================================

/// Where in a checkout the submission phase failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePhase {
    /// Transaction creation did not complete; commit status unknown on
    /// transport errors.
    Submitting,
    /// The transaction exists but its receipt could not be fetched.
    AwaitingReceipt,
}

/// Observable orchestrator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// No checkout in progress; cart is freely mutable.
    Idle,
    /// Running local settlement validation.
    Validating,
    /// Transaction creation call in flight.
    Submitting,
    /// Receipt fetch in flight.
    AwaitingReceipt,
    /// Last checkout completed; cart has been cleared.
    Settled { transaction_id: i64 },
    /// Local validation failed; cart untouched, correct and retry.
    Rejected { error: SettlementError },
    /// Remote failure; cart preserved for explicit resubmission.
    Failed { phase: FailurePhase, message: String },
}

impl CheckoutState {
    /// True while a network call is in flight. The cart belongs
    /// exclusively to the checkout flow in these states.
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, CheckoutState::Submitting | CheckoutState::AwaitingReceipt)
    }
}

// =============================================================================
// Checkout Receipt
// =============================================================================

/// Everything the UI needs after a successful checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub transaction_id: i64,
    /// One printable token per physical unit, numbered continuously.
    pub tokens: Vec<ReceiptToken>,
    /// The full receipt payload (enriched with account name / cash paid
    /// where applicable) for the print template.
    pub payload: ReceiptPayload,
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Owns the cart and the current catalog/inventory views for one terminal
/// session, and drives checkouts against the Transaction Service.
pub struct CheckoutOrchestrator {
    client: TransactionClient,
    cart: Cart,
    state: CheckoutState,

    catalog: CatalogSnapshot,
    inventory: IngredientIndex,
    accounts: Vec<CreditAccount>,

    // Refreshes that arrived mid-flight, applied when the flight ends.
    pending_catalog: Option<CatalogSnapshot>,
    pending_inventory: Option<IngredientIndex>,
    pending_accounts: Option<Vec<CreditAccount>>,
}

impl CheckoutOrchestrator {
    /// Creates an orchestrator with an empty cart and empty views.
    pub fn new(client: TransactionClient) -> Self {
        CheckoutOrchestrator {
            client,
            cart: Cart::new(),
            state: CheckoutState::Idle,
            catalog: CatalogSnapshot::empty(),
            inventory: IngredientIndex::default(),
            accounts: Vec::new(),
            pending_catalog: None,
            pending_inventory: None,
            pending_accounts: None,
        }
    }

    /// Current observable state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the cart, refused while a checkout is in flight.
    pub fn cart_mut(&mut self) -> CheckoutResult<&mut Cart> {
        if self.state.is_in_flight() {
            return Err(CheckoutError::Busy);
        }
        Ok(&mut self.cart)
    }

    /// The catalog view this session is selling from.
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// The recipe/ingredient view backing availability calculations.
    pub fn inventory(&self) -> &IngredientIndex {
        &self.inventory
    }

    /// Accounts available for credit/mixed tenders.
    pub fn accounts(&self) -> &[CreditAccount] {
        &self.accounts
    }

    /// Maximum produceable units for a recipe-backed item (advisory).
    pub fn max_produceable(&self, item_id: i64) -> i64 {
        self.inventory.max_produceable(item_id)
    }

    // =========================================================================
    // Refresh Intake
    // =========================================================================

    /// Offers a fresh catalog snapshot; buffered if a checkout is in
    /// flight, applied immediately otherwise.
    pub fn offer_catalog(&mut self, snapshot: CatalogSnapshot) {
        if self.state.is_in_flight() {
            self.pending_catalog = Some(snapshot);
        } else {
            self.catalog = snapshot;
        }
    }

    /// Offers a fresh ingredient index; same buffering rule.
    pub fn offer_inventory(&mut self, index: IngredientIndex) {
        if self.state.is_in_flight() {
            self.pending_inventory = Some(index);
        } else {
            self.inventory = index;
        }
    }

    /// Offers a fresh account list; same buffering rule.
    pub fn offer_accounts(&mut self, accounts: Vec<CreditAccount>) {
        if self.state.is_in_flight() {
            self.pending_accounts = Some(accounts);
        } else {
            self.accounts = accounts;
        }
    }

    fn apply_pending_refreshes(&mut self) {
        if let Some(snapshot) = self.pending_catalog.take() {
            self.catalog = snapshot;
        }
        if let Some(index) = self.pending_inventory.take() {
            self.inventory = index;
        }
        if let Some(accounts) = self.pending_accounts.take() {
            self.accounts = accounts;
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Runs a full checkout for the current cart.
    ///
    /// On success the cart is cleared and the receipt (with one token per
    /// unit) is returned. On any failure the cart keeps its lines so the
    /// cashier does not lose the entered order; see [`CheckoutState`] for
    /// what each failure means for the transaction's commit status.
    pub async fn checkout(&mut self) -> CheckoutResult<CheckoutReceipt> {
        self.state = CheckoutState::Validating;

        let breakdown = match settle(&self.cart) {
            Ok(b) => b,
            Err(error) => {
                self.state = CheckoutState::Rejected { error };
                return Err(error.into());
            }
        };

        let request = CreateTransactionRequest::from_cart(&self.cart, &breakdown);

        // First and only transaction-creating call.
        self.state = CheckoutState::Submitting;
        let created = match self.client.create_transaction(&request).await {
            Ok(created) => created,
            Err(err) => {
                return Err(self.fail(FailurePhase::Submitting, err));
            }
        };

        // Second call: the receipt for what the server committed.
        self.state = CheckoutState::AwaitingReceipt;
        let envelope = match self.client.fetch_receipt(created.id).await {
            Ok(envelope) => envelope,
            Err(err) => {
                return Err(self.fail(FailurePhase::AwaitingReceipt, err));
            }
        };

        let mut payload = envelope.payload;
        self.enrich_payload(&mut payload);

        let transaction = match payload.to_transaction() {
            Ok(tx) => tx,
            Err(err) => {
                return Err(self.fail(FailurePhase::AwaitingReceipt, err));
            }
        };
        let tokens = compose_tokens(&transaction);

        info!(
            transaction_id = transaction.id,
            tokens = tokens.len(),
            total = %transaction.total_amount,
            "checkout settled"
        );

        self.cart.clear();
        self.state = CheckoutState::Settled {
            transaction_id: transaction.id,
        };
        self.apply_pending_refreshes();

        Ok(CheckoutReceipt {
            transaction_id: transaction.id,
            tokens,
            payload,
        })
    }

    /// Records a remote failure. The cart is deliberately left intact.
    fn fail(&mut self, phase: FailurePhase, err: CheckoutError) -> CheckoutError {
        warn!(
            ?phase,
            kind = err.kind(),
            commit_unknown = err.commit_status_unknown(),
            "checkout failed; cart preserved"
        );
        self.state = CheckoutState::Failed {
            phase,
            message: err.to_string(),
        };
        self.apply_pending_refreshes();
        err
    }

    /// Copies locally-known account name and cash-paid amount into the
    /// receipt payload for printing.
    fn enrich_payload(&self, payload: &mut ReceiptPayload) {
        if let Some(account_id) = &self.cart.linked_account_id {
            if let Some(account) = self.accounts.iter().find(|a| &a.account_id == account_id) {
                payload.account_name = Some(account.name.clone());
            }
        }
        if self.cart.payment_type == PaymentType::Mixed {
            if let Some(cash) = self.cart.cash_tendered {
                payload.cash_paid = Some(cash.to_decimal_string());
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_core::{CatalogItem, Money, Portion};
    use chrono::Utc;

    fn orchestrator() -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(TransactionClient::new("http://127.0.0.1:9"))
    }

    fn snapshot_with_item() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![CatalogItem {
                id: 1,
                name: "Momo".into(),
                category: None,
                description: None,
                available_portions: vec![Portion::Full],
                price_full: Some(Money::from_paisa(12000)),
                price_half: None,
                stock_quantity: None,
                is_active: true,
            }],
            Utc::now(),
        )
    }

    #[test]
    fn test_refresh_applies_immediately_at_idle() {
        let mut orch = orchestrator();
        assert!(orch.catalog().items().is_empty());

        orch.offer_catalog(snapshot_with_item());
        assert_eq!(orch.catalog().items().len(), 1);
    }

    #[test]
    fn test_cart_mutable_at_idle() {
        let mut orch = orchestrator();
        orch.offer_catalog(snapshot_with_item());

        let item = orch.catalog().item(1).unwrap().clone();
        orch.cart_mut().unwrap().add_line(&item, Portion::Full).unwrap();
        assert_eq!(orch.cart().total(), Money::from_paisa(12000));
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_is_rejected_locally() {
        let mut orch = orchestrator();
        let err = orch.checkout().await.unwrap_err();

        assert_eq!(err.kind(), "empty_cart");
        assert_eq!(
            orch.state(),
            &CheckoutState::Rejected {
                error: SettlementError::EmptyCart
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_preserves_cart() {
        // nothing listens on port 9, so submission fails at transport level
        let mut orch = orchestrator();
        orch.offer_catalog(snapshot_with_item());
        let item = orch.catalog().item(1).unwrap().clone();
        orch.cart_mut().unwrap().add_line(&item, Portion::Full).unwrap();

        let err = orch.checkout().await.unwrap_err();
        assert!(err.commit_status_unknown());
        assert!(matches!(
            orch.state(),
            CheckoutState::Failed {
                phase: FailurePhase::Submitting,
                ..
            }
        ));
        // the entered order must survive the failure
        assert_eq!(orch.cart().total_quantity(), 1);
    }
}
