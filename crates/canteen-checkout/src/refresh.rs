//! # Refresh Agent
//!
//! Cancellable periodic poller that keeps the catalog, ingredient index
//! and account list fresh during a terminal session.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  RefreshAgent (background task)                                     │
//! │      every `interval`:                                              │
//! │        fetch catalog ──► RefreshUpdate::Catalog ──► mpsc ──► owner  │
//! │        fetch inventory ─► RefreshUpdate::Inventory ─┘               │
//! │        fetch accounts ──► RefreshUpdate::Accounts ──┘               │
//! │                                                                     │
//! │  The session owner feeds each update to the orchestrator's          │
//! │  offer_* methods, which buffer mid-checkout (single-owner rule).    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch failures are logged and skipped; the loop keeps running until
//! [`RefreshHandle::shutdown`] is called or the receiver is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use canteen_core::{CatalogSnapshot, CreditAccount, IngredientIndex};

use crate::client::TransactionClient;

// =============================================================================
// Refresh Update
// =============================================================================

/// One fresh view produced by a poll cycle.
#[derive(Debug)]
pub enum RefreshUpdate {
    Catalog(CatalogSnapshot),
    Inventory(IngredientIndex),
    Accounts(Vec<CreditAccount>),
}

// =============================================================================
// Refresh Agent
// =============================================================================

/// Periodic catalog/inventory poller.
pub struct RefreshAgent {
    client: TransactionClient,
    interval: Duration,
}

/// Handle for stopping a running refresh agent.
pub struct RefreshHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Signals the agent to stop after its current cycle.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

impl RefreshAgent {
    /// Creates an agent polling at the given interval.
    pub fn new(client: TransactionClient, interval: Duration) -> Self {
        RefreshAgent { client, interval }
    }

    /// Spawns the polling task.
    ///
    /// The first cycle runs immediately so a session starts with data.
    /// Returns the control handle and the update stream.
    pub fn spawn(self) -> (RefreshHandle, mpsc::Receiver<RefreshUpdate>) {
        let (update_tx, update_rx) = mpsc::channel(8);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            info!(interval_secs = self.interval.as_secs(), "refresh agent started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if !self.poll_once(&update_tx).await {
                            // receiver gone, session over
                            break;
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }

            info!("refresh agent stopped");
        });

        (RefreshHandle { shutdown_tx }, update_rx)
    }

    /// Runs one poll cycle. Returns false once the receiver is dropped.
    async fn poll_once(&self, tx: &mpsc::Sender<RefreshUpdate>) -> bool {
        match self.client.fetch_catalog().await {
            Ok(snapshot) => {
                debug!(items = snapshot.items().len(), "catalog poll complete");
                if tx.send(RefreshUpdate::Catalog(snapshot)).await.is_err() {
                    return false;
                }
            }
            Err(err) => warn!(kind = err.kind(), %err, "catalog poll failed"),
        }

        match self.client.fetch_inventory().await {
            Ok(index) => {
                if tx.send(RefreshUpdate::Inventory(index)).await.is_err() {
                    return false;
                }
            }
            Err(err) => warn!(kind = err.kind(), %err, "inventory poll failed"),
        }

        match self.client.fetch_accounts().await {
            Ok(accounts) => {
                if tx.send(RefreshUpdate::Accounts(accounts)).await.is_err() {
                    return false;
                }
            }
            Err(err) => warn!(kind = err.kind(), %err, "accounts poll failed"),
        }

        true
    }
}
