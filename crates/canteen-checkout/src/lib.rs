//! # canteen-checkout: Checkout Orchestration for the Canteen POS
//!
//! The effectful half of the engine. [`canteen_core`] decides; this crate
//! talks to the Transaction Service and sequences the checkout.
//!
//! ## Modules
//!
//! - [`client`] - REST client for the backend (the only network code)
//! - [`orchestrator`] - the checkout state machine owning the cart
//! - [`refresh`] - cancellable periodic catalog/inventory poller
//! - [`wire`] - request/response payload shapes
//! - [`error`] - checkout error taxonomy
//!
//! ## Failure Contract
//!
//! Local validation errors never touch the network. Remote rejections and
//! transport failures both preserve the cart; a transport failure during
//! submission leaves the transaction's commit status unknown, and the
//! engine never retries on its own — resubmission is an explicit user
//! action.

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod refresh;
pub mod wire;

pub use client::TransactionClient;
pub use error::{CheckoutError, CheckoutResult};
pub use orchestrator::{CheckoutOrchestrator, CheckoutReceipt, CheckoutState, FailurePhase};
pub use refresh::{RefreshAgent, RefreshHandle, RefreshUpdate};
