//! # Checkout Error Types
//!
//! Errors for the effectful half of the engine.
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Settlement   - local tender validation, caught before any network  │
//! │  Rejected     - server refused the transaction (stock, inactive     │
//! │                 item, bad recipe); the server's stock is the        │
//! │                 authority, so this surfaces after submission        │
//! │  Transport    - network/timeout; commit status is UNKNOWN, the      │
//! │                 engine never retries automatically                  │
//! │  InvalidResponse - payload did not match the wire contract          │
//! │  Busy         - cart access refused mid-checkout                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use canteen_core::SettlementError;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Errors surfaced by the checkout orchestrator and the service client.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Local tender validation failed; the cart is untouched and the
    /// cashier can correct and retry.
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// The Transaction Service rejected the submission with a reason
    /// (insufficient stock, inactive item, invalid recipe, ...).
    #[error("transaction rejected: {reason}")]
    Rejected { status: u16, reason: String },

    /// Network or timeout failure. Whether the transaction committed is
    /// unknown; resubmission must be an explicit user action.
    #[error("network failure: {message}")]
    Transport { message: String },

    /// The server response did not match the expected payload shape.
    #[error("invalid response from transaction service: {message}")]
    InvalidResponse { message: String },

    /// A cart mutation was attempted while a checkout was in flight.
    #[error("checkout in progress; cart is locked")]
    Busy,
}

impl CheckoutError {
    /// Stable machine-distinguishable kind for UI mapping.
    pub const fn kind(&self) -> &'static str {
        match self {
            CheckoutError::Settlement(e) => e.kind(),
            CheckoutError::Rejected { .. } => "rejected",
            CheckoutError::Transport { .. } => "transport",
            CheckoutError::InvalidResponse { .. } => "invalid_response",
            CheckoutError::Busy => "busy",
        }
    }

    /// True when the failure leaves the transaction's commit status
    /// unknown. The caller must not assume either outcome and must not
    /// resubmit automatically.
    pub const fn commit_status_unknown(&self) -> bool {
        matches!(self, CheckoutError::Transport { .. })
    }

    /// True for failures the cashier can fix locally before resubmitting.
    pub const fn is_local(&self) -> bool {
        matches!(self, CheckoutError::Settlement(_) | CheckoutError::Busy)
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CheckoutError::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            CheckoutError::Transport {
                message: err.to_string(),
            }
        }
    }
}
