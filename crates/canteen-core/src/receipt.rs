//! # Receipt Composer
//!
//! Turns a completed transaction into printable receipt tokens, one token
//! per physical unit to hand over at the counter.
//!
//! ## Token Numbering
//! ```text
//! Transaction #311
//!   line 1: Momo (full)  × 3      tokens  311-1, 311-2, 311-3
//!   line 2: Chai (half)  × 2      tokens  311-4, 311-5
//!                                          └── one counter, continuous
//!                                              across lines in order
//! ```
//!
//! Each token prints the *line's* total, not a per-unit price share: the
//! token is a pickup ticket, not a price allocation slip.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Portion, Transaction};

// =============================================================================
// Receipt Token
// =============================================================================

/// One printable receipt unit representing exactly one physical item.
///
/// Derived purely from a [`Transaction`]; never mutated. Composing the same
/// transaction twice yields an identical sequence, so a reprint is safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptToken {
    pub transaction_id: i64,

    /// 1-based position within the transaction, continuous across all
    /// lines in their original order.
    pub sequence_in_transaction: i64,

    pub item_name: String,
    pub portion: Portion,

    /// Always 1: one token hands over one physical unit.
    pub quantity: i64,

    /// The source line's full total (printed on every token of the line).
    pub line_total: Money,
}

impl ReceiptToken {
    /// The printed header label, `"{transaction}-{sequence}"`
    /// (e.g. `TOKEN #311-2`).
    pub fn label(&self) -> String {
        format!("{}-{}", self.transaction_id, self.sequence_in_transaction)
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Expands a transaction into its per-unit token sequence.
///
/// For each line, in order, emits exactly `line.quantity` tokens with a
/// single running sequence number. Deterministic and restartable.
pub fn compose_tokens(transaction: &Transaction) -> Vec<ReceiptToken> {
    let mut tokens = Vec::with_capacity(
        transaction
            .lines
            .iter()
            .map(|l| l.quantity.max(0) as usize)
            .sum(),
    );

    let mut sequence = 0i64;
    for line in &transaction.lines {
        for _ in 0..line.quantity {
            sequence += 1;
            tokens.push(ReceiptToken {
                transaction_id: transaction.id,
                sequence_in_transaction: sequence,
                item_name: line.item_name.clone(),
                portion: line.portion,
                quantity: 1,
                line_total: line.line_total,
            });
        }
    }

    tokens
}

// =============================================================================
// Unit Tests
// =============================================================================
