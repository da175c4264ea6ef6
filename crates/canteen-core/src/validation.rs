//! Input validation helpers for values typed by the cashier.
//!
//! The cart and settlement engines validate their own invariants; these
//! helpers sit one layer earlier, turning raw form input into domain
//! values so the UI shell gets the same typed errors the engines produce.

use crate::error::SettlementError;
use crate::money::Money;

/// Parses the cash-amount field of a mixed tender.
///
/// Empty input, unparseable input and non-positive amounts all map to
/// `InvalidCashAmount`, matching what settlement would reject anyway.
pub fn parse_cash_input(input: &str) -> Result<Money, SettlementError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SettlementError::InvalidCashAmount);
    }
    let amount: Money = trimmed
        .parse()
        .map_err(|_| SettlementError::InvalidCashAmount)?;
    if !amount.is_positive() {
        return Err(SettlementError::InvalidCashAmount);
    }
    Ok(amount)
}

/// Normalizes an account selection: trimmed, empty becomes `None`.
pub fn normalize_account_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cash_input() {
        assert_eq!(parse_cash_input("80.00"), Ok(Money::from_paisa(8000)));
        assert_eq!(parse_cash_input(" 80 "), Ok(Money::from_paisa(8000)));
        assert_eq!(parse_cash_input(""), Err(SettlementError::InvalidCashAmount));
        assert_eq!(
            parse_cash_input("0.00"),
            Err(SettlementError::InvalidCashAmount)
        );
        assert_eq!(
            parse_cash_input("-5"),
            Err(SettlementError::InvalidCashAmount)
        );
        assert_eq!(
            parse_cash_input("abc"),
            Err(SettlementError::InvalidCashAmount)
        );
    }

    #[test]
    fn test_normalize_account_id() {
        assert_eq!(normalize_account_id(" STU-042 ").as_deref(), Some("STU-042"));
        assert_eq!(normalize_account_id("   "), None);
    }
}
