//! Validation of candidate disbursements before any procurement lookup.

use soroban_sdk::String;

use crate::types::Disbursement;
use crate::DisbursementError;

/// Checks the fields of a candidate that do not depend on ledger state.
///
/// `id` and `status` are not checked; registration overwrites both.
pub fn validate_candidate(candidate: &Disbursement) -> Result<(), DisbursementError> {
    validate_amount(candidate.amount)?;
    validate_currency(&candidate.currency)?;
    Ok(())
}

/// Amounts must be non-negative. Zero is accepted.
pub fn validate_amount(amount: i128) -> Result<(), DisbursementError> {
    if amount < 0 {
        return Err(DisbursementError::InvalidAmount);
    }
    Ok(())
}

pub fn validate_currency(currency: &String) -> Result<(), DisbursementError> {
    if currency.len() == 0 {
        return Err(DisbursementError::InvalidCurrency);
    }
    Ok(())
}
