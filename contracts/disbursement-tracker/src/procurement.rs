//! Read-only view of the procurement ledger.
//!
//! The procurement ledger is a separate contract. The tracker only needs a
//! record's existence and approved amount, so it talks to the ledger through
//! the narrow [`ProcurementSource`] interface and never touches its storage.
//!
//! [`Procurement`] mirrors the ledger's record field for field. Cross-contract
//! values are decoded by shape, so if the ledger adds, removes or retypes a
//! field, every lookup fails to decode and registration reports
//! `ProcurementUnavailable` until this type is updated to match. Only `amount`
//! and the record's existence are used here.

use soroban_sdk::{contractclient, contracterror, contracttype, Address, Env, String};

use crate::DisbursementError;

/// Procurement record as returned by the procurement ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Procurement {
    pub id: u64,
    pub budget_id: u64,
    pub reference: String,
    pub agency: String,
    pub title: String,
    pub category: String,
    /// Approved ceiling for all disbursements against this procurement
    pub amount: i128,
    pub currency: String,
    pub officer: Address,
}

/// Errors surfaced by the procurement ledger.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProcurementError {
    /// No procurement with the requested id
    NotFound = 1,
}

/// Capability the tracker requires from the procurement ledger.
#[contractclient(name = "ProcurementSourceClient")]
pub trait ProcurementSource {
    fn get_procurement(env: Env, id: u64) -> Result<Procurement, ProcurementError>;
}

/// Looks up a procurement through the configured source.
///
/// A `NotFound` answer maps to [`DisbursementError::ProcurementNotFound`];
/// any other failure of the call is reported as
/// [`DisbursementError::ProcurementUnavailable`].
pub fn fetch_procurement(
    env: &Env,
    source: &Address,
    id: u64,
) -> Result<Procurement, DisbursementError> {
    let client = ProcurementSourceClient::new(env, source);
    match client.try_get_procurement(&id) {
        Ok(Ok(procurement)) => Ok(procurement),
        Err(Ok(ProcurementError::NotFound)) => Err(DisbursementError::ProcurementNotFound),
        _ => Err(DisbursementError::ProcurementUnavailable),
    }
}
