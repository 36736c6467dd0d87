//! # Disbursement Tracker Contract
//!
//! A Soroban smart contract that records disbursements (fund releases)
//! against procurements held by a separate procurement ledger contract.
//!
//! ## Features
//!
//! - **Budget Ceiling**: The running disbursed total of a procurement never
//!   exceeds its approved amount
//! - **Lifecycle**: Disbursements move `Scheduled → Released → Completed`, or
//!   to `Cancelled` before completion, and never move backwards
//! - **Read-only Procurement Lookup**: Procurements are resolved through the
//!   [`ProcurementSource`] interface of a configured contract
//! - **Event Emission**: Registrations and status changes are published as events
//!
//! ## Atomicity
//!
//! Each entry point runs inside a single host invocation. A failed
//! invocation leaves no storage changes behind, so a record and its
//! procurement's updated total are always written together.

#![no_std]

mod lifecycle;
mod procurement;
mod storage;
mod types;
mod validation;

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, Vec};

pub use crate::procurement::{Procurement, ProcurementError, ProcurementSource};
pub use crate::types::{
    DataKey, Disbursement, DisbursementEvents, DisbursementStatus, MAX_PAGE_SIZE,
};
use crate::lifecycle::validate_transition;
use crate::procurement::fetch_procurement;
use crate::validation::validate_candidate;

/// Error codes for the disbursement tracker contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum DisbursementError {
    /// Contract not initialized
    NotInitialized = 1,
    /// Contract already initialized
    AlreadyInitialized = 2,
    /// Caller is not authorized
    Unauthorized = 3,
    /// Referenced procurement does not exist
    ProcurementNotFound = 4,
    /// Procurement source failed for a reason other than a missing record
    ProcurementUnavailable = 5,
    /// Registration would push the disbursed total past the procurement amount
    BudgetExceeded = 6,
    /// No disbursement with the requested id
    DisbursementNotFound = 7,
    /// Status change not permitted by the lifecycle
    InvalidTransition = 8,
    /// Amount is negative
    InvalidAmount = 9,
    /// Currency code is missing
    InvalidCurrency = 10,
}

#[contract]
pub struct DisbursementTrackerContract;

#[contractimpl]
impl DisbursementTrackerContract {
    /// Initializes the contract.
    ///
    /// # Arguments
    /// * `env` - The contract environment
    /// * `admin` - The address allowed to change configuration and statuses
    /// * `procurement_source` - The procurement ledger contract
    pub fn initialize(
        env: Env,
        admin: Address,
        procurement_source: Address,
    ) -> Result<(), DisbursementError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(DisbursementError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::ProcurementSource, &procurement_source);
        env.storage()
            .instance()
            .set(&DataKey::LastDisbursementId, &0u64);
        storage::extend_instance(&env);

        DisbursementEvents::initialized(&env, &admin, &procurement_source);
        Ok(())
    }

    /// Registers a disbursement against a procurement.
    ///
    /// The candidate's `id` and `status` are ignored: the stored record gets
    /// a fresh id and starts out `Scheduled`.
    ///
    /// # Arguments
    /// * `env` - The contract environment
    /// * `candidate` - The disbursement to record; `performed_by` must authorize
    ///
    /// # Returns
    /// * `Disbursement` - The stored record
    ///
    /// # Events Emitted
    /// * `disburse/created` - With the procurement's new running total
    ///
    /// # Errors
    /// * `InvalidAmount` / `InvalidCurrency` - Malformed candidate
    /// * `ProcurementNotFound` - Unknown procurement id
    /// * `ProcurementUnavailable` - Procurement source call failed otherwise
    /// * `BudgetExceeded` - Total would exceed the procurement amount
    pub fn register_disbursement(
        env: Env,
        candidate: Disbursement,
    ) -> Result<Disbursement, DisbursementError> {
        candidate.performed_by.require_auth();
        validate_candidate(&candidate)?;

        let source = Self::procurement_source(&env)?;
        let procurement = fetch_procurement(&env, &source, candidate.procurement_id)?;

        let current_total = storage::get_total(&env, candidate.procurement_id);
        let new_total = current_total
            .checked_add(candidate.amount)
            .ok_or(DisbursementError::BudgetExceeded)?;
        if new_total > procurement.amount {
            return Err(DisbursementError::BudgetExceeded);
        }

        let disbursement = Disbursement {
            id: storage::next_id(&env),
            status: DisbursementStatus::Scheduled,
            ..candidate
        };

        storage::put_disbursement(&env, &disbursement);
        storage::append_to_index(&env, disbursement.procurement_id, disbursement.id);
        storage::set_total(&env, disbursement.procurement_id, new_total);
        storage::extend_instance(&env);

        DisbursementEvents::registered(&env, &disbursement, new_total);
        Ok(disbursement)
    }

    /// Moves a disbursement to a new status.
    ///
    /// # Arguments
    /// * `env` - The contract environment
    /// * `caller` - Must be the admin
    /// * `id` - The disbursement to update
    /// * `new_status` - Target status
    ///
    /// # Errors
    /// * `Unauthorized` - If caller is not admin
    /// * `DisbursementNotFound` - Unknown id
    /// * `InvalidTransition` - The lifecycle does not allow the move
    pub fn update_disbursement_status(
        env: Env,
        caller: Address,
        id: u64,
        new_status: DisbursementStatus,
    ) -> Result<Disbursement, DisbursementError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut disbursement =
            storage::get_disbursement(&env, id).ok_or(DisbursementError::DisbursementNotFound)?;
        let previous = disbursement.status;
        validate_transition(previous, new_status)?;

        // Cancelling leaves the disbursed total as it is.
        disbursement.status = new_status;
        storage::put_disbursement(&env, &disbursement);
        storage::extend_instance(&env);

        DisbursementEvents::status_changed(&env, id, previous, new_status);
        Ok(disbursement)
    }

    /// Returns the running disbursed total for a procurement, zero if none.
    pub fn get_disbursed_total(env: Env, procurement_id: u64) -> i128 {
        storage::get_total(&env, procurement_id)
    }

    /// Retrieves a disbursement by ID.
    pub fn get_disbursement(env: Env, id: u64) -> Option<Disbursement> {
        storage::get_disbursement(&env, id)
    }

    /// Returns a page of ids of disbursements registered against a
    /// procurement, oldest first.
    ///
    /// # Arguments
    /// * `env` - The contract environment
    /// * `procurement_id` - The procurement to list
    /// * `start` - Position of the first id to return
    /// * `limit` - Maximum number of ids, capped at `MAX_PAGE_SIZE`
    pub fn get_procurement_disbursements(
        env: Env,
        procurement_id: u64,
        start: u32,
        limit: u32,
    ) -> Vec<u64> {
        storage::get_index_page(&env, procurement_id, start, limit)
    }

    /// Returns how many disbursements were registered against a procurement.
    pub fn get_procurement_disbursement_count(env: Env, procurement_id: u64) -> u32 {
        storage::index_len(&env, procurement_id)
    }

    /// Returns the last assigned disbursement ID.
    pub fn get_last_disbursement_id(env: Env) -> u64 {
        storage::last_id(&env)
    }

    /// Returns the admin address.
    pub fn get_admin(env: Env) -> Result<Address, DisbursementError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(DisbursementError::NotInitialized)
    }

    /// Updates the admin address.
    pub fn set_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), DisbursementError> {
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&DataKey::Admin, &new_admin);
        storage::extend_instance(&env);
        DisbursementEvents::admin_changed(&env, &new_admin);
        Ok(())
    }

    /// Returns the procurement ledger contract consulted on registration.
    pub fn get_procurement_source(env: Env) -> Result<Address, DisbursementError> {
        Self::procurement_source(&env)
    }

    /// Points the tracker at a different procurement ledger contract.
    pub fn set_procurement_source(
        env: Env,
        admin: Address,
        procurement_source: Address,
    ) -> Result<(), DisbursementError> {
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        env.storage()
            .instance()
            .set(&DataKey::ProcurementSource, &procurement_source);
        storage::extend_instance(&env);
        DisbursementEvents::source_changed(&env, &procurement_source);
        Ok(())
    }

    fn procurement_source(env: &Env) -> Result<Address, DisbursementError> {
        env.storage()
            .instance()
            .get(&DataKey::ProcurementSource)
            .ok_or(DisbursementError::NotInitialized)
    }

    // Internal helper to verify admin
    fn require_admin(env: &Env, caller: &Address) -> Result<(), DisbursementError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(DisbursementError::NotInitialized)?;

        if *caller != admin {
            return Err(DisbursementError::Unauthorized);
        }
        Ok(())
    }
}
