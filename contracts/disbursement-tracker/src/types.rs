//! Data types, storage keys and events for disbursement tracking.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// Ledgers per day at ~5 second close time.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage (configuration, id counter) is kept alive for a week.
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Persistent entries (records, totals, index) are kept alive for 30 days.
pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Maximum number of ids returned by one index page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Lifecycle status of a disbursement.
///
/// ```text
/// Scheduled ──► Released ──► Completed
///     │             │
///     └──► Cancelled ◄┘
/// ```
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DisbursementStatus {
    /// Registered against a procurement; funds not yet released.
    Scheduled,
    /// Funds released to the payee.
    Released,
    /// Release confirmed and closed out.
    Completed,
    /// Withdrawn before completion.
    Cancelled,
}

/// A release of funds recorded against a procurement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Disbursement {
    /// Unique id, assigned at registration. Ignored on input.
    pub id: u64,
    /// Procurement this disbursement draws from
    pub procurement_id: u64,
    /// Disbursed amount in the procurement's smallest unit
    pub amount: i128,
    /// Currency code (e.g. "php")
    pub currency: String,
    /// Actor recording the disbursement
    pub performed_by: Address,
    /// Optional pointer to supporting documentation (e.g. an IPFS URI)
    pub evidence_uri: Option<String>,
    /// Current lifecycle status. Ignored on input.
    pub status: DisbursementStatus,
}

/// Storage keys for contract state.
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Admin address
    Admin,
    /// Address of the procurement ledger contract
    ProcurementSource,
    /// Last assigned disbursement id
    LastDisbursementId,
    /// Stored disbursement by id
    Disbursement(u64),
    /// Running disbursed total by procurement id
    DisbursedTotal(u64),
    /// Disbursement id at a position in a procurement's index
    ProcurementDisbursement(u64, u32),
    /// Number of disbursements registered against a procurement
    ProcurementDisbursementCount(u64),
}

/// Events emitted by the disbursement tracker.
pub struct DisbursementEvents;

impl DisbursementEvents {
    /// Event emitted once the contract is configured.
    pub fn initialized(env: &Env, admin: &Address, procurement_source: &Address) {
        let topics = (symbol_short!("tracker"), symbol_short!("init"));
        env.events()
            .publish(topics, (admin.clone(), procurement_source.clone()));
    }

    pub fn admin_changed(env: &Env, new_admin: &Address) {
        let topics = (symbol_short!("tracker"), symbol_short!("admin"));
        env.events().publish(topics, new_admin.clone());
    }

    pub fn source_changed(env: &Env, procurement_source: &Address) {
        let topics = (symbol_short!("tracker"), symbol_short!("source"));
        env.events().publish(topics, procurement_source.clone());
    }

    /// Event emitted when a disbursement is registered.
    ///
    /// Carries the procurement's running total after this registration.
    pub fn registered(env: &Env, disbursement: &Disbursement, new_total: i128) {
        let topics = (
            symbol_short!("disburse"),
            symbol_short!("created"),
            disbursement.procurement_id,
        );
        env.events().publish(
            topics,
            (
                disbursement.id,
                disbursement.amount,
                disbursement.performed_by.clone(),
                new_total,
            ),
        );
    }

    /// Event emitted when a disbursement moves to a new status.
    pub fn status_changed(
        env: &Env,
        id: u64,
        from: DisbursementStatus,
        to: DisbursementStatus,
    ) {
        let topics = (symbol_short!("disburse"), symbol_short!("status"), id);
        env.events().publish(topics, (from, to));
    }
}
