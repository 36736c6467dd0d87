//! Persistence for disbursement records and per-procurement aggregates.
//!
//! Records, totals and the per-procurement index live in persistent storage;
//! the id counter sits in instance storage next to the configuration. Every
//! write extends the entry's TTL so long-lived records are not archived.
//!
//! The per-procurement index is one entry per disbursement plus a count, so
//! registration touches a fixed number of entries however many disbursements
//! a procurement already has.

use soroban_sdk::{Env, Vec};

use crate::types::{
    DataKey, Disbursement, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_PAGE_SIZE,
    PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD,
};

/// Keeps configuration and the id counter alive.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn put_disbursement(env: &Env, disbursement: &Disbursement) {
    let key = DataKey::Disbursement(disbursement.id);
    env.storage().persistent().set(&key, disbursement);
    extend_persistent(env, &key);
}

pub fn get_disbursement(env: &Env, id: u64) -> Option<Disbursement> {
    env.storage().persistent().get(&DataKey::Disbursement(id))
}

/// Running disbursed total for a procurement, zero if nothing was recorded.
pub fn get_total(env: &Env, procurement_id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::DisbursedTotal(procurement_id))
        .unwrap_or(0)
}

pub fn set_total(env: &Env, procurement_id: u64, total: i128) {
    let key = DataKey::DisbursedTotal(procurement_id);
    env.storage().persistent().set(&key, &total);
    extend_persistent(env, &key);
}

/// Returns a fresh disbursement id and persists the advanced counter.
///
/// Ids start at 1 and are never handed out twice.
pub fn next_id(env: &Env) -> u64 {
    let id = last_id(env) + 1;
    env.storage()
        .instance()
        .set(&DataKey::LastDisbursementId, &id);
    id
}

pub fn last_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LastDisbursementId)
        .unwrap_or(0)
}

/// Number of disbursements registered against a procurement.
pub fn index_len(env: &Env, procurement_id: u64) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ProcurementDisbursementCount(procurement_id))
        .unwrap_or(0)
}

pub fn append_to_index(env: &Env, procurement_id: u64, id: u64) {
    let position = index_len(env, procurement_id);

    let entry_key = DataKey::ProcurementDisbursement(procurement_id, position);
    env.storage().persistent().set(&entry_key, &id);
    extend_persistent(env, &entry_key);

    let count_key = DataKey::ProcurementDisbursementCount(procurement_id);
    env.storage().persistent().set(&count_key, &(position + 1));
    extend_persistent(env, &count_key);
}

/// Disbursement ids for a procurement in registration order, starting at
/// `start` and returning at most `limit` (capped at `MAX_PAGE_SIZE`) ids.
pub fn get_index_page(env: &Env, procurement_id: u64, start: u32, limit: u32) -> Vec<u64> {
    let mut ids = Vec::new(env);
    let end = start
        .saturating_add(limit.min(MAX_PAGE_SIZE))
        .min(index_len(env, procurement_id));

    for position in start..end {
        if let Some(id) = env
            .storage()
            .persistent()
            .get(&DataKey::ProcurementDisbursement(procurement_id, position))
        {
            ids.push_back(id);
        }
    }
    ids
}
