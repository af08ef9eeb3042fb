//! Shared encode/decode helpers for SQLite ↔ domain type conversions.
//!
//! Flags are stored as `INTEGER` 0/1 under CHECK constraints, timestamps as
//! signed seconds, and player variables as a JSON `TEXT` blob.

use adventure::Variables;

use crate::persistence::PersistenceError;

// ── flags ──────────────────────────────────────────────────────────────

pub fn encode_flag(flag: bool) -> i64 {
    if flag {
        1
    } else {
        0
    }
}

pub fn decode_flag(value: i64) -> bool {
    value != 0
}

// ── timestamps ─────────────────────────────────────────────────────────

pub fn encode_timestamp(ts: u64) -> i64 {
    ts as i64
}

pub fn decode_timestamp(value: i64) -> u64 {
    value.max(0) as u64
}

// ── variables ──────────────────────────────────────────────────────────

/// Serialize player variables for the `variables` column.
pub fn encode_variables(variables: &Variables) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(variables)?)
}

/// Parse the `variables` column. Blank text reads as an empty bag.
pub fn decode_variables(text: &str) -> Result<Variables, PersistenceError> {
    if text.trim().is_empty() {
        return Ok(Variables::new());
    }
    Ok(serde_json::from_str(text)?)
}
