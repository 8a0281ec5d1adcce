//! Classification of replace results

use crate::error::KcError;
use serde_json::Value;

/// Result of a full-replace write-back
#[derive(Debug)]
pub enum ReplaceOutcome {
    /// The server accepted the new object
    Replaced(Value),
    /// The object changed since it was read (HTTP 409); treated as success
    Conflict,
    Failed(KcError),
}

/// Split a replace result into updated, conflicting, or failed
pub fn classify_replace(result: Result<Value, KcError>) -> ReplaceOutcome {
    match result {
        Ok(value) => ReplaceOutcome::Replaced(value),
        Err(err) if err.is_conflict() => ReplaceOutcome::Conflict,
        Err(err) => ReplaceOutcome::Failed(err),
    }
}
