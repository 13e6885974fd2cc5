// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema migrations applied to raw snapshot JSON before deserializing.

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("snapshot version {0} is newer than supported {1}")]
    TooNew(u32, u32),
    #[error("no migration path from v{0} to v{1}")]
    NoPath(u32, u32),
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

/// One step between adjacent schema versions.
pub trait Migration: Send + Sync {
    fn source_version(&self) -> u32;
    fn target_version(&self) -> u32;
    fn migrate(&self, snapshot: &mut Value) -> Result<(), MigrationError>;
}

pub struct MigrationRegistry {
    pub(crate) migrations: Vec<Box<dyn Migration>>,
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self { migrations: vec![Box::new(BareStateToEnvelope)] }
    }

    /// Version of a raw document; a document without `v` is a bare v0 state.
    pub fn version_of(doc: &Value) -> u32 {
        doc.get("v").and_then(Value::as_u64).map(|v| v as u32).unwrap_or(0)
    }

    pub fn migrate_to(&self, mut doc: Value, target: u32) -> Result<Value, MigrationError> {
        let mut current = Self::version_of(&doc);
        if current > target {
            return Err(MigrationError::TooNew(current, target));
        }
        while current < target {
            let step = self
                .migrations
                .iter()
                .find(|m| m.source_version() == current)
                .ok_or(MigrationError::NoPath(current, target))?;
            step.migrate(&mut doc)?;
            current = step.target_version();
            if let Some(obj) = doc.as_object_mut() {
                obj.insert("v".into(), current.into());
            }
        }
        Ok(doc)
    }
}

/// v0 files hold the state object directly, with no envelope.
struct BareStateToEnvelope;

impl Migration for BareStateToEnvelope {
    fn source_version(&self) -> u32 {
        0
    }
    fn target_version(&self) -> u32 {
        1
    }
    fn migrate(&self, snapshot: &mut Value) -> Result<(), MigrationError> {
        if !snapshot.is_object() {
            return Err(MigrationError::Malformed("expected a JSON object".into()));
        }
        let state = snapshot.take();
        *snapshot = json!({
            "v": 1,
            "seq": 0,
            "saved_at": "1970-01-01T00:00:00Z",
            "state": state,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
