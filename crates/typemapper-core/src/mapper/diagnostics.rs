//! Warning channel for non-fatal mapping problems
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use crate::schema::SchemaEntry;
use std::sync::Mutex;

/// Receives warnings raised while mapping
pub trait Diagnostics: Send + Sync {
    /// A described field resolved to no conversion and was copied unchanged
    fn missing_converter(&self, key: &str, entry: &SchemaEntry);
}

/// Discards every warning
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn missing_converter(&self, _key: &str, _entry: &SchemaEntry) {}
}

/// Forwards warnings to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn missing_converter(&self, key: &str, entry: &SchemaEntry) {
        log::warn!(
            "Missing converter for type mapping! Mapping key: {}, mapping options: {:?}",
            key,
            entry
        );
    }
}

/// A recorded missing-converter warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingConverter {
    pub key: String,
    pub entry: String,
}

/// Keeps warnings in memory
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    warnings: Mutex<Vec<MissingConverter>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings recorded so far
    pub fn warnings(&self) -> Vec<MissingConverter> {
        match self.warnings.lock() {
            Ok(warnings) => warnings.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn missing_converter(&self, key: &str, entry: &SchemaEntry) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(MissingConverter {
                key: key.to_string(),
                entry: format!("{:?}", entry),
            });
        }
    }
}
