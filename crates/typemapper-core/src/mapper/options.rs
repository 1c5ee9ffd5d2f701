//! Mapping options
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use super::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// What a function default turns into when a missing field is synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultFnMode {
    /// Store the function bound to the result object, uncalled
    #[default]
    Bind,
    /// Call the function on the result object and store its value
    Invoke,
}

/// General options for a mapping call.
///
/// Every flag is off by default. `fill_missing` in particular is a caller
/// choice; [`MapOptions::filling`] is the preset that turns it on.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapOptions {
    /// Also copy source fields the schema does not describe
    pub include_undescribed: bool,
    /// Synthesize described fields missing from the source
    pub fill_missing: bool,
    pub default_fn_mode: DefaultFnMode,
    #[serde(skip)]
    diagnostics: Arc<dyn Diagnostics>,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with `fill_missing` turned on
    pub fn filling() -> Self {
        Self::default().with_fill_missing(true)
    }

    pub fn with_include_undescribed(mut self, include: bool) -> Self {
        self.include_undescribed = include;
        self
    }

    pub fn with_fill_missing(mut self, fill: bool) -> Self {
        self.fill_missing = fill;
        self
    }

    pub fn with_default_fn_mode(mut self, mode: DefaultFnMode) -> Self {
        self.default_fn_mode = mode;
        self
    }

    /// Route warnings to the given sink
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Read options from a JSON value; missing keys keep their defaults
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read options from JSON text; missing keys keep their defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            include_undescribed: false,
            fill_missing: false,
            default_fn_mode: DefaultFnMode::Bind,
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }
}

impl fmt::Debug for MapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOptions")
            .field("include_undescribed", &self.include_undescribed)
            .field("fill_missing", &self.fill_missing)
            .field("default_fn_mode", &self.default_fn_mode)
            .finish_non_exhaustive()
    }
}
