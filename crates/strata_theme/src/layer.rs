//! Theme layers
//!
//! A layer is a named, weighted bundle of presentation variables scoped to
//! one authority level. Layers are created by whichever subsystem needs to
//! express presence (a sphere view, a meeting room, an agent avatar) and
//! removed on unmount.

use crate::scope::{scope_definition, ThemeScope};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Flat map of variable keys to values, e.g. `"background" -> "#1A1A2E"`
pub type VariableMap = FxHashMap<String, String>;

/// A weighted bundle of presentation variables at one scope level.
///
/// At most one `meeting` layer should be active at a time; this is a
/// convention of the callers, not enforced by the data structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeLayer {
    pub id: String,
    pub scope: ThemeScope,
    /// Blending weight in `[0, 1]`
    pub weight: f32,
    pub variables: VariableMap,
}

impl ThemeLayer {
    /// Create an empty layer with the scope's default weight
    pub fn new(id: impl Into<String>, scope: ThemeScope) -> Self {
        Self {
            id: id.into(),
            scope,
            weight: scope_definition(scope).weight,
            variables: VariableMap::default(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight.clamp(0.0, 1.0);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }
}
