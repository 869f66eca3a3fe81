//! Theme layer registry
//!
//! Process-wide store of active layers, scoped to the session and torn down
//! on logout. CRUD is expected from a single logical owner per layer id;
//! `add_layer` is a last-write-wins upsert.

use crate::layer::ThemeLayer;
use crate::scope::ThemeScope;
use crate::validate::{validate_layer, ThemeValidationResult};
use rustc_hash::FxHashMap;

/// Append/remove/update store of active theme layers
#[derive(Debug, Default)]
pub struct ThemeLayerRegistry {
    layers: FxHashMap<String, ThemeLayer>,
    /// Bumped on every mutation; lets the engine detect staleness cheaply
    revision: u64,
}

impl ThemeLayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a layer by id.
    ///
    /// The layer is validated on the way in: violating variable keys are
    /// stripped and reported, the rest of the layer is stored and active.
    pub fn add_layer(&mut self, mut layer: ThemeLayer) -> ThemeValidationResult {
        layer.weight = layer.weight.clamp(0.0, 1.0);
        let result = validate_layer(&mut layer);

        if self.layers.insert(layer.id.clone(), layer).is_some() {
            tracing::debug!("layer replaced by upsert");
        }
        self.revision += 1;
        result
    }

    pub fn remove_layer(&mut self, id: &str) -> Option<ThemeLayer> {
        let removed = self.layers.remove(id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Update a layer's weight, silently clamping to `[0, 1]`.
    ///
    /// Returns false when no layer has the given id.
    pub fn update_weight(&mut self, id: &str, weight: f32) -> bool {
        let Some(layer) = self.layers.get_mut(id) else {
            return false;
        };
        let clamped = weight.clamp(0.0, 1.0);
        if clamped != weight {
            tracing::warn!(layer = %id, requested = weight, "layer weight clamped");
        }
        layer.weight = clamped;
        self.revision += 1;
        true
    }

    pub fn get_layer(&self, id: &str) -> Option<&ThemeLayer> {
        self.layers.get(id)
    }

    /// All layers at one scope level, in unspecified order
    pub fn layers_by_scope(&self, scope: ThemeScope) -> Vec<&ThemeLayer> {
        self.layers.values().filter(|l| l.scope == scope).collect()
    }

    /// Snapshot of every active layer, in unspecified order
    pub fn active_layers(&self) -> Vec<&ThemeLayer> {
        self.layers.values().collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Monotone mutation counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drop every layer (session teardown)
    pub fn clear(&mut self) {
        if !self.layers.is_empty() {
            self.layers.clear();
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_layer_is_idempotent_upsert() {
        let mut registry = ThemeLayerRegistry::new();
        registry.add_layer(ThemeLayer::new("a", ThemeScope::Global).with_variable("background", "#111"));
        registry.add_layer(ThemeLayer::new("a", ThemeScope::Global).with_variable("background", "#222"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get_layer("a").unwrap().variables.get("background").unwrap(),
            "#222"
        );
    }

    #[test]
    fn test_add_validates_and_strips() {
        let mut registry = ThemeLayerRegistry::new();
        let result = registry.add_layer(
            ThemeLayer::new("g", ThemeScope::Global)
                .with_variable("background", "#111")
                .with_variable("layout", "grid"),
        );
        assert!(!result.valid);
        assert!(!registry.get_layer("g").unwrap().variables.contains_key("layout"));
    }

    #[test]
    fn test_update_weight_clamps() {
        let mut registry = ThemeLayerRegistry::new();
        registry.add_layer(ThemeLayer::new("a", ThemeScope::Sphere));

        assert!(registry.update_weight("a", 2.5));
        assert_eq!(registry.get_layer("a").unwrap().weight, 1.0);
        assert!(registry.update_weight("a", -1.0));
        assert_eq!(registry.get_layer("a").unwrap().weight, 0.0);
        assert!(!registry.update_weight("missing", 0.5));
    }

    #[test]
    fn test_layers_by_scope() {
        let mut registry = ThemeLayerRegistry::new();
        registry.add_layer(ThemeLayer::new("g", ThemeScope::Global));
        registry.add_layer(ThemeLayer::new("m", ThemeScope::Meeting));
        registry.add_layer(ThemeLayer::new("a1", ThemeScope::Agent));
        registry.add_layer(ThemeLayer::new("a2", ThemeScope::Agent));

        assert_eq!(registry.layers_by_scope(ThemeScope::Agent).len(), 2);
        assert_eq!(registry.layers_by_scope(ThemeScope::Overlay).len(), 0);
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut registry = ThemeLayerRegistry::new();
        let r0 = registry.revision();
        registry.add_layer(ThemeLayer::new("a", ThemeScope::Global));
        assert!(registry.revision() > r0);

        let r1 = registry.revision();
        registry.remove_layer("missing");
        assert_eq!(registry.revision(), r1);
        registry.remove_layer("a");
        assert!(registry.revision() > r1);
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = ThemeLayerRegistry::new();
        registry.add_layer(ThemeLayer::new("a", ThemeScope::Global));
        registry.clear();
        assert!(registry.is_empty());
    }
}
