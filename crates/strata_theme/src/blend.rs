//! Theme blending
//!
//! Deterministic merge of active layers into one flat variable map. Layers
//! apply in ascending weight order (ties broken by the canonical scope
//! order), later layers overwriting earlier keys.
//!
//! One hard invariant sits on top of the generic merge: an agent layer may
//! never outrank a meeting layer, regardless of relative weight. After the
//! merge, any key whose winner is an agent layer is re-asserted from the
//! meeting layers that also set it.

use crate::layer::{ThemeLayer, VariableMap};
use crate::scope::{permission_for, scope_definition, ThemeScope};

/// Whether `higher` is allowed to overwrite a key already set by `lower`
pub fn can_override(higher: &ThemeLayer, lower: &ThemeLayer) -> bool {
    if higher.scope == ThemeScope::Agent && lower.scope == ThemeScope::Meeting {
        return false;
    }
    higher.weight >= lower.weight
}

/// Keys of a layer that pass its scope's permission table.
///
/// Registry-held layers arrive pre-stripped; ad-hoc layers passed straight
/// to [`blend`] get the same treatment here.
fn permitted_variables(layer: &ThemeLayer) -> impl Iterator<Item = (&String, &String)> {
    let def = scope_definition(layer.scope);
    layer.variables.iter().filter(move |(key, _)| {
        permission_for(key).is_some_and(|p| def.allows(p))
    })
}

/// Merge validated layers into one effective variable map
pub fn blend(layers: &[&ThemeLayer]) -> VariableMap {
    let mut ordered: Vec<&ThemeLayer> = layers.to_vec();
    ordered.sort_by(|a, b| {
        a.weight
            .total_cmp(&b.weight)
            .then_with(|| a.scope.blend_rank().cmp(&b.scope.blend_rank()))
    });

    let mut blended = VariableMap::default();
    let mut winners: rustc_hash::FxHashMap<String, ThemeScope> = Default::default();

    for layer in &ordered {
        for (key, value) in permitted_variables(layer) {
            blended.insert(key.clone(), value.clone());
            winners.insert(key.clone(), layer.scope);
        }
    }

    // Meeting beats agent no matter the weights: re-apply meeting keys
    // wherever an agent layer currently holds the key.
    for layer in ordered.iter().filter(|l| l.scope == ThemeScope::Meeting) {
        for (key, value) in permitted_variables(layer) {
            if winners.get(key) == Some(&ThemeScope::Agent) {
                tracing::trace!(key = %key, "meeting layer re-asserted over agent");
                blended.insert(key.clone(), value.clone());
                winners.insert(key.clone(), ThemeScope::Meeting);
            }
        }
    }

    blended
}
