//! Theme scope levels and their permission tables
//!
//! Five authority levels, blended in a canonical order. Each level carries a
//! static allow/deny table over semantic variable categories; the tables are
//! disjoint by construction.

use serde::{Deserialize, Serialize};

/// Authority level of a theme layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeScope {
    Global,
    Sphere,
    Meeting,
    Agent,
    Overlay,
}

impl ThemeScope {
    /// Stable id for config/serialization
    pub fn id(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Sphere => "sphere",
            Self::Meeting => "meeting",
            Self::Agent => "agent",
            Self::Overlay => "overlay",
        }
    }

    /// Canonical blending order: global < sphere < meeting < agent < overlay.
    /// Used as the tie-break when two layers share a weight.
    pub fn blend_rank(self) -> u8 {
        match self {
            Self::Global => 0,
            Self::Sphere => 1,
            Self::Meeting => 2,
            Self::Agent => 3,
            Self::Overlay => 4,
        }
    }

    /// Full scope list in canonical order
    pub fn all() -> &'static [ThemeScope] {
        const SCOPES: [ThemeScope; 5] = [
            ThemeScope::Global,
            ThemeScope::Sphere,
            ThemeScope::Meeting,
            ThemeScope::Agent,
            ThemeScope::Overlay,
        ];
        &SCOPES
    }
}

impl std::fmt::Display for ThemeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Semantic category of a theme variable key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePermission {
    Background,
    Accent,
    Typography,
    Layout,
    Motion,
    Elevation,
}

/// Static allow/deny table for one scope level
#[derive(Clone, Copy, Debug)]
pub struct ThemeScopeDefinition {
    /// Default weight for layers created at this scope
    pub weight: f32,
    pub allowed: &'static [ThemePermission],
    pub forbidden: &'static [ThemePermission],
}

impl ThemeScopeDefinition {
    pub fn allows(&self, permission: ThemePermission) -> bool {
        self.allowed.contains(&permission) && !self.forbidden.contains(&permission)
    }
}

use ThemePermission::*;

const GLOBAL_DEF: ThemeScopeDefinition = ThemeScopeDefinition {
    weight: 0.2,
    allowed: &[Background, Accent, Typography, Motion],
    forbidden: &[Layout, Elevation],
};

const SPHERE_DEF: ThemeScopeDefinition = ThemeScopeDefinition {
    weight: 0.4,
    allowed: &[Background, Accent, Typography, Layout, Motion],
    forbidden: &[Elevation],
};

const MEETING_DEF: ThemeScopeDefinition = ThemeScopeDefinition {
    weight: 0.7,
    allowed: &[Background, Accent, Motion, Elevation],
    forbidden: &[Layout, Typography],
};

const AGENT_DEF: ThemeScopeDefinition = ThemeScopeDefinition {
    weight: 0.6,
    allowed: &[Accent, Motion, Elevation],
    forbidden: &[Background, Layout, Typography],
};

const OVERLAY_DEF: ThemeScopeDefinition = ThemeScopeDefinition {
    weight: 0.9,
    allowed: &[Background, Accent, Typography, Layout, Motion, Elevation],
    forbidden: &[],
};

/// Look up the static definition for a scope level
pub fn scope_definition(scope: ThemeScope) -> &'static ThemeScopeDefinition {
    match scope {
        ThemeScope::Global => &GLOBAL_DEF,
        ThemeScope::Sphere => &SPHERE_DEF,
        ThemeScope::Meeting => &MEETING_DEF,
        ThemeScope::Agent => &AGENT_DEF,
        ThemeScope::Overlay => &OVERLAY_DEF,
    }
}

/// Classify a variable key into its semantic permission category.
///
/// Returns `None` for keys outside the vocabulary; the validator treats
/// those as violations since they cannot be checked against a scope table.
pub fn permission_for(key: &str) -> Option<ThemePermission> {
    match key {
        "background" | "surface" | "backdrop" => return Some(Background),
        "accent" | "primary" | "highlight" => return Some(Accent),
        "layout" | "density" | "grid" => return Some(Layout),
        "elevation" | "z-index" | "glow" => return Some(Elevation),
        _ => {}
    }
    if key.starts_with("font") || key.starts_with("text") || key.starts_with("typography") {
        Some(Typography)
    } else if key.starts_with("background") || key.starts_with("surface") {
        Some(Background)
    } else if key.starts_with("accent") {
        Some(Accent)
    } else if key.starts_with("spacing") || key.starts_with("gap") || key.starts_with("layout") {
        Some(Layout)
    } else if key.starts_with("motion")
        || key.starts_with("animation")
        || key.starts_with("transition")
    {
        Some(Motion)
    } else if key.starts_with("shadow") || key.starts_with("elevation") {
        Some(Elevation)
    } else {
        None
    }
}
