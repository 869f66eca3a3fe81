//! Sphere configuration
//!
//! A sphere is a top-level life/work domain (Personal, Business, ...) that
//! provides its own presentation context. Configs are loaded out-of-band,
//! cached, and read-only to the resolver; every field has a default so a
//! partially specified document still resolves.

use crate::color::Color;
use crate::context::{UserPermission, UserRole};
use serde::{Deserialize, Serialize};

/// Errors surfaced while loading or parsing a sphere config.
///
/// These never propagate out of resolution; the resolver falls back to
/// defaults and flags the snapshot instead.
#[derive(Debug, thiserror::Error)]
pub enum SphereConfigError {
    #[error("invalid sphere config document: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("sphere {sphere_id} not found")]
    NotFound { sphere_id: String },
    #[error("sphere {sphere_id} unavailable: {reason}")]
    Unavailable { sphere_id: String, reason: String },
}

/// How much motion the sphere wants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionProfile {
    #[default]
    Full,
    Reduced,
    Still,
}

/// Rendering gate for the sphere
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereVisibility {
    /// Minimum role allowed to render this sphere's elements
    pub min_role: UserRole,
    /// Extra permission required on top of the role, if any
    pub required_permission: Option<UserPermission>,
}

impl Default for SphereVisibility {
    /// An absent visibility block denies nobody: the floor role is `Guest`,
    /// not `UserRole::default()` (which is `Member`).
    fn default() -> Self {
        Self {
            min_role: UserRole::Guest,
            required_permission: None,
        }
    }
}

fn default_accent() -> Color {
    Color::from_hex(0x4A90D9)
}

/// Domain-specific presentation configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub sphere_id: String,
    pub display_name: String,
    /// Accent color used for glow and gradients
    #[serde(default = "default_accent")]
    pub accent: Color,
    /// Preferred global theme id for this sphere, if any
    pub base_theme: Option<String>,
    /// Chrome density adjustment: negative demotes ui mode, positive is
    /// ignored by the resolver (depth never escalates)
    pub density_bias: i8,
    pub motion_profile: MotionProfile,
    pub visibility: SphereVisibility,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            sphere_id: String::new(),
            display_name: String::new(),
            accent: default_accent(),
            base_theme: None,
            density_bias: 0,
            motion_profile: MotionProfile::Full,
            visibility: SphereVisibility::default(),
        }
    }
}

impl SphereConfig {
    pub fn new(sphere_id: impl Into<String>) -> Self {
        Self {
            sphere_id: sphere_id.into(),
            ..Self::default()
        }
    }

    /// Parse a sphere config from a TOML document
    pub fn from_toml_str(doc: &str) -> Result<Self, SphereConfigError> {
        Ok(toml::from_str(doc)?)
    }

    /// Whether the given user may render this sphere's elements
    pub fn allows(&self, role: UserRole, permissions: &[UserPermission]) -> bool {
        if role < self.visibility.min_role {
            return false;
        }
        match self.visibility.required_permission {
            Some(required) => permissions.contains(&required),
            None => true,
        }
    }
}
