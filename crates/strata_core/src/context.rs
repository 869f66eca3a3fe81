//! Session and per-resolution context
//!
//! [`UserContext`] is supplied once per session and immutable within a
//! resolution call. [`ResolutionContext`] bundles every signal the dimension
//! resolver reads; resolution is a pure function of this struct.

use crate::activity::ActivityState;
use crate::metrics::{ActivityMetrics, ContentMetrics};
use crate::sphere::SphereConfig;
use serde::{Deserialize, Serialize};

/// User role, ordered by authority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Guest,
    #[default]
    Member,
    Moderator,
    Admin,
}

/// Capability grants attached to a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserPermission {
    Render,
    ViewSphere,
    JoinMeetings,
    OperateAgents,
    CustomizeThemes,
}

/// Accessibility preferences, read once per session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub reduced_motion: bool,
    pub high_contrast: bool,
}

/// Who is looking at the element
#[derive(Clone, Debug)]
pub struct UserContext {
    pub user_id: String,
    pub role: UserRole,
    pub permissions: Vec<UserPermission>,
    pub preferences: UserPreferences,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            permissions: Vec::new(),
            preferences: UserPreferences::default(),
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<UserPermission>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn has_permission(&self, permission: UserPermission) -> bool {
        self.permissions.contains(&permission)
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::new("anonymous", UserRole::Member)
    }
}

/// Viewport width bucket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Compact,
    Medium,
    #[default]
    Expanded,
    Wide,
}

impl Breakpoint {
    /// Bucket a viewport width in logical pixels
    pub fn from_width(width: f32) -> Self {
        if width < 600.0 {
            Breakpoint::Compact
        } else if width < 1024.0 {
            Breakpoint::Medium
        } else if width < 1440.0 {
            Breakpoint::Expanded
        } else {
            Breakpoint::Wide
        }
    }
}

/// Everything the dimension resolver reads for one element
#[derive(Clone, Debug, Default)]
pub struct ResolutionContext {
    pub content: ContentMetrics,
    pub activity: ActivityMetrics,
    pub activity_state: ActivityState,
    pub user: UserContext,
    pub breakpoint: Breakpoint,
    /// Loaded sphere configuration; `None` resolves against built-in defaults
    pub sphere: Option<SphereConfig>,
    /// Nesting depth of the element in the consumer's tree
    pub depth: u8,
}
