//! Auto-switch advisory
//!
//! A static mapping from detected activity conditions to a suggested global
//! theme. This module only suggests: applying a suggestion is an explicit
//! action by a higher-authority caller, never automatic.

use strata_core::TriggerCondition;

/// Built-in global theme catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlobalTheme {
    Calm,
    Executive,
    Focus,
    Creative,
    Neutral,
}

impl GlobalTheme {
    /// Stable theme id for config/serialization
    pub fn id(self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Executive => "executive",
            Self::Focus => "focus",
            Self::Creative => "creative",
            Self::Neutral => "neutral",
        }
    }

    /// User-facing display name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Executive => "Executive",
            Self::Focus => "Focus",
            Self::Creative => "Creative",
            Self::Neutral => "Neutral",
        }
    }

    /// Full theme list
    pub fn all() -> &'static [GlobalTheme] {
        const THEMES: [GlobalTheme; 5] = [
            GlobalTheme::Calm,
            GlobalTheme::Executive,
            GlobalTheme::Focus,
            GlobalTheme::Creative,
            GlobalTheme::Neutral,
        ];
        &THEMES
    }
}

impl std::fmt::Display for GlobalTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Suggest a global theme for a detected condition. Pure lookup; performs no
/// mutation and applies nothing.
pub fn suggested_theme(trigger: TriggerCondition) -> GlobalTheme {
    match trigger {
        TriggerCondition::StressDetected => GlobalTheme::Calm,
        TriggerCondition::DecisionPoint => GlobalTheme::Executive,
        TriggerCondition::DeepFocus => GlobalTheme::Focus,
        TriggerCondition::Celebration => GlobalTheme::Creative,
        TriggerCondition::Collaboration => GlobalTheme::Neutral,
    }
}
