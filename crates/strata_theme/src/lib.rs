//! Strata Theme System
//!
//! Scoped theme layers with authority-ranked blending.
//!
//! # Overview
//!
//! - **Scopes**: five authority levels (global, sphere, meeting, agent,
//!   overlay) with static allow/deny permission tables per level
//! - **Registry**: session-scoped layer store with last-write-wins upsert
//! - **Validation**: violating variable keys are stripped per layer, never
//!   rejected wholesale
//! - **Blending**: deterministic weight-ordered merge with one hard
//!   invariant — agent never outranks meeting
//! - **Advisory**: pure trigger-to-theme suggestions; nothing is applied
//!   automatically
//!
//! # Quick Start
//!
//! ```rust
//! use strata_theme::{blend, ThemeLayer, ThemeLayerRegistry, ThemeScope};
//!
//! let mut registry = ThemeLayerRegistry::new();
//! registry.add_layer(
//!     ThemeLayer::new("base", ThemeScope::Global)
//!         .with_weight(0.1)
//!         .with_variable("background", "#111"),
//! );
//! registry.add_layer(
//!     ThemeLayer::new("room", ThemeScope::Meeting)
//!         .with_weight(0.8)
//!         .with_variable("background", "#222"),
//! );
//!
//! let blended = blend(&registry.active_layers());
//! assert_eq!(blended.get("background").unwrap(), "#222");
//! ```

pub mod advisory;
pub mod blend;
pub mod layer;
pub mod registry;
pub mod scope;
pub mod validate;

pub use advisory::{suggested_theme, GlobalTheme};
pub use blend::{blend, can_override};
pub use layer::{ThemeLayer, VariableMap};
pub use registry::ThemeLayerRegistry;
pub use scope::{permission_for, scope_definition, ThemePermission, ThemeScope, ThemeScopeDefinition};
pub use validate::{validate_layer, validate_theme_change, ThemeValidationResult, ThemeViolation, ViolationReason};
