//! Resolved presentation state
//!
//! [`ResolvedDimension`] is the sole output of dimension resolution: a flat
//! snapshot of every visual/behavioral property the rendering layer needs.
//! When `visible` is false the snapshot is a short-circuit — consumers must
//! not render and must not read any other field.

use crate::activity::ActivityState;
use crate::color::Color;
use crate::easing::Easing;

/// Size bucket for the element chrome
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

/// Chrome density mode. Exactly one mode per snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UiMode {
    Minimal,
    Compact,
    #[default]
    Standard,
    Expanded,
    Full,
}

impl UiMode {
    /// Step down one mode. Depth demotes, never escalates; floors at Minimal.
    pub fn demote(self) -> Self {
        match self {
            UiMode::Full => UiMode::Expanded,
            UiMode::Expanded => UiMode::Standard,
            UiMode::Standard => UiMode::Compact,
            UiMode::Compact | UiMode::Minimal => UiMode::Minimal,
        }
    }

    /// Demote `steps` times
    pub fn demoted_by(self, steps: u8) -> Self {
        (0..steps).fold(self, |mode, _| mode.demote())
    }
}

/// Shadow strength bucket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShadowLevel {
    None,
    #[default]
    Soft,
    Medium,
    Strong,
}

/// Ambient animation applied to the element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    #[default]
    None,
    Breathe,
    Pulse,
    Shimmer,
}

/// Border and silhouette styling
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    pub border_radius: f32,
    pub aspect_ratio: f32,
    pub shadow: ShadowLevel,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            border_radius: 8.0,
            aspect_ratio: 1.0,
            shadow: ShadowLevel::Soft,
        }
    }
}

/// Two-stop background gradient
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    pub from: Color,
    pub to: Color,
    pub angle_deg: f32,
}

impl Gradient {
    pub fn to_css(&self) -> String {
        format!(
            "linear-gradient({}deg, {}, {})",
            self.angle_deg,
            self.from.to_css(),
            self.to.to_css()
        )
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            from: Color::from_hex(0x2A2A3E),
            to: Color::from_hex(0x1A1A2E),
            angle_deg: 180.0,
        }
    }
}

/// Color treatment of the element surface
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorStyle {
    pub gradient: Gradient,
}

/// Outer glow styling
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle {
    pub enabled: bool,
    pub color: Color,
    pub intensity: f32,
    pub blur: f32,
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::TRANSPARENT,
            intensity: 0.0,
            blur: 0.0,
        }
    }
}

/// Property transition applied when the snapshot changes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSpec {
    pub property: &'static str,
    pub duration_ms: u32,
    pub easing: Easing,
    pub delay_ms: u32,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            property: "all",
            duration_ms: 200,
            easing: Easing::EaseOut,
            delay_ms: 0,
        }
    }
}

impl TransitionSpec {
    /// An instant transition (reduced motion)
    pub const fn none() -> Self {
        Self {
            property: "all",
            duration_ms: 0,
            easing: Easing::Linear,
            delay_ms: 0,
        }
    }
}

/// Child layout direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChildFlow {
    Row,
    #[default]
    Column,
}

/// How content beyond the element bounds behaves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverflowMode {
    Clip,
    #[default]
    Scroll,
    Expand,
}

/// Where and how the element grows as content accrues
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrowthAxis {
    pub child_flow: ChildFlow,
    pub overflow: OverflowMode,
}

/// Complete resolved presentation snapshot for one element.
///
/// `Default` is the worst-case degraded state the engine is contracted to
/// return: system defaults with full visibility.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedDimension {
    pub dimension: SizeClass,
    pub shape: ShapeStyle,
    pub color: ColorStyle,
    pub glow: GlowStyle,
    pub scale: f32,
    pub opacity: f32,
    pub animation: AnimationKind,
    pub transition: TransitionSpec,
    pub growth_axis: GrowthAxis,
    pub ui_mode: UiMode,
    pub z_index: i32,
    pub visible: bool,
    pub interactable: bool,
    pub activity_state: ActivityState,
    /// True when built-in defaults substituted for missing sphere config
    pub used_fallback: bool,
}

impl Default for ResolvedDimension {
    fn default() -> Self {
        Self {
            dimension: SizeClass::default(),
            shape: ShapeStyle::default(),
            color: ColorStyle::default(),
            glow: GlowStyle::default(),
            scale: 1.0,
            opacity: 1.0,
            animation: AnimationKind::None,
            transition: TransitionSpec::default(),
            growth_axis: GrowthAxis::default(),
            ui_mode: UiMode::Standard,
            z_index: 0,
            visible: true,
            interactable: true,
            activity_state: ActivityState::Idle,
            used_fallback: false,
        }
    }
}

impl ResolvedDimension {
    /// The single fatal short-circuit: rendering denied.
    ///
    /// Every other field keeps its default value and is contractually
    /// irrelevant; consumers must not read past `visible`.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            interactable: false,
            ..Self::default()
        }
    }
}
