//! Dimension resolution
//!
//! [`resolve`] maps a [`ResolutionContext`] to a [`ResolvedDimension`]. It is
//! a pure, synchronous, total function: it never panics, and a missing or
//! partial sphere config degrades to built-in defaults instead of failing.
//!
//! The style tables are exhaustive matches over
//! `(ActivityState, ContentVolume)` so a new state or bucket cannot be
//! forgotten silently.

use strata_core::{
    ActivityState, AnimationKind, Breakpoint, ChildFlow, Color, ColorStyle, ContentVolume, Easing,
    GlowStyle, Gradient, GrowthAxis, MotionProfile, OverflowMode, ResolutionContext,
    ResolvedDimension, ShadowLevel, ShapeStyle, SizeClass, TransitionSpec, UiMode,
};

/// Opacity never sinks below this, regardless of idleness
pub const MIN_OPACITY: f32 = 0.4;

/// Z-order boost applied while an urgent condition is active
pub const URGENT_Z_BOOST: i32 = 100;

/// Compute the visual/behavioral state for one element.
///
/// The only fatal outcome is the permission/role gate: a sphere whose
/// visibility block denies this user yields [`ResolvedDimension::hidden`]
/// and nothing else is computed.
pub fn resolve(ctx: &ResolutionContext) -> ResolvedDimension {
    if let Some(sphere) = &ctx.sphere {
        if !sphere.allows(ctx.user.role, &ctx.user.permissions) {
            tracing::debug!(
                sphere = %sphere.sphere_id,
                user = %ctx.user.user_id,
                "rendering denied by sphere visibility gate"
            );
            return ResolvedDimension::hidden();
        }
    }

    let used_fallback = ctx.sphere.is_none();
    if used_fallback {
        tracing::debug!("no sphere config loaded, resolving with defaults");
    }

    let volume = ctx.content.volume();
    let state = ctx.activity_state;
    let urgent = ctx.activity.has_urgent;

    let accent = ctx
        .sphere
        .as_ref()
        .map(|s| s.accent)
        .unwrap_or(Color::from_hex(0x4A90D9));
    let motion = effective_motion(ctx);

    let ui_mode = resolve_ui_mode(volume, ctx.breakpoint, ctx)
        .demoted_by(ctx.depth);

    ResolvedDimension {
        dimension: size_class(volume, ctx.breakpoint),
        shape: ShapeStyle {
            border_radius: border_radius(ui_mode),
            aspect_ratio: 1.0,
            shadow: shadow_level(state, volume),
        },
        color: ColorStyle {
            gradient: Gradient {
                from: Color::lerp(&accent, &Color::BLACK, 0.25),
                to: Color::lerp(&accent, &Color::BLACK, 0.65),
                angle_deg: 180.0,
            },
        },
        glow: glow(state, urgent, accent),
        scale: scale(state, volume),
        opacity: opacity(state).max(MIN_OPACITY),
        animation: animation(state, volume, motion),
        transition: transition(state, motion),
        growth_axis: GrowthAxis {
            child_flow: if ui_mode >= UiMode::Expanded {
                ChildFlow::Row
            } else {
                ChildFlow::Column
            },
            overflow: overflow(volume),
        },
        ui_mode,
        z_index: z_index(ctx.depth, urgent),
        visible: true,
        interactable: ui_mode > UiMode::Minimal,
        activity_state: state,
        used_fallback,
    }
}

/// Motion budget after accessibility prefs and sphere profile
fn effective_motion(ctx: &ResolutionContext) -> MotionProfile {
    if ctx.user.preferences.reduced_motion {
        return MotionProfile::Still;
    }
    ctx.sphere
        .as_ref()
        .map(|s| s.motion_profile)
        .unwrap_or(MotionProfile::Full)
}

fn resolve_ui_mode(volume: ContentVolume, breakpoint: Breakpoint, ctx: &ResolutionContext) -> UiMode {
    let base = match volume {
        ContentVolume::Low => UiMode::Standard,
        ContentVolume::Medium => UiMode::Expanded,
        ContentVolume::High => UiMode::Full,
    };
    let fitted = match breakpoint {
        Breakpoint::Compact => base.demoted_by(2),
        Breakpoint::Medium => base.demote(),
        Breakpoint::Expanded | Breakpoint::Wide => base,
    };
    // Sphere density bias demotes; a positive bias never escalates
    let bias = ctx.sphere.as_ref().map(|s| s.density_bias).unwrap_or(0);
    if bias < 0 {
        fitted.demoted_by(bias.unsigned_abs())
    } else {
        fitted
    }
}

fn size_class(volume: ContentVolume, breakpoint: Breakpoint) -> SizeClass {
    match (volume, breakpoint) {
        (ContentVolume::Low, Breakpoint::Compact) => SizeClass::Xs,
        (ContentVolume::Low, _) => SizeClass::Sm,
        (ContentVolume::Medium, Breakpoint::Compact) => SizeClass::Sm,
        (ContentVolume::Medium, _) => SizeClass::Md,
        (ContentVolume::High, Breakpoint::Compact) => SizeClass::Md,
        (ContentVolume::High, Breakpoint::Wide) => SizeClass::Xl,
        (ContentVolume::High, _) => SizeClass::Lg,
    }
}

fn scale(state: ActivityState, volume: ContentVolume) -> f32 {
    match (state, volume) {
        (ActivityState::Idle, ContentVolume::Low) => 0.95,
        (ActivityState::Idle, ContentVolume::Medium) => 0.97,
        (ActivityState::Idle, ContentVolume::High) => 1.0,
        (ActivityState::Active, ContentVolume::Low) => 1.0,
        (ActivityState::Active, ContentVolume::Medium) => 1.0,
        (ActivityState::Active, ContentVolume::High) => 1.02,
        (ActivityState::Intense, ContentVolume::Low) => 1.03,
        (ActivityState::Intense, ContentVolume::Medium) => 1.05,
        (ActivityState::Intense, ContentVolume::High) => 1.08,
    }
}

fn opacity(state: ActivityState) -> f32 {
    match state {
        ActivityState::Idle => 0.75,
        ActivityState::Active => 1.0,
        ActivityState::Intense => 1.0,
    }
}

fn animation(state: ActivityState, volume: ContentVolume, motion: MotionProfile) -> AnimationKind {
    if motion != MotionProfile::Full {
        return AnimationKind::None;
    }
    match (state, volume) {
        (ActivityState::Idle, _) => AnimationKind::None,
        (ActivityState::Active, ContentVolume::High) => AnimationKind::Shimmer,
        (ActivityState::Active, _) => AnimationKind::Breathe,
        (ActivityState::Intense, _) => AnimationKind::Pulse,
    }
}

fn shadow_level(state: ActivityState, volume: ContentVolume) -> ShadowLevel {
    match (state, volume) {
        (ActivityState::Idle, ContentVolume::Low) => ShadowLevel::None,
        (ActivityState::Idle, _) => ShadowLevel::Soft,
        (ActivityState::Active, ContentVolume::High) => ShadowLevel::Medium,
        (ActivityState::Active, _) => ShadowLevel::Soft,
        (ActivityState::Intense, ContentVolume::Low) => ShadowLevel::Medium,
        (ActivityState::Intense, _) => ShadowLevel::Strong,
    }
}

fn glow(state: ActivityState, urgent: bool, accent: Color) -> GlowStyle {
    match (state, urgent) {
        (ActivityState::Intense, _) => GlowStyle {
            enabled: true,
            color: accent,
            intensity: 0.8,
            blur: 24.0,
        },
        (_, true) => GlowStyle {
            enabled: true,
            color: accent,
            intensity: 0.6,
            blur: 16.0,
        },
        _ => GlowStyle::default(),
    }
}

fn transition(state: ActivityState, motion: MotionProfile) -> TransitionSpec {
    if motion == MotionProfile::Still {
        return TransitionSpec::none();
    }
    let base = match state {
        ActivityState::Idle => TransitionSpec {
            property: "all",
            duration_ms: 320,
            easing: Easing::EaseInOut,
            delay_ms: 0,
        },
        ActivityState::Active => TransitionSpec {
            property: "all",
            duration_ms: 200,
            easing: Easing::EaseOut,
            delay_ms: 0,
        },
        ActivityState::Intense => TransitionSpec {
            property: "all",
            duration_ms: 120,
            easing: Easing::EaseOut,
            delay_ms: 0,
        },
    };
    if motion == MotionProfile::Reduced {
        TransitionSpec {
            duration_ms: base.duration_ms / 2,
            ..base
        }
    } else {
        base
    }
}

fn overflow(volume: ContentVolume) -> OverflowMode {
    match volume {
        ContentVolume::Low => OverflowMode::Expand,
        ContentVolume::Medium => OverflowMode::Scroll,
        ContentVolume::High => OverflowMode::Scroll,
    }
}

fn z_index(depth: u8, urgent: bool) -> i32 {
    let base = i32::from(depth) * 10;
    if urgent {
        base + URGENT_Z_BOOST
    } else {
        base
    }
}

fn border_radius(ui_mode: UiMode) -> f32 {
    match ui_mode {
        UiMode::Minimal => 4.0,
        UiMode::Compact => 6.0,
        UiMode::Standard => 8.0,
        UiMode::Expanded => 12.0,
        UiMode::Full => 16.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{
        ContentMetrics, ResolutionContext, SphereConfig, UserContext, UserPermission,
        UserPreferences, UserRole,
    };

    fn ctx() -> ResolutionContext {
        ResolutionContext {
            sphere: Some(SphereConfig::new("personal")),
            ..ResolutionContext::default()
        }
    }

    #[test]
    fn test_determinism() {
        let context = ctx();
        assert_eq!(resolve(&context), resolve(&context));
    }

    #[test]
    fn test_never_hidden_without_explicit_denial() {
        // Worst case: no sphere, no signals. The engine still renders with
        // defaults and full visibility.
        let context = ResolutionContext::default();
        let dim = resolve(&context);
        assert!(dim.visible);
        assert!(dim.used_fallback);
        assert!(dim.opacity >= MIN_OPACITY);
    }

    #[test]
    fn test_visibility_gate_short_circuits() {
        let mut context = ctx();
        context.sphere.as_mut().unwrap().visibility.min_role = UserRole::Admin;
        context.user = UserContext::new("guest", UserRole::Guest);

        let dim = resolve(&context);
        assert!(!dim.visible);
        assert_eq!(dim, ResolvedDimension::hidden());
    }

    #[test]
    fn test_default_visibility_admits_guests() {
        // A sphere without an explicit visibility block denies nobody
        let mut context = ctx();
        context.user = UserContext::new("visitor", UserRole::Guest);
        assert!(resolve(&context).visible);
    }

    #[test]
    fn test_permission_gate() {
        let mut context = ctx();
        context.sphere.as_mut().unwrap().visibility.required_permission =
            Some(UserPermission::ViewSphere);

        assert!(!resolve(&context).visible);
        context.user.permissions.push(UserPermission::ViewSphere);
        assert!(resolve(&context).visible);
    }

    #[test]
    fn test_depth_demotes_ui_mode() {
        let mut context = ctx();
        context.content = ContentMetrics::new(11, 600, true); // high volume -> Full
        assert_eq!(resolve(&context).ui_mode, UiMode::Full);

        context.depth = 2;
        assert_eq!(resolve(&context).ui_mode, UiMode::Standard);

        context.depth = 20;
        assert_eq!(resolve(&context).ui_mode, UiMode::Minimal);
    }

    #[test]
    fn test_idle_dims_but_respects_floor() {
        let mut context = ctx();
        context.activity_state = ActivityState::Idle;
        let dim = resolve(&context);
        assert!(dim.opacity < 1.0);
        assert!(dim.opacity >= MIN_OPACITY);
        assert_eq!(dim.animation, AnimationKind::None);
    }

    #[test]
    fn test_intense_boosts_glow_and_speed() {
        let mut context = ctx();
        context.activity_state = ActivityState::Intense;
        let intense = resolve(&context);

        context.activity_state = ActivityState::Active;
        let active = resolve(&context);

        assert!(intense.glow.enabled);
        assert!(!active.glow.enabled);
        assert!(intense.transition.duration_ms < active.transition.duration_ms);
        assert!(intense.scale > active.scale);
        assert_eq!(intense.animation, AnimationKind::Pulse);
    }

    #[test]
    fn test_z_index_monotone_in_depth_and_urgency() {
        let mut context = ctx();
        context.depth = 1;
        let shallow = resolve(&context).z_index;
        context.depth = 3;
        let deep = resolve(&context).z_index;
        assert!(deep > shallow);

        context.activity.has_urgent = true;
        assert_eq!(resolve(&context).z_index, deep + URGENT_Z_BOOST);
    }

    #[test]
    fn test_reduced_motion_zeroes_animation() {
        let mut context = ctx();
        context.activity_state = ActivityState::Intense;
        context.user.preferences = UserPreferences {
            reduced_motion: true,
            high_contrast: false,
        };
        let dim = resolve(&context);
        assert_eq!(dim.animation, AnimationKind::None);
        assert_eq!(dim.transition, TransitionSpec::none());
    }

    #[test]
    fn test_compact_breakpoint_demotes() {
        let mut context = ctx();
        context.content = ContentMetrics::new(11, 600, true);
        context.breakpoint = Breakpoint::Compact;
        assert_eq!(resolve(&context).ui_mode, UiMode::Standard);
        assert_eq!(resolve(&context).dimension, SizeClass::Md);
    }

    #[test]
    fn test_density_bias_demotes_only() {
        let mut context = ctx();
        context.content = ContentMetrics::new(11, 600, true);
        context.sphere.as_mut().unwrap().density_bias = -1;
        assert_eq!(resolve(&context).ui_mode, UiMode::Expanded);

        // A positive bias never escalates past the fitted mode
        context.sphere.as_mut().unwrap().density_bias = 3;
        assert_eq!(resolve(&context).ui_mode, UiMode::Full);
    }

    #[test]
    fn test_minimal_mode_is_not_interactable() {
        let mut context = ctx();
        context.depth = 10;
        let dim = resolve(&context);
        assert_eq!(dim.ui_mode, UiMode::Minimal);
        assert!(!dim.interactable);
        assert!(dim.visible);
    }
}
