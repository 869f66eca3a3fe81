//! Strata Core
//!
//! This crate provides the foundational primitives for the Strata adaptive
//! presentation engine:
//!
//! - **Context Signals**: content volume, user activity, session context
//! - **Activity State Machine**: idle/active/intense classification with
//!   tick-driven timers
//! - **Snapshot Bus**: latest-only delivery of resolved state to consumers
//!
//! # Example
//!
//! ```rust
//! use strata_core::activity::{ActivityConfig, ActivityMonitor};
//! use strata_core::metrics::ContentMetrics;
//! use std::time::{Duration, Instant};
//!
//! let origin = Instant::now();
//! let mut monitor = ActivityMonitor::new_at(ActivityConfig::default(), origin);
//!
//! // A burst of actions inside one sampling window reaches intense
//! for i in 0..5 {
//!     monitor.record_action_at(origin + Duration::from_millis(i * 100));
//! }
//! assert_eq!(monitor.state(), strata_core::activity::ActivityState::Intense);
//!
//! // Content volume buckets feed the same resolution pass
//! let volume = ContentMetrics::new(11, 600, true).volume();
//! assert_eq!(volume, strata_core::metrics::ContentVolume::High);
//! ```

pub mod activity;
pub mod bus;
pub mod color;
pub mod context;
pub mod dimension;
pub mod easing;
pub mod metrics;
pub mod sphere;

pub use activity::{ActivityConfig, ActivityMonitor, ActivityState};
pub use bus::{SubscriberId, Subscription, SubscriptionBus};
pub use color::Color;
pub use context::{
    Breakpoint, ResolutionContext, UserContext, UserPermission, UserPreferences, UserRole,
};
pub use dimension::{
    AnimationKind, ChildFlow, ColorStyle, GlowStyle, Gradient, GrowthAxis, OverflowMode,
    ResolvedDimension, ShadowLevel, ShapeStyle, SizeClass, TransitionSpec, UiMode,
};
pub use easing::Easing;
pub use metrics::{ActivityMetrics, ContentMetrics, ContentVolume, TriggerCondition};
pub use sphere::{MotionProfile, SphereConfig, SphereConfigError, SphereVisibility};
