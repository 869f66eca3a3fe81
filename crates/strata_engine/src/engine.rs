//! The presentation engine service
//!
//! [`PresentationEngine`] wires the collectors, the activity monitor, the
//! theme layer registry, and the snapshot bus into one explicitly
//! constructed service object. There is no process-wide singleton: whoever
//! owns the session constructs the engine and passes it down.
//!
//! Input changes only mark the engine dirty; [`PresentationEngine::tick_at`]
//! performs one coalesced recompute and publishes a single snapshot, so
//! subscribers observe the latest state and never an intermediate one.

use crate::resolver::resolve;
use std::time::Instant;
use strata_core::{
    ActivityConfig, ActivityMonitor, Breakpoint, ContentMetrics, ResolutionContext,
    ResolvedDimension, SphereConfig, Subscription, SubscriptionBus, TriggerCondition, UserContext,
};
use strata_theme::{blend, ThemeLayer, ThemeLayerRegistry, ThemeValidationResult, VariableMap};

/// Engine construction parameters
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub activity: ActivityConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What the bus delivers on every recompute
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSnapshot {
    pub dimension: ResolvedDimension,
    pub variables: VariableMap,
    /// Monotone recompute counter
    pub revision: u64,
}

/// Session-scoped presentation engine
pub struct PresentationEngine {
    monitor: ActivityMonitor,
    registry: ThemeLayerRegistry,
    bus: SubscriptionBus<EngineSnapshot>,
    content: ContentMetrics,
    breakpoint: Breakpoint,
    user: UserContext,
    sphere: Option<SphereConfig>,
    depth: u8,
    dirty: bool,
    revision: u64,
    disposed: bool,
}

impl PresentationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::new_at(config, Instant::now())
    }

    /// Construct with an explicit session start instant (tests drive time)
    pub fn new_at(config: EngineConfig, now: Instant) -> Self {
        Self {
            monitor: ActivityMonitor::new_at(config.activity, now),
            registry: ThemeLayerRegistry::new(),
            bus: SubscriptionBus::new(),
            content: ContentMetrics::default(),
            breakpoint: Breakpoint::default(),
            user: UserContext::default(),
            sphere: None,
            depth: 0,
            dirty: true,
            revision: 0,
            disposed: false,
        }
    }

    // ========== Collector inputs ==========

    pub fn set_content_metrics(&mut self, content: ContentMetrics) {
        if self.content != content {
            self.content = content;
            self.dirty = true;
        }
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        if self.breakpoint != breakpoint {
            self.breakpoint = breakpoint;
            self.dirty = true;
        }
    }

    /// Session user context; supplied once, immutable within a resolution
    pub fn set_user_context(&mut self, user: UserContext) {
        self.user = user;
        self.dirty = true;
    }

    pub fn set_sphere_config(&mut self, sphere: Option<SphereConfig>) {
        self.sphere = sphere;
        self.dirty = true;
    }

    pub fn set_depth(&mut self, depth: u8) {
        if self.depth != depth {
            self.depth = depth;
            self.dirty = true;
        }
    }

    // ========== Activity ==========

    pub fn record_action(&mut self) {
        self.record_action_at(Instant::now());
    }

    pub fn record_action_at(&mut self, now: Instant) {
        self.monitor.record_action_at(now);
        self.dirty = true;
    }

    pub fn set_urgent(&mut self, urgent: bool) {
        self.monitor.set_urgent(urgent);
        self.dirty = true;
    }

    pub fn push_condition(&mut self, condition: TriggerCondition) {
        self.monitor.push_condition(condition);
        self.dirty = true;
    }

    // ========== Theme layers ==========

    pub fn add_layer(&mut self, layer: ThemeLayer) -> ThemeValidationResult {
        let result = self.registry.add_layer(layer);
        self.dirty = true;
        result
    }

    pub fn remove_layer(&mut self, id: &str) -> Option<ThemeLayer> {
        let removed = self.registry.remove_layer(id);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn update_layer_weight(&mut self, id: &str, weight: f32) -> bool {
        let updated = self.registry.update_weight(id, weight);
        if updated {
            self.dirty = true;
        }
        updated
    }

    pub fn registry(&self) -> &ThemeLayerRegistry {
        &self.registry
    }

    // ========== Output ==========

    /// Register a snapshot consumer. The returned guard unregisters on drop.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&EngineSnapshot) + Send + Sync + 'static,
    {
        self.bus.subscribe(callback)
    }

    /// Advance timers and, if any input changed, recompute and publish one
    /// snapshot. Returns true when a snapshot was published.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }
        if self.monitor.tick_at(now) {
            self.dirty = true;
        }
        if !self.dirty {
            return false;
        }

        let snapshot = EngineSnapshot {
            dimension: resolve(&self.context()),
            variables: blend(&self.registry.active_layers()),
            revision: self.revision + 1,
        };
        self.revision += 1;
        self.dirty = false;
        self.bus.publish(snapshot);
        true
    }

    /// Resolve against the current inputs without publishing
    pub fn resolve_now(&self) -> ResolvedDimension {
        resolve(&self.context())
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Option<EngineSnapshot> {
        self.bus.latest()
    }

    /// Tear the session down: drops all layers, all subscribers, and the
    /// retained snapshot. Idempotent; a disposed engine ignores ticks.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::debug!("presentation engine disposed");
        self.registry.clear();
        self.bus.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn context(&self) -> ResolutionContext {
        ResolutionContext {
            content: self.content,
            activity: self.monitor.metrics(),
            activity_state: self.monitor.state(),
            user: self.user.clone(),
            breakpoint: self.breakpoint,
            sphere: self.sphere.clone(),
            depth: self.depth,
        }
    }
}

impl Default for PresentationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
