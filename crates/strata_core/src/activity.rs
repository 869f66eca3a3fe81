//! Activity state machine
//!
//! Classifies recent user interaction into idle/active/intense:
//! - any action while idle moves to active
//! - reaching the intense threshold inside the rolling 1-second sampling
//!   window moves to intense
//! - the idle delay with no actions moves back to idle
//!
//! The monitor is tick-driven: the host event loop calls [`ActivityMonitor::tick_at`]
//! with the current instant instead of the monitor owning timers, so there is
//! nothing to cancel on teardown and tests can drive time explicitly.
//!
//! The actions-per-minute counter resets every 60 seconds as a periodic
//! bucket, not a sliding window. A burst straddling a bucket boundary can
//! shift when intense detection fires relative to a true sliding window;
//! consumers depend on the bucket semantics, so it stays.

use crate::metrics::{ActivityMetrics, TriggerCondition};
use std::time::{Duration, Instant};

/// Three-value classification of recent interaction intensity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityState {
    #[default]
    Idle,
    Active,
    Intense,
}

/// Tunables for the activity monitor
#[derive(Clone, Copy, Debug)]
pub struct ActivityConfig {
    /// Actions within one sampling window that trigger intense
    pub intense_threshold: u32,
    /// No-action delay before falling back to idle
    pub idle_delay: Duration,
    /// Rolling sampling window for intense detection
    pub sample_window: Duration,
    /// Period of the actions-per-minute bucket reset
    pub decay_interval: Duration,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            intense_threshold: 5,
            idle_delay: Duration::from_millis(3000),
            sample_window: Duration::from_secs(1),
            decay_interval: Duration::from_secs(60),
        }
    }
}

/// Tracks interaction intensity for one session
#[derive(Debug)]
pub struct ActivityMonitor {
    config: ActivityConfig,
    state: ActivityState,
    last_action: Option<Instant>,
    /// Action timestamps inside the rolling sampling window, oldest first
    recent: smallvec::SmallVec<[Instant; 8]>,
    /// Start of the current 60-second APM bucket
    bucket_start: Instant,
    /// Actions recorded in the current APM bucket
    apm: u32,
    has_urgent: bool,
    conditions: smallvec::SmallVec<[TriggerCondition; 4]>,
}

impl ActivityMonitor {
    pub fn new(config: ActivityConfig) -> Self {
        Self::new_at(config, Instant::now())
    }

    /// Create a monitor with an explicit session start instant
    pub fn new_at(config: ActivityConfig, now: Instant) -> Self {
        Self {
            config,
            state: ActivityState::Idle,
            last_action: None,
            recent: smallvec::SmallVec::new(),
            bucket_start: now,
            apm: 0,
            has_urgent: false,
            conditions: smallvec::SmallVec::new(),
        }
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    /// Record a user action at the current instant
    pub fn record_action(&mut self) -> ActivityState {
        self.record_action_at(Instant::now())
    }

    /// Record a user action at an explicit instant
    pub fn record_action_at(&mut self, now: Instant) -> ActivityState {
        self.advance_bucket(now);
        self.apm += 1;
        self.last_action = Some(now);

        // Rolling window: keep only the actions inside the trailing span
        let window = self.config.sample_window;
        self.recent.push(now);
        self.recent.retain(|t| now.duration_since(*t) <= window);

        let next = if self.recent.len() as u32 >= self.config.intense_threshold {
            ActivityState::Intense
        } else if self.state == ActivityState::Idle {
            ActivityState::Active
        } else {
            self.state
        };
        self.transition(next);
        self.state
    }

    /// Advance timers. Returns true when the state changed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Advance timers to an explicit instant
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.advance_bucket(now);

        if self.state != ActivityState::Idle {
            if let Some(last) = self.last_action {
                if now.duration_since(last) >= self.config.idle_delay {
                    self.recent.clear();
                    self.transition(ActivityState::Idle);
                    return true;
                }
            }
        }
        false
    }

    /// Current metrics snapshot
    pub fn metrics(&self) -> ActivityMetrics {
        ActivityMetrics {
            last_interaction: self.last_action,
            actions_per_minute: self.apm,
            has_urgent: self.has_urgent,
            conditions: self.conditions.clone(),
        }
    }

    pub fn set_urgent(&mut self, urgent: bool) {
        self.has_urgent = urgent;
    }

    pub fn push_condition(&mut self, condition: TriggerCondition) {
        if !self.conditions.contains(&condition) {
            self.conditions.push(condition);
        }
    }

    pub fn clear_conditions(&mut self) {
        self.conditions.clear();
    }

    /// Periodic APM bucket reset. The boundary is anchored to session start,
    /// not to the latest action.
    fn advance_bucket(&mut self, now: Instant) {
        while now.duration_since(self.bucket_start) >= self.config.decay_interval {
            self.bucket_start += self.config.decay_interval;
            self.apm = 0;
        }
    }

    fn transition(&mut self, next: ActivityState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "activity transition");
            self.state = next;
        }
    }
}

impl Default for ActivityMonitor {
    fn default() -> Self {
        Self::new(ActivityConfig::default())
    }
}
