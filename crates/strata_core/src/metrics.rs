//! Context collector signals
//!
//! Raw inputs to dimension resolution:
//! - [`ContentMetrics`]: how much content an element is presenting
//! - [`ActivityMetrics`]: how intensely the user is interacting
//!
//! Content metrics are ephemeral and recomputed by the consumer each render
//! cycle. Activity metrics are produced only by the activity monitor.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Instant;

/// Content volume bucket derived from [`ContentMetrics`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentVolume {
    Low,
    Medium,
    High,
}

/// How much content an element currently holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContentMetrics {
    pub item_count: u32,
    pub text_length: u32,
    pub has_media: bool,
}

impl ContentMetrics {
    pub const fn new(item_count: u32, text_length: u32, has_media: bool) -> Self {
        Self {
            item_count,
            text_length,
            has_media,
        }
    }

    /// Fixed-weight volume heuristic.
    ///
    /// `item_count`: >10 adds 2, >3 adds 1. `text_length`: >500 adds 2,
    /// >100 adds 1. Media adds 1. Maximum score is 5.
    pub fn volume_score(&self) -> u32 {
        let mut score = 0;
        if self.item_count > 10 {
            score += 2;
        } else if self.item_count > 3 {
            score += 1;
        }
        if self.text_length > 500 {
            score += 2;
        } else if self.text_length > 100 {
            score += 1;
        }
        if self.has_media {
            score += 1;
        }
        score
    }

    /// Bucket the volume score: >=4 high, >=2 medium, else low
    pub fn volume(&self) -> ContentVolume {
        match self.volume_score() {
            s if s >= 4 => ContentVolume::High,
            s if s >= 2 => ContentVolume::Medium,
            _ => ContentVolume::Low,
        }
    }
}

/// Conditions detected on the activity stream that advisory theming reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    StressDetected,
    DecisionPoint,
    DeepFocus,
    Collaboration,
    Celebration,
}

/// Recent-interaction snapshot produced by the activity monitor.
///
/// Never written directly by consumer code; read it via
/// `ActivityMonitor::metrics()`.
#[derive(Clone, Debug, Default)]
pub struct ActivityMetrics {
    /// When the last action was recorded, if any
    pub last_interaction: Option<Instant>,
    /// Actions recorded in the current 60-second bucket (periodic reset)
    pub actions_per_minute: u32,
    /// Whether an urgent condition is active
    pub has_urgent: bool,
    /// Detected trigger conditions, most recent last
    pub conditions: SmallVec<[TriggerCondition; 4]>,
}
