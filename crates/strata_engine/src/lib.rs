//! Strata Presentation Engine
//!
//! Ties the core signals and the theme system together:
//!
//! - **Resolver**: one pure pass from a [`strata_core::ResolutionContext`] to
//!   a [`strata_core::ResolvedDimension`]
//! - **Sphere store**: cached, deduplicated async loading of per-sphere
//!   presentation configs
//! - **Engine**: the session-scoped service that collects inputs, coalesces
//!   changes, and publishes snapshots over the bus
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use strata_core::{Breakpoint, ContentMetrics};
//! use strata_engine::{EngineConfig, PresentationEngine};
//!
//! let origin = Instant::now();
//! let mut engine = PresentationEngine::new_at(EngineConfig::new(), origin);
//! engine.set_content_metrics(ContentMetrics::new(11, 600, true));
//! engine.set_breakpoint(Breakpoint::Wide);
//!
//! let _sub = engine.subscribe(|snapshot| {
//!     let _ = &snapshot.dimension;
//! });
//! assert!(engine.tick_at(origin));
//! ```

pub mod engine;
pub mod resolver;
pub mod sphere_store;

pub use engine::{EngineConfig, EngineSnapshot, PresentationEngine};
pub use resolver::resolve;
pub use sphere_store::{SphereConfigSource, SphereConfigStore};
