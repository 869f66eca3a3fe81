//! End-to-end engine behavior: collectors in, snapshots out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use strata_core::{
    ActivityState, Breakpoint, ContentMetrics, SphereConfig, UiMode, UserContext, UserPermission,
    UserRole,
};
use strata_engine::{EngineConfig, EngineSnapshot, PresentationEngine};
use strata_theme::{ThemeLayer, ThemeScope};

fn engine_at(origin: Instant) -> PresentationEngine {
    PresentationEngine::new_at(EngineConfig::new(), origin)
}

#[test]
fn dense_content_active_user_full_pipeline() {
    let origin = Instant::now();
    let mut engine = engine_at(origin);

    engine.set_content_metrics(ContentMetrics::new(11, 600, true));
    engine.set_breakpoint(Breakpoint::Wide);
    engine.set_user_context(UserContext::new("u1", UserRole::Member));
    engine.record_action_at(origin);

    engine.add_layer(
        ThemeLayer::new("base", ThemeScope::Global)
            .with_weight(0.1)
            .with_variable("background", "#111"),
    );
    engine.add_layer(
        ThemeLayer::new("standup", ThemeScope::Meeting)
            .with_weight(0.8)
            .with_variable("background", "#222")
            .with_variable("layout", "grid"),
    );

    let delivered: Arc<Mutex<Option<EngineSnapshot>>> = Arc::new(Mutex::new(None));
    let delivered_clone = delivered.clone();
    let _sub = engine.subscribe(move |snapshot| {
        *delivered_clone.lock().unwrap() = Some(snapshot.clone());
    });

    assert!(engine.tick_at(origin));
    let snapshot = delivered.lock().unwrap().clone().unwrap();

    // High volume on a wide viewport stays at full presentation
    assert_eq!(snapshot.dimension.ui_mode, UiMode::Full);
    assert_eq!(snapshot.dimension.activity_state, ActivityState::Active);
    assert!(snapshot.dimension.visible);

    // Meeting layer wins the background, forbidden layout key is stripped
    assert_eq!(
        snapshot.variables.get("background").map(String::as_str),
        Some("#222")
    );
    assert!(!snapshot.variables.contains_key("layout"));
}

#[test]
fn one_publish_per_tick_regardless_of_input_count() {
    let origin = Instant::now();
    let mut engine = engine_at(origin);

    let publishes = Arc::new(AtomicUsize::new(0));
    let publishes_clone = publishes.clone();
    let _sub = engine.subscribe(move |_| {
        publishes_clone.fetch_add(1, Ordering::SeqCst);
    });

    for i in 0..20 {
        engine.record_action_at(origin + Duration::from_millis(i * 10));
        engine.set_depth((i % 3) as u8);
    }
    engine.tick_at(origin + Duration::from_millis(200));
    assert_eq!(publishes.load(Ordering::SeqCst), 1);
}

#[test]
fn late_subscriber_replays_latest_snapshot() {
    let origin = Instant::now();
    let mut engine = engine_at(origin);
    engine.set_breakpoint(Breakpoint::Compact);
    engine.tick_at(origin);

    let replayed = Arc::new(AtomicUsize::new(0));
    let replayed_clone = replayed.clone();
    let _sub = engine.subscribe(move |_| {
        replayed_clone.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(replayed.load(Ordering::SeqCst), 1);
}

#[test]
fn dropped_subscription_stops_delivery() {
    let origin = Instant::now();
    let mut engine = engine_at(origin);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let sub = engine.subscribe(move |_| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    engine.tick_at(origin);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    drop(sub);
    engine.set_depth(5);
    engine.tick_at(origin + Duration::from_millis(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn insufficient_role_hides_without_resolving_detail() {
    let origin = Instant::now();
    let mut engine = engine_at(origin);

    let mut sphere = SphereConfig::new("boardroom");
    sphere.visibility.min_role = UserRole::Admin;
    engine.set_sphere_config(Some(sphere));
    engine.set_user_context(
        UserContext::new("guest", UserRole::Guest).with_permissions(vec![UserPermission::Render]),
    );
    engine.set_content_metrics(ContentMetrics::new(11, 600, true));

    let dimension = engine.resolve_now();
    assert!(!dimension.visible);
    assert!(!dimension.interactable);
}

#[test]
fn intense_burst_then_idle_decay() {
    let origin = Instant::now();
    let mut engine = engine_at(origin);

    for i in 0..5 {
        engine.record_action_at(origin + Duration::from_millis(i * 100));
    }
    engine.tick_at(origin + Duration::from_millis(400));
    assert_eq!(
        engine.latest().unwrap().dimension.activity_state,
        ActivityState::Intense
    );

    // Past the idle delay the tick itself publishes the decayed state
    assert!(engine.tick_at(origin + Duration::from_millis(4000)));
    assert_eq!(
        engine.latest().unwrap().dimension.activity_state,
        ActivityState::Idle
    );
}

#[test]
fn dispose_releases_everything() {
    let origin = Instant::now();
    let mut engine = engine_at(origin);
    engine.add_layer(ThemeLayer::new("base", ThemeScope::Global).with_variable("background", "#111"));
    let _sub = engine.subscribe(|_| {});
    engine.tick_at(origin);

    engine.dispose();
    engine.dispose();

    assert!(engine.is_disposed());
    assert!(engine.registry().is_empty());
    assert!(engine.latest().is_none());
    assert!(!engine.tick_at(origin + Duration::from_secs(1)));
}
