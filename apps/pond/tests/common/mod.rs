#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;
use std::time::Duration;

use pond::domain::GameSnapshot;
use pond::{GameSession, NotificationConfig, PacingConfig};
use pond_test_support::{RecordingNotifier, ScriptedEngine};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    pond_test_support::logging::init();
}

pub struct Harness {
    pub engine: Arc<ScriptedEngine>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: GameSession,
}

/// Start a session over a scripted engine seeded with `snapshot`.
pub async fn start(snapshot: GameSnapshot, pacing: PacingConfig) -> Harness {
    start_with(Arc::new(ScriptedEngine::new(snapshot)), pacing).await
}

/// Start a session over an engine the test has already scripted.
pub async fn start_with(engine: Arc<ScriptedEngine>, pacing: PacingConfig) -> Harness {
    let notifier = Arc::new(RecordingNotifier::new());
    let session = GameSession::start(
        engine.clone(),
        notifier.clone(),
        pacing,
        NotificationConfig::default(),
    )
    .await
    .expect("session starts");
    settle().await;
    Harness {
        engine,
        notifier,
        session,
    }
}

/// Let every ready task run without moving the clock.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Move the paused clock forward in small steps, settling after each so
/// chained timers fire in order.
pub async fn pass(total: Duration) {
    let step = Duration::from_millis(10);
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        let next = step.min(total - elapsed);
        tokio::time::advance(next).await;
        settle().await;
        elapsed += next;
    }
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
