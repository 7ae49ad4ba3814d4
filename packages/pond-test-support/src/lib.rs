//! Test support for the pond turn layer
//!
//! A scripted in-memory engine that records every call, a notifier that
//! keeps every notice, snapshot fixtures and unified test logging.

pub mod fixtures;
pub mod logging;
pub mod recording_notifier;
pub mod scripted_engine;

pub use recording_notifier::RecordingNotifier;
pub use scripted_engine::{EngineCall, RecordedCall, ScriptedEngine};
