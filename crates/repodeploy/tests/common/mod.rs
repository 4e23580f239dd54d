//! Shared test utilities for repodeploy integration tests.
//!
//! This module provides:
//! - `MockServer`, a one-shot HTTP endpoint that records the request it gets
//! - `RecordingRunner`, a `CommandRunner` that records commands instead of running them

#![allow(dead_code)]

pub mod mock_server;
pub mod recording_runner;

pub use mock_server::{unreachable_url, CapturedRequest, MockServer};
pub use recording_runner::RecordingRunner;
