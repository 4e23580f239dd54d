//! Deployment reports sent to the deployment server.

pub mod client;
pub mod payload;

pub use client::{DeploymentReporter, ReportOutcome};
pub use payload::DeploymentPayload;
