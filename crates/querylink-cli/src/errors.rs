//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use querylink_client::EmptyQuery;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Failures that stop the CLI before or after the node exchange.
///
/// Failures of the exchange itself are not errors at this level; they are
/// presented as unsuccessful results.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    EmptyQuery(#[from] EmptyQuery),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to serialise result: {0}")]
    SerialiseOutput(serde_json::Error),
    #[error("failed to write result: {0}")]
    WriteOutput(io::Error),
}
