//! Error types for tiered acquisition

use thiserror::Error;

use crate::model::{SnapshotError, SystemsMapError};
use crate::service::extraction::ExtractionError;
use crate::service::llm::GenerationError;
use crate::service::remote::RemoteError;

/// Why a tier, or the whole acquisition, failed
///
/// Only `AllTiersExhausted` ever leaves the acquisition policy; the other
/// variants are logged by the policy and trigger the next tier.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AcquisitionError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("malformed data: {0}")]
    MalformedExtraction(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("all acquisition tiers failed")]
    AllTiersExhausted,
}

impl From<RemoteError> for AcquisitionError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::HttpError(e) => AcquisitionError::SourceUnavailable(e.to_string()),
            e @ RemoteError::Status { .. } => AcquisitionError::SourceUnavailable(e.to_string()),
            RemoteError::ParseError(msg) => AcquisitionError::MalformedExtraction(msg),
        }
    }
}

impl From<GenerationError> for AcquisitionError {
    fn from(err: GenerationError) -> Self {
        AcquisitionError::SourceUnavailable(err.to_string())
    }
}

impl From<ExtractionError> for AcquisitionError {
    fn from(err: ExtractionError) -> Self {
        AcquisitionError::MalformedExtraction(err.to_string())
    }
}

impl From<SnapshotError> for AcquisitionError {
    fn from(err: SnapshotError) -> Self {
        AcquisitionError::InvariantViolation(err.to_string())
    }
}

impl From<SystemsMapError> for AcquisitionError {
    fn from(err: SystemsMapError) -> Self {
        AcquisitionError::InvariantViolation(err.to_string())
    }
}
