use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// States of one ingestion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestionState {
    Received,
    PathNormalized,
    FootprintDecoded,
    PathValidated,
    PayloadValidated,
    Dispatched,
    Completed,
    /// Terminal: the request failed a validation rule
    Rejected,
    /// Terminal: an infrastructure or downstream failure
    Failed,
}

impl IngestionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Failed)
    }
}

/// Pipeline steps reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStep {
    NormalizePath,
    DecodeFootprint,
    ValidatePath,
    ValidatePayload,
    ValidateSources,
    Dispatch,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NormalizePath => "normalize_path",
            Self::DecodeFootprint => "decode_footprint",
            Self::ValidatePath => "validate_path",
            Self::ValidatePayload => "validate_payload",
            Self::ValidateSources => "validate_sources",
            Self::Dispatch => "dispatch",
        }
    }

    /// State reached when the step succeeds
    pub fn success_state(&self) -> IngestionState {
        match self {
            Self::NormalizePath => IngestionState::PathNormalized,
            Self::DecodeFootprint => IngestionState::FootprintDecoded,
            Self::ValidatePath | Self::ValidateSources => IngestionState::PathValidated,
            Self::ValidatePayload => IngestionState::PayloadValidated,
            Self::Dispatch => IngestionState::Dispatched,
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hook invoked around every pipeline step.
///
/// `model_id` is `None` on the dry-run path, where no identifier is minted.
pub trait PipelineObserver: Send + Sync {
    fn step_started(&self, _model_id: Option<Uuid>, _step: PipelineStep) {}

    fn step_finished(&self, _model_id: Option<Uuid>, _step: PipelineStep, _state: IngestionState) {
    }

    /// Called once per attempt with the state the pipeline stopped in
    fn pipeline_finished(&self, _model_id: Option<Uuid>, _state: IngestionState) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
