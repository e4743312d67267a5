use ingestion_core::ports::{IngestionState, PipelineObserver, PipelineStep};
use uuid::Uuid;

/// Observer that reports pipeline progress as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn step_started(&self, model_id: Option<Uuid>, step: PipelineStep) {
        tracing::debug!(model_id = ?model_id, step = %step, "Pipeline step started");
    }

    fn step_finished(&self, model_id: Option<Uuid>, step: PipelineStep, state: IngestionState) {
        tracing::debug!(model_id = ?model_id, step = %step, state = ?state, "Pipeline step finished");
    }

    fn pipeline_finished(&self, model_id: Option<Uuid>, state: IngestionState) {
        tracing::info!(model_id = ?model_id, state = ?state, "Pipeline finished");
    }
}
