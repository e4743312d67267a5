use std::future::Future;
use std::sync::Arc;

use ingestion_core::error::{IngestError, Result};
use ingestion_core::models::{
    IngestionRequest, JobHandle, NormalizedRequest, SourcesRequest, ValidationOutcome, WorkOrder,
};
use ingestion_core::ports::{IngestionState, PipelineObserver, PipelineStep, StoreTrigger, Validator};
use ingestion_core::PathNormalizer;
use ingestion_geo::decode_footprint_value;
use uuid::Uuid;

use crate::observer::TracingObserver;

/// Ingestion pipeline controller
///
/// Runs path normalization, footprint decoding and validation in a fixed
/// order, then submits a work order to the store-trigger service. Every
/// failure leaves as an [`IngestError`].
pub struct ModelManager {
    normalizer: PathNormalizer,
    validator: Arc<dyn Validator>,
    trigger: Arc<dyn StoreTrigger>,
    observer: Arc<dyn PipelineObserver>,
}

impl ModelManager {
    /// Create a new manager reporting progress through [`TracingObserver`]
    pub fn new(
        normalizer: PathNormalizer,
        validator: Arc<dyn Validator>,
        trigger: Arc<dyn StoreTrigger>,
    ) -> Self {
        Self {
            normalizer,
            validator,
            trigger,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the pipeline observer
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Validate and dispatch a new model. Each call is a new attempt with a new id.
    pub async fn create_model(&self, request: IngestionRequest) -> Result<JobHandle> {
        let model_id = Uuid::new_v4();
        tracing::info!(
            model_id = %model_id,
            model_name = %request.metadata.product_name,
            model_path = %request.model_path,
            "Started ingestion of new model"
        );

        let result = self.run_ingestion(model_id, request).await;
        let state = match &result {
            Ok(_) => IngestionState::Completed,
            Err(IngestError::ValidationRejected(_)) => IngestionState::Rejected,
            Err(_) => IngestionState::Failed,
        };
        self.observer.pipeline_finished(Some(model_id), state);
        result
    }

    async fn run_ingestion(&self, model_id: Uuid, request: IngestionRequest) -> Result<JobHandle> {
        let id = Some(model_id);
        let IngestionRequest { model_path: original_model_path, tileset_filename, metadata } =
            request;

        let model_path = self.adjusted_path(id, &original_model_path);

        let footprint = self
            .step(id, PipelineStep::DecodeFootprint, async {
                decode_footprint_value(&metadata.footprint)
            })
            .await?;

        let request = NormalizedRequest::new(
            original_model_path,
            model_path,
            tileset_filename,
            metadata.with_footprint(footprint),
        );

        tracing::debug!(model_id = %model_id, "Starting to validate the payload");
        let path_check =
            self.validate_model_path(&request.original_model_path, &request.model_path);
        self.check(id, PipelineStep::ValidatePath, path_check).await.and_then(into_rejection)?;
        self.check(id, PipelineStep::ValidatePayload, self.validator.validate_full(&request))
            .await
            .and_then(into_rejection)?;
        tracing::info!(
            model_id = %model_id,
            model_name = %request.metadata.product_name,
            "Model validated successfully"
        );

        let path_to_tileset = self.normalizer.strip_storage_prefix(&request.model_path);
        let order = WorkOrder::new(model_id, request, path_to_tileset);

        let handle = self
            .step(id, PipelineStep::Dispatch, async {
                self.trigger.submit(&order).await.map_err(|e| {
                    tracing::error!(
                        model_id = %model_id,
                        error = %e,
                        cause = e.cause().unwrap_or_default(),
                        "Error in creating a flow"
                    );
                    match e {
                        IngestError::TriggerUnavailable { .. } => e,
                        other => IngestError::trigger(other.to_string()),
                    }
                })
            })
            .await?;

        tracing::info!(model_id = %model_id, job_id = %handle.job_id, "Work order dispatched");
        Ok(handle)
    }

    /// Dry run: normalize the path and check the sources without minting an id.
    pub async fn validate_model_sources(&self, request: SourcesRequest) -> Result<ValidationOutcome> {
        tracing::info!(
            model_path = %request.model_path,
            tileset_filename = %request.tileset_filename,
            "Sources validation started"
        );

        let model_path = self.adjusted_path(None, &request.model_path);

        let result = self.check_sources(&request, &model_path).await;
        let state = match &result {
            Ok(outcome) if outcome.is_valid() => IngestionState::PathValidated,
            Ok(_) => IngestionState::Rejected,
            Err(_) => IngestionState::Failed,
        };
        self.observer.pipeline_finished(None, state);

        let outcome = result?;
        tracing::info!(
            model_path = %model_path,
            is_valid = outcome.is_valid(),
            reason = outcome.reason().unwrap_or_default(),
            "Sources validation ended"
        );
        Ok(outcome)
    }

    async fn check_sources(
        &self,
        request: &SourcesRequest,
        model_path: &str,
    ) -> Result<ValidationOutcome> {
        let path_check = self.validate_model_path(&request.model_path, model_path);
        let outcome = self.check(None, PipelineStep::ValidatePath, path_check).await?;
        if !outcome.is_valid() {
            return Ok(outcome);
        }
        self.check(
            None,
            PipelineStep::ValidateSources,
            self.validator.validate_sources(model_path, &request.tileset_filename),
        )
        .await
    }

    /// Rejects caller paths outside the source folder, then defers to the validator
    async fn validate_model_path(
        &self,
        original_path: &str,
        model_path: &str,
    ) -> Result<ValidationOutcome> {
        if !self.normalizer.is_under_source_base(original_path) {
            return Ok(ValidationOutcome::invalid(format!(
                "Unknown model path! The model isn't in the agreed folder!, modelPath: {}, basePath: {}",
                original_path,
                self.normalizer.source_base()
            )));
        }
        self.validator.validate_path(model_path).await
    }

    fn adjusted_path(&self, model_id: Option<Uuid>, model_path: &str) -> String {
        self.observer.step_started(model_id, PipelineStep::NormalizePath);
        let adjusted = self.normalizer.adjust(model_path);
        tracing::debug!(
            product_source = %model_path,
            adjusted_path = %adjusted,
            "Changed model path from '{}' to '{}'",
            model_path,
            adjusted
        );
        self.observer.step_finished(
            model_id,
            PipelineStep::NormalizePath,
            PipelineStep::NormalizePath.success_state(),
        );
        adjusted
    }

    /// Run a step that either succeeds or fails
    async fn step<T>(
        &self,
        model_id: Option<Uuid>,
        step: PipelineStep,
        work: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        self.observer.step_started(model_id, step);
        let result = work.await;
        let state = match &result {
            Ok(_) => step.success_state(),
            Err(e) => {
                if e.is_client_error() {
                    tracing::info!(model_id = ?model_id, step = %step, error = %e, "Request rejected");
                } else {
                    tracing::error!(model_id = ?model_id, step = %step, error = %e, "Step failed");
                }
                IngestionState::Failed
            }
        };
        self.observer.step_finished(model_id, step, state);
        result
    }

    /// Run a validation step; an invalid outcome ends in `Rejected`
    async fn check(
        &self,
        model_id: Option<Uuid>,
        step: PipelineStep,
        validation: impl Future<Output = Result<ValidationOutcome>>,
    ) -> Result<ValidationOutcome> {
        self.observer.step_started(model_id, step);
        let result = validation.await;
        let state = match &result {
            Ok(ValidationOutcome::Valid) => step.success_state(),
            Ok(ValidationOutcome::Invalid { reason }) => {
                tracing::info!(model_id = ?model_id, step = %step, reason = %reason, "Validation failed");
                IngestionState::Rejected
            }
            Err(e) => {
                tracing::error!(
                    model_id = ?model_id,
                    step = %step,
                    error = %e,
                    cause = e.cause().unwrap_or_default(),
                    "Validation could not be completed"
                );
                IngestionState::Failed
            }
        };
        self.observer.step_finished(model_id, step, state);
        result
    }
}

fn into_rejection(outcome: ValidationOutcome) -> Result<()> {
    match outcome {
        ValidationOutcome::Valid => Ok(()),
        ValidationOutcome::Invalid { reason } => Err(IngestError::ValidationRejected(reason)),
    }
}
