//! The analysis workflow orchestrator.
//!
//! Control flows strictly forward, single attempt, no retries:
//! validate -> create record (advisory) -> fetch -> classify -> summarize
//! -> finalize record (advisory). Persistence failures never abort the
//! workflow; they only downgrade the `persisted` flag in the response.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nirogya_types::error::AnalysisError;

use crate::llm::CompletionClient;
use crate::llm::summarizer::summarize_image;
use crate::repository::SummaryRepository;
use crate::storage::ObjectStore;

use super::classify::{ContentClass, classify};

/// Request body for one analysis invocation.
///
/// Fields default to empty so an absent field and an empty field are
/// rejected identically; no further format validation is performed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub report_id: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub user_id: String,
}

impl AnalyzeRequest {
    /// Reject the request if any identifier is absent.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.report_id.is_empty() || self.file_path.is_empty() || self.user_id.is_empty() {
            return Err(AnalysisError::InvalidRequest);
        }
        Ok(())
    }
}

/// Successful analysis result returned to the caller.
///
/// `persisted` is true iff both the initial record insert and the final
/// status update succeeded. `summary_id` is present whenever the insert
/// succeeded, even if the final update later failed.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub summary: String,
    pub summary_id: Option<Uuid>,
    pub persisted: bool,
}

/// Orchestrates one analysis attempt end to end.
pub struct AnalysisWorkflow<R, S, C> {
    summaries: R,
    store: S,
    client: C,
}

impl<R, S, C> AnalysisWorkflow<R, S, C>
where
    R: SummaryRepository,
    S: ObjectStore,
    C: CompletionClient,
{
    pub fn new(summaries: R, store: S, client: C) -> Self {
        Self {
            summaries,
            store,
            client,
        }
    }

    /// Run the workflow for one request.
    ///
    /// On processing failure the created record (if any) is finalized as
    /// `failed` with the error's display text before the error is returned.
    pub async fn run(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, AnalysisError> {
        request.validate()?;

        // Advisory create: a rejected insert (e.g. access policy) must not
        // block the user-facing result.
        let record = match self
            .summaries
            .create_processing(&request.report_id, &request.user_id)
            .await
        {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::error!(
                    report_id = %request.report_id,
                    error = %err,
                    "failed to create summary record, continuing without persistence"
                );
                None
            }
        };

        match self.process(&request).await {
            Ok(summary) => {
                let summary_id = record.as_ref().map(|r| r.id);
                let mut persisted = false;
                if let Some(record) = &record {
                    match self.summaries.mark_completed(&record.id, &summary).await {
                        Ok(()) => persisted = true,
                        Err(err) => {
                            tracing::error!(
                                summary_id = %record.id,
                                error = %err,
                                "failed to update summary record, returning non-persisted result"
                            );
                        }
                    }
                }

                Ok(AnalyzeResponse {
                    success: true,
                    summary,
                    summary_id,
                    persisted,
                })
            }
            Err(err) => {
                if let Some(record) = &record {
                    if let Err(update_err) = self
                        .summaries
                        .mark_failed(&record.id, &err.to_string())
                        .await
                    {
                        tracing::error!(
                            summary_id = %record.id,
                            error = %update_err,
                            "failed to record analysis failure"
                        );
                    }
                }
                Err(err)
            }
        }
    }

    /// Fetch, classify, summarize. No side effects on the record store.
    async fn process(&self, request: &AnalyzeRequest) -> Result<String, AnalysisError> {
        let bytes = self
            .store
            .fetch(&request.file_path)
            .await
            .map_err(|err| {
                tracing::warn!(path = %request.file_path, error = %err, "storage fetch failed");
                AnalysisError::ContentNotFound
            })?;

        let ContentClass::Image { extension } = classify(&request.file_path)?;

        let summary = summarize_image(&self.client, &bytes, &extension).await?;
        tracing::info!(
            path = %request.file_path,
            summary_len = summary.len(),
            "report summarized"
        );
        Ok(summary)
    }
}
