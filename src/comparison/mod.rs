//! Multi-archetype comparison engine
//!
//! Fans the pipeline out across several archetypes for one case, caches the
//! resulting run under a content fingerprint, and reuses it until the case
//! or hearing state changes. Per-archetype failures are isolated; a run may
//! legitimately hold fewer results than requested archetypes.

pub mod fingerprint;
pub mod insights;

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::engine::{Pipeline, VerdictRequest};
use crate::model::{ComparisonInsights, ComparisonResult, ComparisonRun, Config};
use crate::store::{ComparisonStore, StoreError};

pub use fingerprint::comparison_fingerprint;

/// Substring a judge message carries once the hearing has been closed out
/// in generated text
pub const CONCLUSION_MARKER: &str = "hearing is now concluded";

/// Insert attempts before a repeated conflict/vanish race surfaces as an
/// error
const MAX_INSERT_ATTEMPTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error("at least one archetype id is required")]
    EmptyArchetypes,

    #[error("case is missing one or both narratives")]
    MissingNarratives,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A comparison run plus whether it was served from cache
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub run: ComparisonRun,
    pub reused: bool,
    pub insights: Option<ComparisonInsights>,
}

type ConclusionDetector = Arc<dyn Fn(&str) -> bool + Send + Sync>;

pub struct ComparisonEngine {
    store: Arc<dyn ComparisonStore>,
    pipeline: Arc<Pipeline>,
    concurrency: usize,
    conclusion_detector: ConclusionDetector,
}

impl ComparisonEngine {
    pub fn new(store: Arc<dyn ComparisonStore>, pipeline: Arc<Pipeline>, config: &Config) -> Self {
        Self {
            store,
            pipeline,
            concurrency: config.comparison_concurrency.max(1),
            conclusion_detector: Arc::new(|text: &str| {
                text.to_lowercase().contains(CONCLUSION_MARKER)
            }),
        }
    }

    /// Replace the transcript predicate deciding whether an uncompleted
    /// hearing counts as concluded
    pub fn with_conclusion_detector(mut self, detector: ConclusionDetector) -> Self {
        self.conclusion_detector = detector;
        self
    }

    /// Serve the cached run for the current case+hearing state, or execute
    /// a fresh fan-out. `force_refresh` deletes a matching prior run before
    /// recomputing.
    pub async fn run_or_reuse(
        &self,
        case_id: Uuid,
        archetype_ids: &[String],
        force_refresh: bool,
    ) -> Result<ComparisonOutcome, ComparisonError> {
        let mut ids: Vec<String> = archetype_ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        ids.sort();
        ids.dedup();
        if ids.is_empty() {
            return Err(ComparisonError::EmptyArchetypes);
        }

        let case = self.store.load_case(case_id).await?;
        if case.plaintiff_narrative.trim().is_empty()
            || case.defendant_narrative.trim().is_empty()
        {
            return Err(ComparisonError::MissingNarratives);
        }
        let hearing = self.store.load_hearing(case_id).await?;

        let fingerprint = comparison_fingerprint(&case, hearing.as_ref(), &ids);

        if let Some(existing) = self.store.find_run(case_id, &fingerprint).await? {
            if !force_refresh {
                tracing::info!(
                    case = %case_id,
                    fingerprint = %fingerprint,
                    results = existing.results.len(),
                    "serving cached comparison run"
                );
                let insights = insights::synthesize(&existing.results);
                return Ok(ComparisonOutcome {
                    run: existing,
                    reused: true,
                    insights,
                });
            }
            // hard invalidation: the prior run and its results go away first
            tracing::info!(case = %case_id, fingerprint = %fingerprint, "refreshing comparison run");
            self.store.delete_run(case_id, &fingerprint).await?;
        }

        // the transcript only informs reasoning once the hearing concluded
        let detector: &dyn Fn(&str) -> bool = &*self.conclusion_detector;
        let transcript = hearing
            .as_ref()
            .filter(|h| h.is_concluded(detector))
            .map(|h| h.transcript());

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let executions = ids.iter().map(|archetype_id| {
            let semaphore = Arc::clone(&semaphore);
            let request = VerdictRequest {
                plaintiff_narrative: case.plaintiff_narrative.clone(),
                defendant_narrative: case.defendant_narrative.clone(),
                plaintiff_name: case.plaintiff_name.clone(),
                defendant_name: case.defendant_name.clone(),
                claimed_amount: case.claimed_amount,
                archetype_id: archetype_id.clone(),
                hearing_transcript: transcript.clone(),
            };
            async move {
                // the semaphore lives for the whole fan-out, acquire cannot fail
                let _permit = semaphore.acquire().await.ok();
                let outcome = self.pipeline.run(&request).await;
                (archetype_id.clone(), outcome)
            }
        });
        let outcomes = join_all(executions).await;

        let mut results = Vec::new();
        let mut ledger = Vec::new();
        for (archetype_id, outcome) in outcomes {
            match outcome {
                Ok(bundle) => {
                    for call in &bundle.metadata.calls {
                        let mut call = call.clone();
                        call.stage = format!("cmp:{archetype_id}:{}", call.stage);
                        ledger.push(call);
                    }
                    results.push(ComparisonResult {
                        archetype_id,
                        judgment: bundle.judgment.parsed_or_default(),
                        evidence_scores: bundle.evidence_scores.parsed_or_default(),
                        reasoning_chain: bundle.reasoning_chain.parsed_or_default(),
                        pipeline_metadata: bundle.metadata,
                    });
                }
                Err(error) => {
                    tracing::error!(
                        case = %case_id,
                        archetype = %archetype_id,
                        error = %error,
                        "archetype execution failed, continuing with siblings"
                    );
                }
            }
        }

        let run = ComparisonRun {
            id: Uuid::new_v4(),
            case_id,
            fingerprint: fingerprint.clone(),
            archetype_ids: ids,
            created_at: Utc::now(),
            results,
        };

        // the calls were made regardless of who wins the insert race, so the
        // ledger is appended before the run record
        self.store.append_call_records(case_id, &ledger).await?;

        let mut conflicts = 0;
        loop {
            match self.store.insert_run(&run).await {
                Ok(()) => break,
                Err(StoreError::Conflict(reason)) => {
                    // lost a concurrent race for this fingerprint; serve the winner
                    if let Some(existing) = self.store.find_run(case_id, &fingerprint).await? {
                        let insights = insights::synthesize(&existing.results);
                        return Ok(ComparisonOutcome {
                            run: existing,
                            reused: true,
                            insights,
                        });
                    }
                    // winner vanished between conflict and re-read; retry so
                    // the computed run is never silently dropped
                    conflicts += 1;
                    if conflicts >= MAX_INSERT_ATTEMPTS {
                        return Err(StoreError::Conflict(reason).into());
                    }
                    tracing::warn!(
                        case = %case_id,
                        fingerprint = %fingerprint,
                        "conflicting run disappeared, retrying insert"
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }

        tracing::info!(
            case = %case_id,
            fingerprint = %fingerprint,
            requested = run.archetype_ids.len(),
            succeeded = run.results.len(),
            "comparison run persisted"
        );

        let insights = insights::synthesize(&run.results);
        Ok(ComparisonOutcome {
            run,
            reused: false,
            insights,
        })
    }
}
