//! Pipeline orchestrator
//!
//! Runs the staged analysis over one pair of narratives: facts,
//! classification, rule resolution, evidence scoring, and judicial
//! reasoning execute sequentially because each consumes the previous
//! artifact; the decision and advisory stages only consume upstream output
//! and run concurrently. A degraded stage never aborts the run, only
//! gateway and corpus failures do.

use std::sync::Arc;

use serde::Serialize;

use crate::gateway::{GatewayError, ModelGateway};
use crate::model::{
    Advisory, Archetype, CaseFacts, Classification, Config, EvidenceScores, HearingMessage,
    Judgment, PipelineMetadata, ReasoningChain,
};
use crate::rules::{ApplicableRules, CorpusError, RuleResolver};

use super::output::StageOutput;
use super::{advisory, classify, decision, evidence, facts, reasoning, StageRoute};

/// Stage count reported on a completed run: five sequential analytical
/// stages plus the two concurrent tail stages
const TOTAL_STAGES: u8 = 7;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("both party narratives are required")]
    MissingNarratives,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// Everything needed to adjudicate one case
#[derive(Debug, Clone)]
pub struct VerdictRequest {
    pub plaintiff_narrative: String,
    pub defendant_narrative: String,
    pub plaintiff_name: String,
    pub defendant_name: String,
    pub claimed_amount: Option<f64>,
    pub archetype_id: String,
    /// Concluded-hearing transcript, when one exists for the case
    pub hearing_transcript: Option<Vec<HearingMessage>>,
}

/// Identity of the archetype a bundle was produced under
#[derive(Debug, Clone, Serialize)]
pub struct ArchetypeSummary {
    pub id: String,
    pub name: String,
}

/// Complete output of one pipeline run. Degraded stages are carried as
/// explicit artifacts rather than dropped.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictBundle {
    pub judgment: StageOutput<Judgment>,
    pub reasoning_chain: StageOutput<ReasoningChain>,
    pub evidence_scores: StageOutput<EvidenceScores>,
    pub classification: StageOutput<Classification>,
    pub extracted_facts: StageOutput<CaseFacts>,
    pub applicable_rules: ApplicableRules,
    pub advisory: Advisory,
    pub archetype: ArchetypeSummary,
    pub metadata: PipelineMetadata,
}

pub struct Pipeline {
    gateway: Arc<ModelGateway>,
    resolver: Arc<RuleResolver>,
    /// Route for the extraction-class stages (facts, classification)
    extraction_route: StageRoute,
    /// Route for the reasoning-class stages (scoring through advisory)
    reasoning_route: StageRoute,
}

impl Pipeline {
    pub fn new(gateway: Arc<ModelGateway>, resolver: Arc<RuleResolver>, config: &Config) -> Self {
        Self {
            gateway,
            resolver,
            extraction_route: StageRoute {
                provider: config.extraction_provider.clone(),
                model: config.extraction_model.clone(),
            },
            reasoning_route: StageRoute {
                provider: config.reasoning_provider.clone(),
                model: config.reasoning_model.clone(),
            },
        }
    }

    /// Run the full pipeline for one archetype
    pub async fn run(&self, request: &VerdictRequest) -> Result<VerdictBundle, PipelineError> {
        if request.plaintiff_narrative.trim().is_empty()
            || request.defendant_narrative.trim().is_empty()
        {
            return Err(PipelineError::MissingNarratives);
        }

        let archetype = Archetype::lookup(&request.archetype_id);
        let mut metadata = PipelineMetadata::default();

        tracing::info!(
            archetype = archetype.id,
            plaintiff = %request.plaintiff_name,
            defendant = %request.defendant_name,
            "pipeline run started"
        );

        let gateway = self.gateway.as_ref();

        let (extracted_facts, record) = facts::extract_facts(
            gateway,
            &self.extraction_route,
            &request.plaintiff_narrative,
            &request.defendant_narrative,
            &request.plaintiff_name,
            &request.defendant_name,
            request.claimed_amount,
        )
        .await?;
        metadata.record(record);

        let (classification, record) =
            classify::classify_issues(gateway, &self.extraction_route, &extracted_facts).await?;
        metadata.record(record);

        let facts_view = extracted_facts.parsed_or_default();
        let classification_view = classification.parsed_or_default();

        // A degraded classification resolves against the general claim set
        let case_type = if classification_view.primary_type.is_empty() {
            "other"
        } else {
            &classification_view.primary_type
        };
        let claim_description = if !classification_view.summary.is_empty() {
            classification_view.summary.clone()
        } else {
            facts_view
                .claims
                .first()
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "small claims dispute".to_string())
        };

        let applicable_rules = self
            .resolver
            .resolve(case_type, &claim_description, &facts_view.disputed_issues)
            .await?;
        let checklist = applicable_rules.claim_elements.clone();

        let (evidence_scores, record) = evidence::score_evidence(
            gateway,
            &self.reasoning_route,
            &extracted_facts,
            &classification_view,
            &checklist,
            archetype,
        )
        .await?;
        metadata.record(record);

        let (reasoning_chain, record) = reasoning::generate_reasoning(
            gateway,
            &self.reasoning_route,
            &extracted_facts,
            &classification_view,
            &applicable_rules,
            &evidence_scores,
            archetype,
            request.hearing_transcript.as_deref(),
        )
        .await?;
        metadata.record(record);

        let claimed_amount = request.claimed_amount.or(facts_view.claimed_amount);

        // Both tail stages read only upstream artifacts
        let (decision_result, advisory_result) = tokio::join!(
            decision::generate_decision(
                gateway,
                &self.reasoning_route,
                &reasoning_chain,
                &extracted_facts,
                &classification_view,
                &evidence_scores,
                archetype,
            ),
            advisory::generate_advisory(
                gateway,
                &self.reasoning_route,
                &extracted_facts,
                &classification_view,
                &evidence_scores,
                &reasoning_chain,
                &checklist,
                claimed_amount,
            ),
        );

        let (judgment, record) = decision_result?;
        metadata.record(record);
        let (advisory, record) = advisory_result?;
        metadata.record(record);

        metadata.stages_completed = TOTAL_STAGES;

        tracing::info!(
            archetype = archetype.id,
            total_cost_usd = metadata.total_cost_usd,
            calls = metadata.calls.len(),
            degraded_judgment = judgment.is_malformed(),
            "pipeline run completed"
        );

        Ok(VerdictBundle {
            judgment,
            reasoning_chain,
            evidence_scores,
            classification,
            extracted_facts,
            applicable_rules,
            advisory,
            archetype: ArchetypeSummary {
                id: archetype.id.to_string(),
                name: archetype.name.to_string(),
            },
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{ChatRequest, Completion, CompletionProvider, ProviderError};
    use crate::model::{Party, StrengthLabel};
    use crate::testutil::{scripted_gateway, test_config, CannedCorpus, ScriptedProvider};
    use async_trait::async_trait;

    fn pipeline_with(provider: Arc<ScriptedProvider>) -> Pipeline {
        let gateway = Arc::new(scripted_gateway(provider));
        let resolver = Arc::new(RuleResolver::new(Arc::new(CannedCorpus), 6));
        Pipeline::new(gateway, resolver, &test_config())
    }

    fn deposit_request() -> VerdictRequest {
        VerdictRequest {
            plaintiff_narrative: "My landlord kept my $1,500 deposit with no explanation."
                .to_string(),
            defendant_narrative: "The carpet needed replacement after the tenant moved out."
                .to_string(),
            plaintiff_name: "Dana Reyes".to_string(),
            defendant_name: "Bridger Property LLC".to_string(),
            claimed_amount: Some(1500.0),
            archetype_id: "strict".to_string(),
            hearing_transcript: None,
        }
    }

    #[tokio::test]
    async fn full_run_produces_complete_bundle() {
        let provider = Arc::new(ScriptedProvider::new());
        let pipeline = pipeline_with(provider.clone());

        let bundle = pipeline.run(&deposit_request()).await.unwrap();

        let judgment = bundle.judgment.as_parsed().unwrap();
        assert_eq!(judgment.in_favor_of, Party::Plaintiff);
        assert_eq!(judgment.awarded_amount, Some(1500.0));

        assert_eq!(
            bundle.applicable_rules.claim_elements.name,
            "Security Deposit Return"
        );
        assert_eq!(bundle.applicable_rules.retrieved_corpus.len(), 1);

        assert_eq!(bundle.archetype.id, "strict");
        assert_eq!(bundle.archetype.name, "Judge Morrison");

        // six model calls across seven stages; rule resolution is local
        assert_eq!(provider.call_count(), 6);
        assert_eq!(bundle.metadata.calls.len(), 6);
        assert_eq!(bundle.metadata.stages_completed, 7);
        assert!(bundle.metadata.total_cost_usd > 0.0);

        assert!(matches!(
            bundle.advisory.case_strength.label,
            StrengthLabel::Strong | StrengthLabel::VeryStrong
        ));
        assert!(!bundle.advisory.evidence_recommendations.is_empty());
    }

    #[tokio::test]
    async fn missing_narrative_rejected_before_any_model_call() {
        let provider = Arc::new(ScriptedProvider::new());
        let pipeline = pipeline_with(provider.clone());

        let mut request = deposit_request();
        request.defendant_narrative = "   ".to_string();

        let error = pipeline.run(&request).await.unwrap_err();
        assert!(matches!(error, PipelineError::MissingNarratives));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_archetype_falls_back_to_default_profile() {
        let pipeline = pipeline_with(Arc::new(ScriptedProvider::new()));

        let mut request = deposit_request();
        request.archetype_id = "judge_dredd".to_string();

        let bundle = pipeline.run(&request).await.unwrap();
        assert_eq!(bundle.archetype.id, "common_sense");
    }

    /// Delegating provider that answers the classification stage with prose
    struct GarbageClassifier {
        inner: ScriptedProvider,
    }

    #[async_trait]
    impl CompletionProvider for GarbageClassifier {
        async fn complete(&self, request: &ChatRequest) -> Result<Completion, ProviderError> {
            if request.system.contains("case classifier") {
                return Ok(Completion {
                    content: "I am unable to classify this dispute.".to_string(),
                    input_tokens: 50,
                    output_tokens: 10,
                });
            }
            self.inner.complete(request).await
        }

        async fn embed(
            &self,
            model: &str,
            text: &str,
            dimensions: u32,
        ) -> Result<Vec<f32>, ProviderError> {
            self.inner.embed(model, text, dimensions).await
        }
    }

    #[tokio::test]
    async fn degraded_classification_still_completes_with_general_claim() {
        let mut gateway = crate::gateway::ModelGateway::new(&test_config());
        gateway.register_provider(
            "scripted",
            Arc::new(GarbageClassifier {
                inner: ScriptedProvider::new(),
            }),
        );
        let resolver = Arc::new(RuleResolver::new(Arc::new(CannedCorpus), 6));
        let pipeline = Pipeline::new(Arc::new(gateway), resolver, &test_config());

        let bundle = pipeline.run(&deposit_request()).await.unwrap();

        assert!(bundle.classification.is_malformed());
        assert_eq!(
            bundle.applicable_rules.claim_elements.name,
            "General Civil Claim"
        );
        assert!(bundle.judgment.as_parsed().is_some());
        assert_eq!(bundle.metadata.stages_completed, 7);
    }
}
