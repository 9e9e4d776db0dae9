//! AI-assisted evaluation orchestration: validate, build the prompt, make
//! one provider call, parse, and bundle the result with usage metadata.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::models::{Candidate, EvaluationReport, Job};
use crate::providers::{build_provider, Provider};

pub mod parser;
pub mod prompts;
pub mod rubric;

/// Resume screening, the only stage built so far.
pub const STAGE_RESUME_SCREEN: u8 = 1;
/// Post-interview synthesis; requesting it yields an explicit
/// not-implemented signal rather than a generic error.
pub const STAGE_FINAL_DECISION: u8 = 2;

/// One entry of a batch run. A failed candidate keeps its slot with the
/// error attached instead of aborting the rest of the pool.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub candidate_name: String,
    pub candidate_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<EvaluationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Top-level evaluation orchestrator.
///
/// Owns an explicit `EngineConfig` so differently-configured evaluators can
/// coexist in one process; nothing is read from ambient state mid-call.
pub struct Evaluator {
    config: EngineConfig,
}

impl Evaluator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates one candidate with the configured default provider.
    pub async fn evaluate(
        &self,
        job: &Job,
        candidate: &Candidate,
        stage: u8,
    ) -> Result<EvaluationReport, EngineError> {
        let provider_name = self.config.default_provider.clone();
        self.evaluate_with(job, candidate, stage, &provider_name, None)
            .await
    }

    /// Evaluates one candidate with an explicitly named provider and
    /// optional model override. Credential and stage problems surface
    /// before any network call.
    pub async fn evaluate_with(
        &self,
        job: &Job,
        candidate: &Candidate,
        stage: u8,
        provider_name: &str,
        model: Option<&str>,
    ) -> Result<EvaluationReport, EngineError> {
        validate_stage(stage)?;
        let provider = build_provider(provider_name, model, &self.config)?;
        self.evaluate_with_provider(job, candidate, stage, provider.as_ref())
            .await
    }

    /// Runs the evaluation chain against an already-constructed backend.
    /// Useful for custom `Provider` implementations and for tests.
    pub async fn evaluate_with_provider(
        &self,
        job: &Job,
        candidate: &Candidate,
        stage: u8,
        provider: &dyn Provider,
    ) -> Result<EvaluationReport, EngineError> {
        validate_stage(stage)?;

        let rubric = rubric::load_rubric(self.config.rubric_path.as_deref());
        let prompt = prompts::build_stage1_prompt(&rubric, job, candidate);

        info!(
            candidate = %candidate.name,
            job = %job.title,
            provider = provider.name(),
            "starting stage 1 evaluation"
        );

        let response = provider.evaluate(&prompt).await?;
        let evaluation = parser::parse_evaluation(&response.text);

        Ok(EvaluationReport {
            stage,
            evaluation,
            usage: response.usage,
            raw_response: response.text,
            evaluated_at: Utc::now(),
        })
    }

    /// Evaluates a whole pool sequentially with the default provider. Each
    /// candidate's failure is captured on its own entry; one bad resume or
    /// transient provider error does not abort the batch.
    pub async fn evaluate_batch(
        &self,
        job: &Job,
        candidates: &[Candidate],
        stage: u8,
    ) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let outcome = match self.evaluate(job, candidate, stage).await {
                Ok(report) => BatchOutcome {
                    candidate_name: candidate.name.clone(),
                    candidate_email: candidate.email.clone(),
                    report: Some(report),
                    error: None,
                },
                Err(e) => {
                    warn!(candidate = %candidate.name, "batch evaluation entry failed: {e}");
                    BatchOutcome {
                        candidate_name: candidate.name.clone(),
                        candidate_email: candidate.email.clone(),
                        report: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Batch variant for an already-constructed backend.
    pub async fn evaluate_batch_with_provider(
        &self,
        job: &Job,
        candidates: &[Candidate],
        stage: u8,
        provider: &dyn Provider,
    ) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let outcome = match self
                .evaluate_with_provider(job, candidate, stage, provider)
                .await
            {
                Ok(report) => BatchOutcome {
                    candidate_name: candidate.name.clone(),
                    candidate_email: candidate.email.clone(),
                    report: Some(report),
                    error: None,
                },
                Err(e) => {
                    warn!(candidate = %candidate.name, "batch evaluation entry failed: {e}");
                    BatchOutcome {
                        candidate_name: candidate.name.clone(),
                        candidate_email: candidate.email.clone(),
                        report: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

fn validate_stage(stage: u8) -> Result<(), EngineError> {
    match stage {
        STAGE_RESUME_SCREEN => Ok(()),
        STAGE_FINAL_DECISION => Err(EngineError::StageNotImplemented(stage)),
        other => Err(EngineError::Configuration(format!(
            "Invalid stage {other}. Must be 1 or 2."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::models::Usage;
    use crate::providers::{ProviderError, ProviderResponse};

    struct StubProvider {
        reply: &'static str,
    }

    #[async_trait]
    impl Provider for StubProvider {
        async fn evaluate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse {
                text: self.reply.to_string(),
                usage: Usage {
                    input_tokens: 1000,
                    output_tokens: 500,
                    cost: 0.000875,
                    model: "stub-model".to_string(),
                    provider: "stub".to_string(),
                    elapsed_seconds: None,
                },
            })
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        async fn evaluate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
            Err(ProviderError::Connection {
                endpoint: "http://localhost:11434".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn evaluator() -> Evaluator {
        Evaluator::new(EngineConfig::default())
    }

    fn job_and_candidate() -> (Job, Candidate) {
        (
            Job {
                title: "Controller".to_string(),
                must_have_requirements: vec!["CPA".to_string()],
                ..Default::default()
            },
            Candidate {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                resume_text: "CPA, 8 years of close work.".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_stage_two_signals_not_implemented() {
        let (job, candidate) = job_and_candidate();
        let err = evaluator()
            .evaluate_with_provider(&job, &candidate, 2, &StubProvider { reply: "" })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::StageNotImplemented(2)));
    }

    #[tokio::test]
    async fn test_invalid_stage_is_configuration_error() {
        let (job, candidate) = job_and_candidate();
        let err = evaluator()
            .evaluate_with_provider(&job, &candidate, 3, &StubProvider { reply: "" })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert!(err.to_string().contains("Invalid stage 3"));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        // Default config has no anthropic key; the factory refuses before
        // any request is issued.
        let (job, candidate) = job_and_candidate();
        let err = evaluator()
            .evaluate(&job, &candidate, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[tokio::test]
    async fn test_happy_path_bundles_parse_usage_and_raw_text() {
        let (job, candidate) = job_and_candidate();
        let stub = StubProvider {
            reply: "SCORE: 91\nRECOMMENDATION: ADVANCE TO INTERVIEW\n",
        };
        let report = evaluator()
            .evaluate_with_provider(&job, &candidate, 1, &stub)
            .await
            .unwrap();

        assert_eq!(report.stage, 1);
        assert_eq!(report.evaluation.score, 91);
        assert_eq!(report.evaluation.recommendation, "ADVANCE TO INTERVIEW");
        assert_eq!(report.usage.input_tokens, 1000);
        assert_eq!(report.usage.cost, 0.000875);
        assert!(report.raw_response.contains("SCORE: 91"));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_not_an_error() {
        let (job, candidate) = job_and_candidate();
        let stub = StubProvider {
            reply: "the model rambled and produced nothing usable",
        };
        let report = evaluator()
            .evaluate_with_provider(&job, &candidate, 1, &stub)
            .await
            .unwrap();
        assert_eq!(report.evaluation.score, 50);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates_unmodified() {
        let (job, candidate) = job_and_candidate();
        let err = evaluator()
            .evaluate_with_provider(&job, &candidate, 1, &FailingProvider)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Provider(ProviderError::Connection { .. })
        ));
    }

    #[tokio::test]
    async fn test_batch_captures_per_candidate_failures() {
        let (job, _) = job_and_candidate();
        let candidates = vec![
            Candidate {
                name: "First".to_string(),
                ..Default::default()
            },
            Candidate {
                name: "Second".to_string(),
                ..Default::default()
            },
        ];

        let outcomes = evaluator()
            .evaluate_batch_with_provider(&job, &candidates, 1, &FailingProvider)
            .await;

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(outcome.report.is_none());
            assert!(outcome.error.as_deref().unwrap_or("").contains("connect"));
        }
    }

    #[tokio::test]
    async fn test_batch_happy_path_preserves_order() {
        let (job, _) = job_and_candidate();
        let candidates = vec![
            Candidate {
                name: "First".to_string(),
                ..Default::default()
            },
            Candidate {
                name: "Second".to_string(),
                ..Default::default()
            },
        ];
        let stub = StubProvider {
            reply: "SCORE: 75\n",
        };

        let outcomes = evaluator()
            .evaluate_batch_with_provider(&job, &candidates, 1, &stub)
            .await;

        assert_eq!(outcomes[0].candidate_name, "First");
        assert_eq!(outcomes[1].candidate_name, "Second");
        assert!(outcomes.iter().all(|o| o.error.is_none()));
        assert_eq!(outcomes[0].report.as_ref().unwrap().evaluation.score, 75);
    }
}
