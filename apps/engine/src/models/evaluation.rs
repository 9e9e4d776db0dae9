use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a single job requirement matched against the resume, as judged by the
/// model in its MATCH_ANALYSIS block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Met,
    NotMet,
    Partial,
    Unknown,
}

/// One requirement-level verdict from the AI evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementMatch {
    pub requirement: String,
    pub status: MatchStatus,
    pub evidence: String,
}

/// Structured result of parsing one model reply.
///
/// Every numeric score is clamped to 0-100 before it lands here. The
/// recommendation is whatever text the model produced; no enum validation is
/// applied (downstream consumers tolerate free-form phrasing).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u32,
    pub a_score: u32,
    pub t_score: u32,
    pub q_score: u32,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    pub strengths: Vec<String>,
    pub observations: Vec<String>,
    pub interview_questions: Vec<String>,
    pub reasoning: String,
    pub match_analysis: Vec<RequirementMatch>,
}

/// Token and cost accounting for one provider call, normalized across all
/// backends. `elapsed_seconds` is only reported by the local daemon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost: f64,
    pub model: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
}

/// Full result bundle returned to the caller: the parsed evaluation, usage
/// metadata, and the literal model text for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub stage: u8,
    pub evaluation: Evaluation,
    pub usage: Usage,
    pub raw_response: String,
    pub evaluated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&MatchStatus::NotMet).unwrap(),
            r#""NOT_MET""#
        );
        assert_eq!(
            serde_json::to_string(&MatchStatus::Met).unwrap(),
            r#""MET""#
        );
    }

    #[test]
    fn test_evaluation_default_is_all_zeroes() {
        let eval = Evaluation::default();
        assert_eq!(eval.score, 0);
        assert!(eval.strengths.is_empty());
        assert!(eval.confidence.is_none());
    }
}
