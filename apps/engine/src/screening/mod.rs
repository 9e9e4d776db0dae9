//! Rule-based candidate screening: keyword overlap, experience, and
//! education matching combined into a bounded 0-100 score. No model call,
//! fully deterministic, so it can rank a whole applicant pool for free.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Candidate, Job};

pub mod education;
pub mod experience;

/// Score at or above which a candidate advances straight to interview.
pub const SCORE_THRESHOLD_INTERVIEW: f64 = 85.0;
/// Score at or above which a candidate gets a phone screen.
pub const SCORE_THRESHOLD_PHONE: f64 = 70.0;

const WEIGHT_KEYWORDS: f64 = 60.0;
const WEIGHT_EXPERIENCE: f64 = 20.0;
const WEIGHT_EDUCATION: f64 = 20.0;

/// Keyword lists shown to reviewers are capped at this many entries.
const KEYWORD_DISPLAY_LIMIT: usize = 10;

/// Per-component contribution to the total score. Components are
/// independently bounded (keywords <= 60, experience <= 20, education <= 20)
/// so the sum never leaves [0, 100].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub required_keywords: f64,
    pub experience_years: f64,
    pub education_match: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.required_keywords + self.experience_years + self.education_match
    }
}

/// Screening verdict for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub name: String,
    pub score: u32,
    pub recommendation: String,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub experience_years_found: Option<u32>,
    pub experience_years_required: Option<u32>,
}

/// Aggregate counts over a screened applicant pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total_candidates: usize,
    pub advance_to_interview: usize,
    pub phone_screen: usize,
    pub declined: usize,
    pub top_candidate: Option<String>,
    pub top_score: u32,
}

/// Screens a single candidate against a job.
///
/// Keyword component: fraction of requirement strings (plus education and
/// license lines, if any) found as case-insensitive substrings of the
/// resume, scaled to 60. A job with no keywords at all scores the full 60.
/// Experience component: full 20 when the candidate meets the stated
/// requirement, proportional credit below it, full 20 when no requirement
/// is stated, zero when a requirement exists but no years could be found.
/// Education component: tiered match worth up to 20.
pub fn screen_candidate(job: &Job, candidate: &Candidate) -> ScreeningResult {
    let resume_text = candidate.resume_text.to_lowercase();

    let mut keywords: Vec<String> = job.requirements.iter().map(|r| r.to_lowercase()).collect();
    if let Some(education) = &job.education {
        keywords.push(education.to_lowercase());
    }
    if let Some(licenses) = &job.licenses {
        keywords.push(licenses.to_lowercase());
    }

    let mut breakdown = ScoreBreakdown::default();
    let candidate_years = experience::candidate_years(&resume_text);

    // 1. Required keywords (60 points).
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    if keywords.is_empty() {
        breakdown.required_keywords = WEIGHT_KEYWORDS;
    } else {
        for keyword in &keywords {
            if keyword_matches(keyword, &resume_text, candidate_years) {
                matched.push(keyword.clone());
            } else {
                missing.push(keyword.clone());
            }
        }
        breakdown.required_keywords =
            (matched.len() as f64 / keywords.len() as f64) * WEIGHT_KEYWORDS;
    }

    // 2. Experience years (20 points).
    let required_years = experience::required_years(job);
    breakdown.experience_years = match (required_years, candidate_years) {
        (Some(required), Some(found)) => {
            if found >= required {
                WEIGHT_EXPERIENCE
            } else {
                (found as f64 / required as f64) * WEIGHT_EXPERIENCE
            }
        }
        (None, _) => WEIGHT_EXPERIENCE,
        (Some(_), None) => 0.0,
    };

    // 3. Education match (20 points).
    breakdown.education_match = match job.education.as_deref() {
        Some(required) if !required.is_empty() => {
            education::score_education(&required.to_lowercase(), &resume_text) as f64
        }
        _ => WEIGHT_EDUCATION,
    };

    let total = breakdown.total();
    let recommendation = if total >= SCORE_THRESHOLD_INTERVIEW {
        "ADVANCE TO INTERVIEW"
    } else if total >= SCORE_THRESHOLD_PHONE {
        "PHONE SCREEN FIRST"
    } else {
        "DECLINE"
    };

    debug!(
        candidate = %candidate.name,
        score = total,
        recommendation,
        "screened candidate"
    );

    matched.truncate(KEYWORD_DISPLAY_LIMIT);
    missing.truncate(KEYWORD_DISPLAY_LIMIT);

    ScreeningResult {
        name: candidate.name.clone(),
        score: total.round() as u32,
        recommendation: recommendation.to_string(),
        matched_keywords: matched,
        missing_keywords: missing,
        breakdown,
        experience_years_found: candidate_years,
        experience_years_required: required_years,
    }
}

/// A requirement string that states an experience threshold ("5+ years
/// experience") is satisfied by the candidate's extracted years rather than
/// by literal substring presence; every other keyword is a plain
/// case-insensitive substring check.
fn keyword_matches(keyword: &str, resume_text: &str, candidate_years: Option<u32>) -> bool {
    if let Some(required) = experience::years_stated(keyword) {
        return candidate_years.is_some_and(|found| found >= required);
    }
    resume_text.contains(keyword)
}

/// Screens every candidate in the pool and returns the results sorted by
/// descending score, together with aggregate counts.
pub fn screen_all(job: &Job, candidates: &[Candidate]) -> (Vec<ScreeningResult>, ScreeningSummary) {
    let mut results: Vec<ScreeningResult> = candidates
        .iter()
        .map(|candidate| screen_candidate(job, candidate))
        .collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));
    let summary = summarize(&results);
    (results, summary)
}

/// Builds the aggregate counts for an already-sorted result list.
pub fn summarize(results: &[ScreeningResult]) -> ScreeningSummary {
    ScreeningSummary {
        total_candidates: results.len(),
        advance_to_interview: results
            .iter()
            .filter(|r| r.recommendation == "ADVANCE TO INTERVIEW")
            .count(),
        phone_screen: results
            .iter()
            .filter(|r| r.recommendation == "PHONE SCREEN FIRST")
            .count(),
        declined: results
            .iter()
            .filter(|r| r.recommendation == "DECLINE")
            .count(),
        top_candidate: results.first().map(|r| r.name.clone()),
        top_score: results.first().map(|r| r.score).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(requirements: &[&str], education: Option<&str>) -> Job {
        Job {
            requirements: requirements.iter().map(|s| s.to_string()).collect(),
            education: education.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    fn candidate(name: &str, resume_text: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            resume_text: resume_text.to_string(),
        }
    }

    #[test]
    fn test_full_match_scores_100() {
        let job = job(&["5+ years experience", "Python"], None);
        let candidate = candidate(
            "Ada",
            "Seasoned Python developer with 7 years experience shipping services.",
        );

        let result = screen_candidate(&job, &candidate);
        assert_eq!(result.score, 100);
        assert_eq!(result.recommendation, "ADVANCE TO INTERVIEW");
        assert_eq!(result.matched_keywords.len(), 2);
        assert!(result.missing_keywords.is_empty());
        assert_eq!(result.experience_years_found, Some(7));
        assert_eq!(result.experience_years_required, Some(5));
    }

    #[test]
    fn test_partial_keyword_match_no_years_scores_50() {
        let job = job(&["5+ years experience", "Python"], None);
        let candidate = candidate("Bob", "Python hobbyist.");

        let result = screen_candidate(&job, &candidate);
        // Keywords 1/2 -> 30, experience required but unstated -> 0,
        // no education requirement -> 20.
        assert_eq!(result.score, 50);
        assert_eq!(result.recommendation, "DECLINE");
        assert_eq!(result.breakdown.required_keywords, 30.0);
        assert_eq!(result.breakdown.experience_years, 0.0);
        assert_eq!(result.breakdown.education_match, 20.0);
    }

    #[test]
    fn test_unconstrained_job_scores_100() {
        let result = screen_candidate(&Job::default(), &candidate("Cam", "anything"));
        assert_eq!(result.score, 100);
        assert_eq!(result.recommendation, "ADVANCE TO INTERVIEW");
    }

    #[test]
    fn test_score_equals_component_sum_and_stays_bounded() {
        let job = job(&["rust", "sql", "kafka"], Some("Master's degree"));
        let candidate = candidate("Dee", "rust and sql, b.s. in math, 2019-2023 at acme");

        let result = screen_candidate(&job, &candidate);
        let expected = result.breakdown.total().round() as u32;
        assert_eq!(result.score, expected);
        assert!(result.score <= 100);
    }

    #[test]
    fn test_proportional_experience_credit() {
        let job = job(&["10 years experience required"], None);
        let candidate = candidate("Eve", "5 years experience in operations");

        let result = screen_candidate(&job, &candidate);
        // 5/10 of the 20 experience points.
        assert_eq!(result.breakdown.experience_years, 10.0);
    }

    #[test]
    fn test_education_requirement_unmet_drops_component() {
        let job = job(&[], Some("PhD in Statistics"));
        let candidate = candidate("Fay", "ten years of applied work, no degree listed");

        let result = screen_candidate(&job, &candidate);
        assert_eq!(result.breakdown.education_match, 0.0);
    }

    #[test]
    fn test_keyword_lists_truncated_for_display() {
        let reqs: Vec<String> = (0..15).map(|i| format!("skill-{i}")).collect();
        let refs: Vec<&str> = reqs.iter().map(|s| s.as_str()).collect();
        let job = job(&refs, None);

        let result = screen_candidate(&job, &candidate("Gil", "no relevant skills"));
        assert_eq!(result.missing_keywords.len(), 10);
    }

    #[test]
    fn test_license_strings_count_as_keywords() {
        let job = Job {
            requirements: vec![],
            licenses: Some("CPA".to_string()),
            ..Default::default()
        };
        let result = screen_candidate(&job, &candidate("Hal", "licensed cpa since 2015"));
        assert_eq!(result.breakdown.required_keywords, 60.0);
    }

    #[test]
    fn test_screen_all_sorts_descending_and_summarizes() {
        let job = job(&["python"], None);
        let pool = vec![
            candidate("Low", "nothing relevant"),
            candidate("High", "python expert"),
        ];

        let (results, summary) = screen_all(&job, &pool);
        assert_eq!(results[0].name, "High");
        assert_eq!(results[0].score, 100);
        assert_eq!(summary.total_candidates, 2);
        assert_eq!(summary.advance_to_interview, 1);
        assert_eq!(summary.declined, 1);
        assert_eq!(summary.top_candidate.as_deref(), Some("High"));
        assert_eq!(summary.top_score, 100);
    }

    #[test]
    fn test_summarize_empty_pool() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_candidates, 0);
        assert!(summary.top_candidate.is_none());
        assert_eq!(summary.top_score, 0);
    }
}
