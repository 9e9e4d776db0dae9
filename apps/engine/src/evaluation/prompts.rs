//! Stage-1 prompt construction.
//!
//! The output-format block below is a wire contract: the response parser
//! recognizes exactly these markers, so changes here must stay in sync with
//! `evaluation::parser`.

use crate::models::{Candidate, Job};

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        "None specified".to_string()
    } else {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders the full Stage 1 resume-screening prompt for one job/candidate
/// pair. Pure function of its inputs; absent job fields degrade to "N/A" or
/// "None specified" instead of failing.
pub fn build_stage1_prompt(rubric: &str, job: &Job, candidate: &Candidate) -> String {
    // The AI path normally carries the must-have/preferred split; callers
    // that only have the flat requirement list get it treated as must-have.
    let must_haves = if job.must_have_requirements.is_empty() {
        bullet_list(&job.requirements)
    } else {
        bullet_list(&job.must_have_requirements)
    };
    let preferreds = bullet_list(&job.preferred_requirements);

    let employment_type = if job.employment_type.is_empty() {
        "Full-time"
    } else {
        &job.employment_type
    };
    let resume = if candidate.resume_text.is_empty() {
        "No resume provided"
    } else {
        &candidate.resume_text
    };

    format!(
        "{rubric}\n\
        \n\
        ---\n\
        \n\
        TASK: Perform Stage 1 Resume Screening for this candidate.\n\
        \n\
        **JOB DETAILS:**\n\
        Title: {title}\n\
        Department: {department}\n\
        Location: {location}\n\
        Employment Type: {employment_type}\n\
        \n\
        **Must-Have Requirements:**\n\
        {must_haves}\n\
        \n\
        **Preferred Requirements:**\n\
        {preferreds}\n\
        \n\
        **Job Summary/Description:**\n\
        {summary}\n\
        \n\
        ---\n\
        \n\
        **CANDIDATE PROFILE:**\n\
        Name: {name}\n\
        Email: {email}\n\
        \n\
        **RESUME:**\n\
        {resume}\n\
        \n\
        ---\n\
        \n\
        Provide your Stage 1 evaluation in this EXACT format:\n\
        \n\
        SCORE: [0-100]\n\
        A_SCORE: [0-100] (accomplishments)\n\
        T_SCORE: [0-100] (trajectory)\n\
        Q_SCORE: [0-100] (qualifications)\n\
        RECOMMENDATION: [ADVANCE TO INTERVIEW / PHONE SCREEN FIRST / DECLINE]\n\
        \n\
        MATCH_ANALYSIS:\n\
        - [requirement]: [MET/NOT_MET/PARTIAL] - [brief evidence from resume]\n\
        (one line per must-have and preferred requirement)\n\
        \n\
        KEY_STRENGTHS:\n\
        - [Strength 1]\n\
        - [Strength 2]\n\
        - [Strength 3]\n\
        \n\
        OBSERVATIONS:\n\
        - [Observation 1]\n\
        - [Observation 2]\n\
        - [Observation 3]\n\
        \n\
        INTERVIEW_QUESTIONS:\n\
        1. [Question about a gap or concern]\n\
        2. [Question to verify a skill]\n\
        3. [Question about role fit]\n\
        \n\
        REASONING:\n\
        [2-3 paragraphs explaining the scoring and recommendation]\n",
        rubric = rubric,
        title = or_na(&job.title),
        department = or_na(&job.department),
        location = or_na(&job.location),
        employment_type = employment_type,
        must_haves = must_haves,
        preferreds = preferreds,
        summary = or_na(&job.summary),
        name = or_na(&candidate.name),
        email = or_na(&candidate.email),
        resume = resume,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job {
            title: "Staff Accountant".to_string(),
            department: "Finance".to_string(),
            must_have_requirements: vec!["CPA license".to_string(), "5+ years".to_string()],
            preferred_requirements: vec!["NetSuite".to_string()],
            summary: "Own the monthly close.".to_string(),
            ..Default::default()
        }
    }

    fn sample_candidate() -> Candidate {
        Candidate {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            resume_text: "CPA with 7 years of close experience.".to_string(),
        }
    }

    #[test]
    fn test_prompt_carries_all_format_markers() {
        let prompt = build_stage1_prompt("RUBRIC", &sample_job(), &sample_candidate());
        for marker in [
            "SCORE:",
            "A_SCORE:",
            "T_SCORE:",
            "Q_SCORE:",
            "RECOMMENDATION:",
            "MATCH_ANALYSIS:",
            "KEY_STRENGTHS:",
            "OBSERVATIONS:",
            "INTERVIEW_QUESTIONS:",
            "REASONING:",
        ] {
            assert!(prompt.contains(marker), "missing marker {marker}");
        }
    }

    #[test]
    fn test_prompt_starts_with_rubric() {
        let prompt = build_stage1_prompt("RUBRIC FIRST", &sample_job(), &sample_candidate());
        assert!(prompt.starts_with("RUBRIC FIRST"));
    }

    #[test]
    fn test_prompt_lists_requirements_as_bullets() {
        let prompt = build_stage1_prompt("r", &sample_job(), &sample_candidate());
        assert!(prompt.contains("- CPA license"));
        assert!(prompt.contains("- NetSuite"));
    }

    #[test]
    fn test_missing_fields_degrade_to_placeholders() {
        let prompt = build_stage1_prompt("r", &Job::default(), &Candidate::default());
        assert!(prompt.contains("Title: N/A"));
        assert!(prompt.contains("Employment Type: Full-time"));
        assert!(prompt.contains("None specified"));
        assert!(prompt.contains("No resume provided"));
    }

    #[test]
    fn test_flat_requirements_used_when_must_have_split_absent() {
        let job = Job {
            requirements: vec!["Python".to_string()],
            ..Default::default()
        };
        let prompt = build_stage1_prompt("r", &job, &sample_candidate());
        assert!(prompt.contains("- Python"));
    }
}
