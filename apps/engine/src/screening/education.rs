//! Education-level matching against a three-tier keyword hierarchy.

const PHD_KEYWORDS: &[&str] = &["ph.d", "phd", "doctorate", "doctoral"];
const MASTERS_KEYWORDS: &[&str] = &["master", "m.a.", "m.s.", "mba", "m.div", "m.t.s"];
const BACHELORS_KEYWORDS: &[&str] = &["bachelor", "b.a.", "b.s.", "b.sc", "undergraduate degree"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Scores the candidate's education against the job's stated requirement.
///
/// Full credit (20) for meeting or exceeding the required tier, partial
/// credit (10 or 5) for one tier below a Master's or PhD requirement, zero
/// otherwise. With no recognizable required tier, any degree keyword in the
/// resume earns full credit. Both inputs are expected lowercased.
pub fn score_education(required: &str, resume_text: &str) -> u32 {
    if contains_any(required, PHD_KEYWORDS) {
        if contains_any(resume_text, PHD_KEYWORDS) {
            return 20;
        } else if contains_any(resume_text, MASTERS_KEYWORDS) {
            return 10;
        } else if contains_any(resume_text, BACHELORS_KEYWORDS) {
            return 5;
        }
        return 0;
    }

    if contains_any(required, MASTERS_KEYWORDS) {
        if contains_any(resume_text, PHD_KEYWORDS) || contains_any(resume_text, MASTERS_KEYWORDS) {
            return 20;
        } else if contains_any(resume_text, BACHELORS_KEYWORDS) {
            return 10;
        }
        return 0;
    }

    if contains_any(required, BACHELORS_KEYWORDS) {
        if contains_any(resume_text, PHD_KEYWORDS)
            || contains_any(resume_text, MASTERS_KEYWORDS)
            || contains_any(resume_text, BACHELORS_KEYWORDS)
        {
            return 20;
        }
        return 0;
    }

    // No recognizable tier required: any degree keyword earns full credit.
    if contains_any(resume_text, PHD_KEYWORDS)
        || contains_any(resume_text, MASTERS_KEYWORDS)
        || contains_any(resume_text, BACHELORS_KEYWORDS)
    {
        return 20;
    }

    0
}
