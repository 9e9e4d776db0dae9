//! Rubric-instructions loading.
//!
//! The scoring methodology lives in an external text file so recruiters can
//! tune it without a deploy. The engine only needs "load or fall back": a
//! missing or unreadable file silently degrades to the embedded text below,
//! which carries the same weights and thresholds.

use std::path::Path;

use tracing::warn;

/// Embedded fallback used when no rubric file is configured or readable.
pub const FALLBACK_RUBRIC: &str = "\
You are evaluating a candidate using the A-T-Q scoring model.

Stage 1: Resume Screening (0-100 score)
- A (Accomplishments) = 50%: comparable work, at comparable scale, with evidence of impact
- T (Trajectory) = 30%: growth pattern, progression velocity, intentional moves
- Q (Qualifications) = 20%: must-have and preferred requirements, including location
- Thresholds: 85+ = Advance to interview, 70-84 = Phone screen first, <70 = Decline
- Do NOT penalize gaps or job changes automatically; assess them in context.
- Location is a requirement (met/unmet), NOT a risk penalty.

Stage 2: Final Hiring Decision
- Score based on: Resume (25%) + Interview (50%) + References (25%)
- Interview performance is the most important factor
";

/// Loads the rubric text from `path`, or returns the embedded fallback when
/// the path is unset or unreadable.
pub fn load_rubric(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return FALLBACK_RUBRIC.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("rubric file {} unreadable ({e}); using embedded fallback", path.display());
            FALLBACK_RUBRIC.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_no_path_uses_fallback() {
        let text = load_rubric(None);
        assert!(text.contains("A-T-Q"));
        assert!(text.contains("85+"));
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let text = load_rubric(Some(Path::new("/nonexistent/rubric.md")));
        assert_eq!(text, FALLBACK_RUBRIC);
    }

    #[test]
    fn test_reads_configured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Custom rubric: hire everyone.").unwrap();
        let text = load_rubric(Some(file.path()));
        assert!(text.contains("hire everyone"));
    }
}
