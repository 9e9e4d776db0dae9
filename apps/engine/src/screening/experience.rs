//! Years-of-experience extraction from free text.

use chrono::Datelike;
use regex::Regex;

use crate::models::Job;

/// Extracts a stated years-of-experience requirement from arbitrary text,
/// e.g. "5+ years experience", "minimum of 7 years", "at least 3 years".
pub fn years_stated(text: &str) -> Option<u32> {
    let patterns = [
        r"(?i)(\d+)\s*\+?\s*years?\s+(?:of\s+)?experience",
        r"(?i)minimum\s+of\s+(\d+)\s+years?",
        r"(?i)at\s+least\s+(\d+)\s+years?",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(caps) = re.captures(text) {
            if let Ok(years) = caps[1].parse::<u32>() {
                return Some(years);
            }
        }
    }

    None
}

/// Extracts the required years of experience from a job's requirement lines
/// and summary. Returns `None` when the job does not state one.
pub fn required_years(job: &Job) -> Option<u32> {
    let mut text = job.requirements.join(" ");
    text.push(' ');
    text.push_str(&job.summary);
    years_stated(&text)
}

/// Extracts a candidate's years of experience from resume text (expected
/// lowercased). Prefers an explicit "N years experience" statement; failing
/// that, sums the spans of all `YYYY-YYYY` / `YYYY-present` date ranges.
///
/// Overlapping ranges are summed without deduplication, so two concurrent
/// jobs both count in full. Flagged for product-owner confirmation; do not
/// change without sign-off.
pub fn candidate_years(resume_text: &str) -> Option<u32> {
    let explicit_patterns = [
        r"(\d+)\s*\+?\s*years?\s+(?:of\s+)?experience",
        r"(\d+)\s*\+?\s*years?\s+in\s+",
    ];

    for pattern in explicit_patterns {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(caps) = re.captures(resume_text) {
            if let Ok(years) = caps[1].parse::<u32>() {
                return Some(years);
            }
        }
    }

    // Fall back to employment date ranges like "2018-2023" or "2018-Present".
    let range_re = Regex::new(r"(?i)(\d{4})\s*[-\x{2013}]\s*(\d{4}|present)").expect("valid regex");
    let current_year = chrono::Utc::now().year();

    let mut total_years: i32 = 0;
    for caps in range_re.captures_iter(resume_text) {
        let start: i32 = match caps[1].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        let end: i32 = if caps[2].eq_ignore_ascii_case("present") {
            current_year
        } else {
            match caps[2].parse() {
                Ok(y) => y,
                Err(_) => continue,
            }
        };
        let years = end - start;
        if years > 0 && years < 50 {
            total_years += years;
        }
    }

    if total_years > 0 {
        Some(total_years as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_with_requirements(reqs: &[&str]) -> Job {
        Job {
            requirements: reqs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_years_plus_suffix() {
        let job = job_with_requirements(&["5+ years experience in accounting"]);
        assert_eq!(required_years(&job), Some(5));
    }

    #[test]
    fn test_required_years_minimum_of() {
        let job = job_with_requirements(&["Minimum of 7 years in a leadership role"]);
        assert_eq!(required_years(&job), Some(7));
    }

    #[test]
    fn test_required_years_at_least() {
        let job = job_with_requirements(&["At least 3 years managing teams"]);
        assert_eq!(required_years(&job), Some(3));
    }

    #[test]
    fn test_required_years_from_summary() {
        let job = Job {
            summary: "We need someone with 10 years of experience.".to_string(),
            ..Default::default()
        };
        assert_eq!(required_years(&job), Some(10));
    }

    #[test]
    fn test_required_years_absent() {
        let job = job_with_requirements(&["Python", "SQL"]);
        assert_eq!(required_years(&job), None);
    }

    #[test]
    fn test_candidate_years_explicit_statement() {
        assert_eq!(candidate_years("7 years experience as a developer"), Some(7));
        assert_eq!(candidate_years("12 years of experience"), Some(12));
        assert_eq!(candidate_years("8+ years in software"), Some(8));
    }

    #[test]
    fn test_candidate_years_from_date_ranges() {
        // 2015-2018 (3) + 2018-2023 (5) = 8
        let text = "acme corp 2015-2018 senior role 2018-2023";
        assert_eq!(candidate_years(text), Some(8));
    }

    #[test]
    fn test_candidate_years_present_range_uses_current_year() {
        let current = chrono::Utc::now().year();
        let text = "engineer 2020-present at widgets inc";
        assert_eq!(candidate_years(text), Some((current - 2020) as u32));
    }

    #[test]
    fn test_candidate_years_overlapping_ranges_double_count() {
        // Two concurrent 2018-2022 positions both count: 4 + 4 = 8.
        let text = "day job 2018-2022 consulting 2018-2022";
        assert_eq!(candidate_years(text), Some(8));
    }

    #[test]
    fn test_candidate_years_implausible_range_skipped() {
        // 1900-1999 spans 99 years, outside the (0, 50) sanity window.
        assert_eq!(candidate_years("archive 1900-1999"), None);
    }

    #[test]
    fn test_candidate_years_nothing_found() {
        assert_eq!(candidate_years("enthusiastic recent graduate"), None);
    }
}
