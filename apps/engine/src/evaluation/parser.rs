//! Free-text response parsing.
//!
//! Model replies are supposed to follow the micro-format emitted by
//! `evaluation::prompts`, but small local models drift: markers go missing,
//! scores arrive as "around 75/100", sections repeat. This parser never
//! fails. Every line is matched against a dispatch table of known prefixes;
//! anything unrecognized is interpreted in the context of the current
//! section, and every field that cannot be resolved degrades to a default.

use regex::Regex;

use crate::models::{Evaluation, MatchStatus, RequirementMatch};

/// Where the scanner currently is in the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Strengths,
    Observations,
    Questions,
    Reasoning,
    Accomplishments,
    Trajectory,
    Qualifications,
    MatchAnalysis,
}

/// Scalar integer fields settable from a marker line.
#[derive(Debug, Clone, Copy)]
enum ScalarField {
    Score,
    AScore,
    TScore,
    QScore,
}

/// Verbatim-text fields settable from a marker line.
#[derive(Debug, Clone, Copy)]
enum TextField {
    Recommendation,
    Confidence,
}

/// What a recognized line prefix does to the scanner state.
#[derive(Debug, Clone, Copy)]
enum LineRule {
    Scalar(ScalarField),
    Text(TextField),
    Enter(Section),
}

/// Prefix dispatch table. Markers are matched case-sensitively by literal
/// line prefix; longer markers come before their prefixes (A_SCORE before
/// SCORE would be wrong the other way around).
const LINE_RULES: &[(&str, LineRule)] = &[
    ("A_SCORE:", LineRule::Scalar(ScalarField::AScore)),
    ("T_SCORE:", LineRule::Scalar(ScalarField::TScore)),
    ("Q_SCORE:", LineRule::Scalar(ScalarField::QScore)),
    ("SCORE:", LineRule::Scalar(ScalarField::Score)),
    ("RECOMMENDATION:", LineRule::Text(TextField::Recommendation)),
    ("CONFIDENCE:", LineRule::Text(TextField::Confidence)),
    ("KEY_STRENGTHS:", LineRule::Enter(Section::Strengths)),
    ("OBSERVATIONS:", LineRule::Enter(Section::Observations)),
    ("KEY_CONCERNS:", LineRule::Enter(Section::Observations)),
    ("INTERVIEW_QUESTIONS:", LineRule::Enter(Section::Questions)),
    ("REASONING:", LineRule::Enter(Section::Reasoning)),
    ("ACCOMPLISHMENTS:", LineRule::Enter(Section::Accomplishments)),
    ("TRAJECTORY:", LineRule::Enter(Section::Trajectory)),
    ("QUALIFICATIONS:", LineRule::Enter(Section::Qualifications)),
    ("MATCH_ANALYSIS:", LineRule::Enter(Section::MatchAnalysis)),
    ("MATCH ANALYSIS:", LineRule::Enter(Section::MatchAnalysis)),
];

/// Named sub-component fields inside the ACCOMPLISHMENTS block, with their
/// weights in the a_score backfill.
const ACCOMPLISHMENT_PARTS: &[&str] = &["Comparable Work:", "Scale:", "Impact:"];
/// Named sub-component fields inside the TRAJECTORY block.
const TRAJECTORY_PARTS: &[&str] = &["Growth Pattern:", "Velocity:", "Intentionality:"];

const SUBCOMPONENT_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

#[derive(Debug, Default)]
struct ParseState {
    score: Option<u32>,
    a_score: Option<u32>,
    t_score: Option<u32>,
    q_score: Option<u32>,
    accomplishment_parts: [Option<u32>; 3],
    trajectory_parts: [Option<u32>; 3],
    recommendation: Option<String>,
    confidence: Option<String>,
    strengths: Vec<String>,
    observations: Vec<String>,
    questions: Vec<String>,
    reasoning: String,
    match_analysis: Vec<RequirementMatch>,
}

/// Parses a raw model reply into a fully-populated `Evaluation`.
///
/// Guaranteed total: for any input string this returns a structurally valid
/// record with every score in [0, 100]. A reply that yields no score at all
/// comes back as a neutral 50 with a placeholder reasoning note.
pub fn parse_evaluation(raw: &str) -> Evaluation {
    let mut state = ParseState::default();
    let mut section = Section::None;

    for raw_line in raw.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            if section == Section::Reasoning {
                flush_paragraph(&mut state.reasoning);
            }
            continue;
        }

        if let Some(rule) = match_rule(line) {
            let (prefix, rule) = rule;
            let rest = line[prefix.len()..].trim();
            match rule {
                LineRule::Scalar(field) => {
                    section = Section::None;
                    if let Some(value) = first_integer_clamped(rest) {
                        match field {
                            ScalarField::Score => state.score = Some(value),
                            ScalarField::AScore => state.a_score = Some(value),
                            ScalarField::TScore => state.t_score = Some(value),
                            ScalarField::QScore => state.q_score = Some(value),
                        }
                    }
                }
                LineRule::Text(field) => {
                    section = Section::None;
                    // Stored verbatim, no enum validation: the record keeps
                    // whatever the model phrased.
                    match field {
                        TextField::Recommendation => {
                            state.recommendation = Some(rest.to_string())
                        }
                        TextField::Confidence => state.confidence = Some(rest.to_string()),
                    }
                }
                LineRule::Enter(next) => section = next,
            }
            continue;
        }

        match section {
            Section::Strengths => {
                if let Some(item) = line.strip_prefix("- ") {
                    state.strengths.push(item.trim().to_string());
                }
            }
            Section::Observations => {
                if let Some(item) = line.strip_prefix("- ") {
                    state.observations.push(item.trim().to_string());
                }
            }
            Section::Questions => {
                if let Some(question) = strip_number_prefix(line) {
                    state.questions.push(question);
                }
            }
            Section::Reasoning => append_reasoning_line(&mut state.reasoning, line),
            Section::Accomplishments => {
                scan_subcomponent(line, ACCOMPLISHMENT_PARTS, &mut state.accomplishment_parts);
            }
            Section::Trajectory => {
                scan_subcomponent(line, TRAJECTORY_PARTS, &mut state.trajectory_parts);
            }
            Section::MatchAnalysis => {
                if let Some(content) = line.strip_prefix('-') {
                    if let Some(entry) = parse_match_line(content.trim()) {
                        state.match_analysis.push(entry);
                    }
                }
            }
            Section::Qualifications | Section::None => {}
        }
    }

    reconcile(state, raw)
}

/// Finds the first dispatch-table entry whose marker starts the line.
fn match_rule(line: &str) -> Option<(&'static str, LineRule)> {
    LINE_RULES
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix))
        .map(|(prefix, rule)| (*prefix, *rule))
}

/// Extracts the first integer substring and clamps it into [0, 100].
/// Returns `None` when the text holds no digits at all.
fn first_integer_clamped(text: &str) -> Option<u32> {
    let re = Regex::new(r"\d+").expect("valid regex");
    re.find(text)
        .map(|m| m.as_str().parse::<u64>().map_or(100, |n| n.min(100) as u32))
}

/// Strips a leading `N.` question number, tolerating an optional bullet.
fn strip_number_prefix(line: &str) -> Option<String> {
    let re = Regex::new(r"^\d+\.\s*(.*)$").expect("valid regex");
    re.captures(line).map(|caps| caps[1].trim().to_string())
}

/// Reads a `Name: 80`-style sub-component line, tolerating a leading bullet.
fn scan_subcomponent(line: &str, names: &[&str], values: &mut [Option<u32>; 3]) {
    let line = line.strip_prefix("- ").unwrap_or(line);
    for (slot, name) in names.iter().enumerate() {
        if let Some(rest) = line.strip_prefix(name) {
            if let Some(value) = first_integer_clamped(rest) {
                values[slot] = Some(value);
            }
            return;
        }
    }
}

/// Appends one reasoning line to the rolling buffer. Lines within a
/// paragraph are joined by a single space once trailing whitespace is
/// collapsed at the end of the scan.
fn append_reasoning_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty()
        && !buffer.ends_with('\n')
        && !buffer.ends_with(['.', '!', '?'])
    {
        buffer.push(' ');
    }
    buffer.push_str(line);
    buffer.push(' ');
}

/// Converts a blank line into exactly one paragraph break.
fn flush_paragraph(buffer: &mut String) {
    if buffer.is_empty() || buffer.ends_with("\n\n") {
        return;
    }
    while buffer.ends_with(' ') {
        buffer.pop();
    }
    buffer.push_str("\n\n");
}

/// Parses one `requirement: STATUS - evidence` match-analysis line.
///
/// A strict pass splits on a recognized status token; when none is present,
/// a loose pass splits on the first colon and infers the status from
/// keyword presence in the remainder.
fn parse_match_line(content: &str) -> Option<RequirementMatch> {
    let status_re = Regex::new(r"(?i):\s*(MET|NOT_MET|NOT MET|PARTIAL)\s*[-\x{2013}\x{2014}]?\s*")
        .expect("valid regex");

    if let Some(caps) = status_re.captures(content) {
        let whole = caps.get(0).expect("capture 0 always present");
        let token = caps[1].to_uppercase().replace(' ', "_");
        let status = match token.as_str() {
            "MET" => MatchStatus::Met,
            "NOT_MET" => MatchStatus::NotMet,
            "PARTIAL" => MatchStatus::Partial,
            _ => MatchStatus::Unknown,
        };
        return Some(RequirementMatch {
            requirement: content[..whole.start()].trim().to_string(),
            status,
            evidence: content[whole.end()..].trim().to_string(),
        });
    }

    // Loose fallback: "requirement: free-form verdict text".
    let (requirement, rest) = content.split_once(':')?;
    let rest = rest.trim();
    let rest_upper = rest.to_uppercase();
    let status = if rest_upper.contains("MET") && !rest_upper.contains("NOT") {
        MatchStatus::Met
    } else if rest_upper.contains("NOT") || rest_upper.contains("NO ") {
        MatchStatus::NotMet
    } else if rest_upper.contains("PARTIAL") {
        MatchStatus::Partial
    } else {
        MatchStatus::Unknown
    };

    Some(RequirementMatch {
        requirement: requirement.trim().to_string(),
        status,
        evidence: rest.to_string(),
    })
}

fn weighted_sum(parts: &[Option<u32>; 3]) -> Option<u32> {
    if parts.iter().all(Option::is_none) {
        return None;
    }
    let total: f64 = parts
        .iter()
        .zip(SUBCOMPONENT_WEIGHTS)
        .map(|(part, weight)| part.unwrap_or(0) as f64 * weight)
        .sum();
    Some(total.round() as u32)
}

/// Post-scan reconciliation: backfill aggregate scores that the reply
/// omitted, never overriding an explicit value.
fn reconcile(mut state: ParseState, raw: &str) -> Evaluation {
    if state.a_score.is_none() {
        state.a_score = weighted_sum(&state.accomplishment_parts);
    }
    if state.t_score.is_none() {
        state.t_score = weighted_sum(&state.trajectory_parts);
    }

    if state.score.is_none()
        && (state.a_score.is_some() || state.t_score.is_some() || state.q_score.is_some())
    {
        let a = state.a_score.unwrap_or(0) as f64;
        let t = state.t_score.unwrap_or(0) as f64;
        let q = state.q_score.unwrap_or(0) as f64;
        state.score = Some((a * 0.5 + t * 0.3 + q * 0.2).round() as u32);
    }

    // Last resort: any standalone 0-100 integer in the raw text.
    if state.score.is_none() {
        state.score = rescue_score(raw);
    }

    let mut reasoning = clean_reasoning(&state.reasoning);
    let score = match state.score {
        Some(score) => score,
        None => {
            if reasoning.is_empty() {
                reasoning = "Could not parse evaluation response".to_string();
            }
            50
        }
    };

    Evaluation {
        score,
        a_score: state.a_score.unwrap_or(0),
        t_score: state.t_score.unwrap_or(0),
        q_score: state.q_score.unwrap_or(0),
        recommendation: state.recommendation.unwrap_or_else(|| "DECLINE".to_string()),
        confidence: state.confidence,
        strengths: state.strengths,
        observations: state.observations,
        interview_questions: state.questions,
        reasoning,
        match_analysis: state.match_analysis,
    }
}

fn rescue_score(raw: &str) -> Option<u32> {
    let re = Regex::new(r"\b(\d{1,3})\b").expect("valid regex");
    re.captures_iter(raw)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .find(|n| *n <= 100)
}

/// Trims the buffer and collapses runs of spaces left by line joining.
fn clean_reasoning(buffer: &str) -> String {
    let re = Regex::new(r" {2,}").expect("valid regex");
    re.replace_all(buffer.trim(), " ").into_owned()
}
