//! Projects the model's free-text answer onto the three display sections.
//!
//! The model is asked for a numbered list, so the answer is cut on the
//! literal markers "2." and "3.". Nothing stops the model from ignoring the
//! format (or from writing "2.5 years"), so the cut is best effort and falls
//! back to placeholders when a marker is missing.

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const PROS_PLACEHOLDER: &str = "Could not parse pros";
pub const CONS_PLACEHOLDER: &str = "Could not parse cons";
pub const ATS_PLACEHOLDER: &str = "N/A";

/// The three sections shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeedback {
    pub pros: String,
    pub cons: String,
    pub ats_score: String,
    /// Numeric score found in `ats_score`, if any.
    pub ats_score_value: Option<u8>,
    /// False when the placeholders were used.
    pub parsed: bool,
}

impl ResumeFeedback {
    pub fn unparsed() -> Self {
        ResumeFeedback {
            pros: PROS_PLACEHOLDER.to_string(),
            cons: CONS_PLACEHOLDER.to_string(),
            ats_score: ATS_PLACEHOLDER.to_string(),
            ats_score_value: None,
            parsed: false,
        }
    }
}

/// Splits a model answer into pros, cons and ATS score.
///
/// - pros: everything before the first "2.", with every "1." removed
/// - cons: between the first and second "2.", cut at the first "3."
/// - ats_score: between the first and second "3."
pub fn split_sections(response: &str) -> ResumeFeedback {
    match try_split(response) {
        Some((pros, cons, ats_score)) => ResumeFeedback {
            ats_score_value: extract_score(&ats_score),
            pros,
            cons,
            ats_score,
            parsed: true,
        },
        None => {
            warn!(
                "Model response did not follow the numbered format ({} chars)",
                response.len()
            );
            ResumeFeedback::unparsed()
        }
    }
}

fn try_split(response: &str) -> Option<(String, String, String)> {
    let mut by_two = response.split("2.");
    let before_two = by_two.next()?;
    let after_two = by_two.next()?;
    let ats = response.split("3.").nth(1)?;

    let pros = before_two.replace("1.", "").trim().to_string();
    let cons = after_two.split("3.").next().unwrap_or("").trim().to_string();
    Some((pros, cons, ats.trim().to_string()))
}

/// Finds the score in an ATS section such as "Score: 78/100" or
/// "**72 out of 100**".
///
/// A number written as "N/100" or "N out of 100" wins. Otherwise the first
/// standalone integer in 0..=100 is used, skipping the "100" of "out of 100"
/// and decimal fractions.
pub fn extract_score(segment: &str) -> Option<u8> {
    let numbers = integer_tokens(segment);

    let explicit = numbers.iter().find(|(start, end, _)| {
        let after = segment[*end..].trim_start().to_ascii_lowercase();
        !is_denominator(&segment[..*start])
            && (after.starts_with('/') || after.starts_with("out of"))
    });
    if let Some((_, _, value)) = explicit {
        return u8::try_from(*value).ok().filter(|v| *v <= 100);
    }

    numbers
        .iter()
        .filter(|(start, _, _)| !is_denominator(&segment[..*start]))
        .filter(|(start, _, _)| !segment[..*start].ends_with('.'))
        .find(|(_, _, value)| *value <= 100)
        .and_then(|(_, _, value)| u8::try_from(*value).ok())
}

fn is_denominator(before: &str) -> bool {
    let before = before.trim_end().to_ascii_lowercase();
    before.ends_with('/') || before.ends_with("out of")
}

/// Byte ranges and values of the runs of ASCII digits in `text`.
fn integer_tokens(text: &str) -> Vec<(usize, usize, u32)> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if let Ok(value) = text[start..i].parse::<u32>() {
                tokens.push((start, i, value));
            }
        } else {
            i += 1;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "1. Pros: clear structure, strong Rust experience.\n\n\
        2. Cons: no metrics on impact.\n\n\
        3. ATS Score: 78/100";

    #[test]
    fn test_well_formed_response_splits_into_three() {
        let feedback = split_sections(WELL_FORMED);
        assert!(feedback.parsed);
        assert_eq!(feedback.pros, "Pros: clear structure, strong Rust experience.");
        assert_eq!(feedback.cons, "Cons: no metrics on impact.");
        assert_eq!(feedback.ats_score, "ATS Score: 78/100");
        assert_eq!(feedback.ats_score_value, Some(78));
    }

    #[test]
    fn test_missing_markers_use_placeholders() {
        let feedback = split_sections("This resume looks fine overall.");
        assert_eq!(feedback, ResumeFeedback::unparsed());
        assert_eq!(feedback.ats_score, "N/A");
    }

    #[test]
    fn test_missing_third_marker_fails() {
        let feedback = split_sections("1. Good things 2. Bad things");
        assert!(!feedback.parsed);
        assert_eq!(feedback.pros, PROS_PLACEHOLDER);
        assert_eq!(feedback.cons, CONS_PLACEHOLDER);
    }

    #[test]
    fn test_every_one_marker_is_removed_from_pros() {
        let feedback = split_sections("1. Strong. Version 1.0 shipped 2. Weak 3. 60");
        assert_eq!(feedback.pros, "Strong. Version 0 shipped");
    }

    #[test]
    fn test_cons_stop_at_second_two_marker() {
        // "2." inside the cons section ends it early
        let feedback = split_sections("1. A 2. Has 2.5 years 3. Score 70");
        assert_eq!(feedback.cons, "Has");
        assert_eq!(feedback.ats_score, "Score 70");
    }

    #[test]
    fn test_ats_stops_at_second_three_marker() {
        let feedback = split_sections("1. A 2. B 3. Score is 73.5 out of 100");
        assert_eq!(feedback.ats_score, "Score is 7");
    }

    #[test]
    fn test_three_before_two_still_parses() {
        let feedback = split_sections("Intro 3. stray 1. A 2. B");
        assert!(feedback.parsed);
        assert_eq!(feedback.pros, "Intro 3. stray  A");
        assert_eq!(feedback.cons, "B");
        assert_eq!(feedback.ats_score, "stray 1. A 2. B");
    }

    #[test]
    fn test_extract_score_prefers_explicit_fraction() {
        assert_eq!(extract_score("ATS (Applicant Tracking System) Score: 82/100"), Some(82));
        assert_eq!(extract_score("Score out of 100: **65 out of 100**"), Some(65));
    }

    #[test]
    fn test_extract_score_skips_denominator() {
        assert_eq!(extract_score("ATS Score out of 100: 71"), Some(71));
    }

    #[test]
    fn test_extract_score_none_without_numbers() {
        assert_eq!(extract_score("Not enough information"), None);
        assert_eq!(extract_score("Score: 250"), None);
    }
}
