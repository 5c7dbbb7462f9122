//! Prompt constants for resume analysis.
//! The numbered list is load-bearing: `sections::split_sections` splits the
//! answer on the "2." and "3." markers the model is asked to produce.

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are a career expert and AI assistant.

Analyze this resume and provide:
1. Pros of this resume
2. Cons of this resume
3. ATS (Applicant Tracking System) Score out of 100

Resume:
{resume_text}"#;

pub fn build_analysis_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_after_header() {
        let prompt = build_analysis_prompt("Jane Doe\nRust engineer");
        assert!(prompt.starts_with("You are a career expert and AI assistant."));
        assert!(prompt.ends_with("Resume:\nJane Doe\nRust engineer"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_prompt_asks_for_three_numbered_items() {
        for marker in ["1. Pros", "2. Cons", "3. ATS"] {
            assert!(ANALYSIS_PROMPT_TEMPLATE.contains(marker), "missing {marker}");
        }
    }
}
