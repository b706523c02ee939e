//! Prompt construction for repository reviews

use gradr_core::ReviewRequestContext;

/// Fixed system turn establishing the reviewer persona
pub const SYSTEM_PROMPT: &str = "You are a code review assistant.";

/// Build the user turn for a review
///
/// The reply is requested as a bare JSON object with exactly the keys
/// `downsides`, `suggestions`, `rating` and `conclusion`.
pub fn build_prompt(context: &ReviewRequestContext) -> String {
    format!(
        r#"You are a picky and experienced code review assistant.

The following is a summary of the repository contents:
{summary}

Assignment Description: {assignment}
Candidate Level: {level}

Please analyze the repository and respond ONLY with a valid JSON object in the following format:
{{
    "downsides": ["list of all potential issues and downsides in the code or project structure."],
    "suggestions": ["list of all suggestions for improvement (specific actions to address the downsides)."],
    "rating": "An overall rating for the repository on a scale of 1 to 10.",
    "conclusion": "string conclusion summarizing repository quality"
}}

Do not include any additional text outside of the JSON object.
"#,
        summary = context.file_summary(),
        assignment = context.assignment_description(),
        level = context.candidate_level(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradr_core::FileEntry;

    #[test]
    fn test_prompt_embeds_inputs_verbatim() {
        let context = ReviewRequestContext::new(
            "Implement a {weird} CLI",
            "Middle",
            vec![
                FileEntry::new("Cargo.toml", "Cargo.toml"),
                FileEntry::new("main.rs", "src/main.rs"),
            ],
        );

        let prompt = build_prompt(&context);

        assert!(prompt.contains("Cargo.toml: Cargo.toml\nmain.rs: src/main.rs\n"));
        assert!(prompt.contains("Assignment Description: Implement a {weird} CLI\n"));
        assert!(prompt.contains("Candidate Level: Middle\n"));
    }

    #[test]
    fn test_prompt_demands_four_key_object() {
        let prompt = build_prompt(&ReviewRequestContext::new("a", "Junior", Vec::new()));

        for key in ["\"downsides\"", "\"suggestions\"", "\"rating\"", "\"conclusion\""] {
            assert!(prompt.contains(key), "missing {}", key);
        }
        assert!(!prompt.contains("\"conclusions\""));
        assert!(prompt.contains("respond ONLY with a valid JSON object"));
        assert!(prompt.contains("Do not include any additional text outside of the JSON object."));
    }
}
