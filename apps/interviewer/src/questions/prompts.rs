// Question generation prompt templates.

pub const QUESTION_PROMPT_TEMPLATE: &str = "Generate 3 to 5 highly relevant and concise technical interview questions for a candidate \
who is skilled in: {skills}. \
Format the output as a simple numbered list, with no introductory or concluding sentences, \
just the questions themselves. Ensure questions are diverse if multiple topics are provided.";

/// Generic questions used to pad a short batch. `{first_skill}` is filled
/// with the first skill the candidate listed.
pub const FALLBACK_QUESTION_TEMPLATES: [&str; 3] = [
    "Describe a challenging technical problem you've solved using one of your listed skills ({first_skill} perhaps?).",
    "How do you stay updated with the latest trends and technologies in your field?",
    "What's your approach to debugging complex issues?",
];

pub fn build_question_prompt(skills: &[String]) -> String {
    QUESTION_PROMPT_TEMPLATE.replace("{skills}", &skills.join(", "))
}

pub fn fallback_questions(first_skill: &str) -> Vec<String> {
    FALLBACK_QUESTION_TEMPLATES
        .iter()
        .map(|t| t.replace("{first_skill}", first_skill))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_skills_in_order() {
        let prompt = build_question_prompt(&["Python".to_string(), "React".to_string()]);
        assert!(prompt.contains("skilled in: Python, React."));
        assert!(prompt.contains("3 to 5"));
        assert!(!prompt.contains("{skills}"));
    }

    #[test]
    fn test_fallbacks_mention_first_skill() {
        let pool = fallback_questions("Rust");
        assert_eq!(pool.len(), 3);
        assert!(pool[0].contains("(Rust perhaps?)"));
    }
}
