use crate::errors::AppError;
use crate::interview::models::Step;

const MIN_PHONE_LEN: usize = 8;

pub fn is_valid_name(input: &str) -> bool {
    input.trim().chars().count() > 1
}

pub fn is_valid_email(input: &str) -> bool {
    input.contains('@') && input.contains('.')
}

/// At least 8 characters as typed, and only digits once spaces and hyphens
/// are removed. A leading `+` is rejected, so international numbers fail.
pub fn is_valid_phone(input: &str) -> bool {
    let trimmed = input.trim();
    let digits: String = trimmed.chars().filter(|c| *c != ' ' && *c != '-').collect();
    trimmed.chars().count() >= MIN_PHONE_LEN && is_all_digits(&digits)
}

pub fn is_valid_experience(input: &str) -> bool {
    is_all_digits(input.trim())
}

/// Shared by position and location.
pub fn is_long_enough(input: &str) -> bool {
    input.trim().chars().count() > 2
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Checks `input` against the predicate of a profile step.
/// Returns the notice text to show on failure.
pub fn validate_field(step: Step, input: &str) -> Result<(), AppError> {
    let (valid, rejection) = match step {
        Step::AskName => (is_valid_name(input), "Please enter a valid full name. 🤔"),
        Step::AskEmail => (
            is_valid_email(input),
            "Please enter a valid email address. ❌",
        ),
        Step::AskPhone => (
            is_valid_phone(input),
            "Please enter a valid phone number (at least 8 digits, numbers only). 🔢",
        ),
        Step::AskExperience => (
            is_valid_experience(input),
            "Please enter a number for years of experience. 🧐",
        ),
        Step::AskPosition => (
            is_long_enough(input),
            "Please tell me about the positions you're interested in. 📝",
        ),
        Step::AskLocation => (is_long_enough(input), "Please provide your location. 🌎"),
        other => {
            return Err(AppError::UnexpectedAction {
                step: other,
                action: "input",
            })
        }
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(rejection.to_string()))
    }
}

/// Splits a comma-separated tech stack, trimming entries and dropping blanks.
/// Order is preserved and duplicates are kept.
pub fn split_tech_stack(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_needs_two_chars() {
        assert!(is_valid_name("  Jane Doe "));
        assert!(is_valid_name("Al"));
        assert!(!is_valid_name(" J "));
        assert!(!is_valid_name("   "));
    }

    #[test]
    fn test_name_counts_chars_not_bytes() {
        assert!(!is_valid_name("é"));
        assert!(is_valid_name("李雷"));
    }

    #[test]
    fn test_email_needs_at_and_dot() {
        assert!(is_valid_email("jane@example.com"));
        assert!(!is_valid_email("jane.example.com"));
        assert!(!is_valid_email("jane@localhost"));
    }

    #[test]
    fn test_phone_too_short() {
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("1234567"));
    }

    #[test]
    fn test_phone_with_formatting() {
        assert!(is_valid_phone("123-456-78"));
        assert!(is_valid_phone(" 98765 43210 "));
        assert!(is_valid_phone("12345678"));
    }

    #[test]
    fn test_phone_length_counts_formatting_characters() {
        // Only 7 digits, but 8 characters as typed.
        assert!(is_valid_phone("123-4567"));
    }

    #[test]
    fn test_phone_rejects_letters_and_parentheses() {
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone("(555) 123-4567"));
    }

    #[test]
    fn test_phone_rejects_international_plus_prefix() {
        // '+' is not stripped, so international numbers are currently rejected.
        assert!(!is_valid_phone("+44 20 7946 0958"));
        assert!(is_valid_phone("44 20 7946 0958"));
    }

    #[test]
    fn test_experience_digits_only() {
        assert!(is_valid_experience(" 5 "));
        assert!(is_valid_experience("12"));
        assert!(!is_valid_experience("5.5"));
        assert!(!is_valid_experience("five"));
        assert!(!is_valid_experience("-1"));
        assert!(!is_valid_experience(""));
    }

    #[test]
    fn test_position_and_location_need_three_chars() {
        assert!(is_long_enough("SRE"));
        assert!(!is_long_enough(" QA "));
    }

    #[test]
    fn test_validate_field_rejection_messages() {
        match validate_field(Step::AskEmail, "nope") {
            Err(AppError::Validation(msg)) => assert!(msg.contains("email")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(validate_field(Step::AskPhone, "123-456-78").is_ok());
    }

    #[test]
    fn test_validate_field_outside_profile_steps() {
        assert!(matches!(
            validate_field(Step::AskTechStack, "Rust"),
            Err(AppError::UnexpectedAction { .. })
        ));
    }

    #[test]
    fn test_split_tech_stack_drops_blanks_keeps_order() {
        assert_eq!(split_tech_stack("Python, React, "), vec!["Python", "React"]);
        assert_eq!(
            split_tech_stack(" Go ,, Rust,Go"),
            vec!["Go", "Rust", "Go"]
        );
        assert!(split_tech_stack(" , ,").is_empty());
    }
}
