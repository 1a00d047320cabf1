//! crates/mindgarden_core/src/validate.rs
//!
//! Field-level validation for signup payloads and journal drafts.
//!
//! Validators collect every violated rule instead of failing fast, so a 400
//! response can enumerate all problems with a payload at once.

use regex::Regex;

use crate::domain::JournalDraft;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const PASSWORD_MIN: usize = 8;
const TRIGGERS_MAX: usize = 1000;
const GRATITUDE_MAX: usize = 1000;
const REFLECTION_MAX: usize = 2000;
const COPING_ACTIVITIES_MAX: usize = 10;
const COPING_ACTIVITY_LEN_MAX: usize = 100;

const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

fn email_regex() -> Regex {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
}

/// Validates a signup payload, returning every violated rule.
///
/// An empty vector means the payload is acceptable. Uniqueness of the
/// username and email is a storage concern and is checked separately.
pub fn validate_signup(username: &str, email: &str, password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    let username = username.trim();
    if username.is_empty() {
        errors.push("Username is required.".to_string());
    } else {
        if username.len() < USERNAME_MIN || username.len() > USERNAME_MAX {
            errors.push(format!(
                "Username must be between {} and {} characters long.",
                USERNAME_MIN, USERNAME_MAX
            ));
        }
        let alphanumeric = username.chars().all(|c| c.is_ascii_alphanumeric());
        let has_letter = username.chars().any(|c| c.is_ascii_alphabetic());
        if !alphanumeric || !has_letter {
            errors.push(
                "Username must contain letters and can include numbers (alphanumeric)."
                    .to_string(),
            );
        }
    }

    let email = email.trim();
    if email.is_empty() {
        errors.push("Email is required.".to_string());
    } else if !email_regex().is_match(email) {
        errors.push("Invalid email format.".to_string());
    }

    errors.extend(validate_password(password));
    errors
}

/// Validates password strength: length, upper, lower, digit, symbol.
pub fn validate_password(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.trim().is_empty() {
        errors.push("Password is required.".to_string());
        return errors;
    }
    if password.len() < PASSWORD_MIN {
        errors.push(format!(
            "Password must be at least {} characters long.",
            PASSWORD_MIN
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must include at least one uppercase letter.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must include at least one lowercase letter.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must include at least one number.".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        errors.push("Password must include at least one special character.".to_string());
    }
    errors
}

/// Validates a journal draft, returning every violated rule.
///
/// All fields are optional; each rule applies only when its field is present.
/// Vocabulary checks for mood and sleep quality happen while the draft is
/// built from the wire payload, so only ranges and lengths are verified here.
pub fn validate_journal(draft: &JournalDraft) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(level) = draft.stress_level {
        if !(1..=10).contains(&level) {
            errors.push("Stress level must be a number between 1 and 10.".to_string());
        }
    }
    if let Some(level) = draft.energy_level {
        if !(1..=10).contains(&level) {
            errors.push("Energy level must be a number between 1 and 10.".to_string());
        }
    }
    if let Some(triggers) = &draft.triggers {
        if triggers.len() > TRIGGERS_MAX {
            errors.push(format!(
                "Triggers text is too long (max {} characters).",
                TRIGGERS_MAX
            ));
        }
    }
    if let Some(gratitude) = &draft.gratitude {
        if gratitude.len() > GRATITUDE_MAX {
            errors.push(format!(
                "Gratitude text is too long (max {} characters).",
                GRATITUDE_MAX
            ));
        }
    }
    if let Some(reflection) = &draft.reflection {
        if reflection.len() > REFLECTION_MAX {
            errors.push(format!(
                "Reflection text is too long (max {} characters).",
                REFLECTION_MAX
            ));
        }
    }
    if draft.coping_activities.len() > COPING_ACTIVITIES_MAX {
        errors.push(format!(
            "Too many coping activities (max {}).",
            COPING_ACTIVITIES_MAX
        ));
    }
    if draft
        .coping_activities
        .iter()
        .any(|a| a.len() > COPING_ACTIVITY_LEN_MAX)
    {
        errors.push(format!(
            "Each coping activity must be at most {} characters.",
            COPING_ACTIVITY_LEN_MAX
        ));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mood;

    #[test]
    fn accepts_a_well_formed_signup() {
        assert!(validate_signup("alice", "alice@x.com", "Abcd123!").is_empty());
    }

    #[test]
    fn rejects_short_and_non_alphanumeric_usernames() {
        assert!(!validate_signup("al", "alice@x.com", "Abcd123!").is_empty());
        assert!(!validate_signup("al ice", "alice@x.com", "Abcd123!").is_empty());
        assert!(!validate_signup("12345", "alice@x.com", "Abcd123!").is_empty());
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["not-an-email", "a@b", "a b@c.com", ""] {
            assert!(
                !validate_signup("alice", email, "Abcd123!").is_empty(),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn weak_passwords_report_every_missing_rule() {
        // Lowercase-only and too short: length, upper, digit, symbol all fail.
        let errors = validate_password("abc");
        assert_eq!(errors.len(), 4);

        assert_eq!(validate_password("abcdefgh").len(), 3);
        assert_eq!(validate_password("Abcdefg1").len(), 1);
        assert!(validate_password("Abcdefg1!").is_empty());
    }

    #[test]
    fn empty_journal_draft_is_valid() {
        assert!(validate_journal(&JournalDraft::default()).is_empty());
    }

    #[test]
    fn out_of_range_levels_are_rejected() {
        let draft = JournalDraft {
            stress_level: Some(11),
            energy_level: Some(0),
            ..Default::default()
        };
        assert_eq!(validate_journal(&draft).len(), 2);
    }

    #[test]
    fn overlong_text_fields_are_rejected() {
        let draft = JournalDraft {
            mood: Some(Mood::Calm),
            triggers: Some("x".repeat(1001)),
            gratitude: Some("x".repeat(1001)),
            reflection: Some("x".repeat(2001)),
            ..Default::default()
        };
        assert_eq!(validate_journal(&draft).len(), 3);
    }

    #[test]
    fn coping_activities_caps_apply() {
        let draft = JournalDraft {
            coping_activities: vec!["walk".to_string(); 11],
            ..Default::default()
        };
        assert_eq!(validate_journal(&draft).len(), 1);

        let draft = JournalDraft {
            coping_activities: vec!["x".repeat(101)],
            ..Default::default()
        };
        assert_eq!(validate_journal(&draft).len(), 1);
    }
}
