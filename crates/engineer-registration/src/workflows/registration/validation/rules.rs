use std::sync::OnceLock;

use regex::Regex;

use super::{ErrorSet, ValidationErrorKind};
use crate::workflows::registration::domain::FieldValue;
use crate::workflows::registration::schema::{FieldDefinition, Rule};

const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

// Local part of printable ASCII, domain of dot-separated labels with at least one dot.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Run every rule of `definition` against `value`.
pub(crate) fn validate_field(definition: &FieldDefinition, value: &FieldValue) -> ErrorSet {
    definition
        .rules
        .iter()
        .filter_map(|rule| check(rule, value))
        .collect()
}

fn check(rule: &Rule, value: &FieldValue) -> Option<ValidationErrorKind> {
    match rule {
        Rule::Required => value.is_empty().then_some(ValidationErrorKind::Required),
        Rule::RequiredTrue => {
            (value.as_flag() != Some(true)).then_some(ValidationErrorKind::RequiredTrue)
        }
        // Format rules leave empty values to `Required`.
        Rule::Email => non_empty_text(value)
            .filter(|text| !is_valid_email(text))
            .map(|_| ValidationErrorKind::Email),
        Rule::MinLength(min) => non_empty_text(value)
            .filter(|text| text.chars().count() < *min)
            .map(|_| ValidationErrorKind::MinLength),
        Rule::Pattern(pattern) => non_empty_text(value)
            .filter(|text| !pattern.is_match(text))
            .map(|_| ValidationErrorKind::Pattern),
    }
}

fn non_empty_text(value: &FieldValue) -> Option<&str> {
    value.as_text().filter(|text| !text.is_empty())
}

fn is_valid_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LENGTH {
        return false;
    }

    match value.split_once('@') {
        Some((local, _)) if local.len() > EMAIL_LOCAL_MAX_LENGTH => false,
        Some(_) => email_regex().is_match(value),
        None => false,
    }
}
