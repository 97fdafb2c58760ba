use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use super::domain::{FieldName, FieldValue};
use crate::config::RegistrationConfig;

/// Accepts an empty string or ASCII digits only.
pub const DIGITS_ONLY: &str = "^[0-9]*$";
pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Regular expression that must match the whole value.
#[derive(Debug, Clone)]
pub struct PatternRule {
    source: String,
    regex: Regex,
}

impl PatternRule {
    /// Compile `pattern` wrapped in a group anchored on both ends. Inner anchors are
    /// kept, so alternations such as `^ab|cd$` still need the whole value to match.
    pub fn new(pattern: &str) -> Result<Self, SchemaError> {
        let anchored = format!("^(?:{pattern})$");

        let regex = Regex::new(&anchored).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// One per-field validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    RequiredTrue,
    Email,
    MinLength(usize),
    Pattern(PatternRule),
}

impl Rule {
    pub fn pattern(pattern: &str) -> Result<Self, SchemaError> {
        PatternRule::new(pattern).map(Rule::Pattern)
    }

    pub fn digits_only() -> Result<Self, SchemaError> {
        Self::pattern(DIGITS_ONLY)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("required"),
            Rule::RequiredTrue => f.write_str("requiredTrue"),
            Rule::Email => f.write_str("email"),
            Rule::MinLength(min) => write!(f, "minLength({min})"),
            Rule::Pattern(pattern) => write!(f, "pattern({})", pattern.source()),
        }
    }
}

/// Initial value and ordered rules for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: FieldName,
    pub initial: FieldValue,
    pub rules: Vec<Rule>,
}

impl FieldDefinition {
    fn new(name: FieldName, rules: Vec<Rule>) -> Self {
        Self {
            name,
            initial: FieldValue::initial(name.kind()),
            rules,
        }
    }
}

/// Field definitions for every [`FieldName`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationSchema {
    fields: BTreeMap<FieldName, FieldDefinition>,
}

impl RegistrationSchema {
    /// The engineer profile form: every text field required, numeric fields digits-only,
    /// email shaped, password of at least eight characters, terms accepted.
    pub fn engineer_profile() -> Result<Self, SchemaError> {
        use FieldName::*;

        let definitions = [
            FieldDefinition::new(EngineerName, vec![Rule::Required]),
            FieldDefinition::new(Qualification, vec![Rule::Required]),
            FieldDefinition::new(JobTitle, vec![Rule::Required]),
            FieldDefinition::new(YearsOfExperience, vec![Rule::Required, Rule::digits_only()?]),
            FieldDefinition::new(ContractNumber, vec![Rule::Required]),
            FieldDefinition::new(VisualId, vec![Rule::Required]),
            FieldDefinition::new(CvFile, Vec::new()),
            FieldDefinition::new(Nationality, vec![Rule::Required]),
            FieldDefinition::new(PhoneNumber, vec![Rule::Required, Rule::digits_only()?]),
            FieldDefinition::new(Email, vec![Rule::Required, Rule::Email]),
            FieldDefinition::new(
                Password,
                vec![Rule::Required, Rule::MinLength(PASSWORD_MIN_LENGTH)],
            ),
            FieldDefinition::new(ConfirmPassword, vec![Rule::Required]),
            FieldDefinition::new(TermsAccepted, vec![Rule::RequiredTrue]),
        ];

        Ok(Self {
            fields: definitions
                .into_iter()
                .map(|definition| (definition.name, definition))
                .collect(),
        })
    }

    pub fn from_config(config: &RegistrationConfig) -> Result<Self, SchemaError> {
        let schema = Self::engineer_profile()?;
        Ok(if config.require_cv_file {
            schema.with_rule(FieldName::CvFile, Rule::Required)
        } else {
            schema
        })
    }

    /// Append a rule to a field, keeping any existing rules.
    pub fn with_rule(mut self, field: FieldName, rule: Rule) -> Self {
        if let Some(definition) = self.fields.get_mut(&field) {
            if !definition.rules.contains(&rule) {
                definition.rules.push(rule);
            }
        }
        self
    }

    pub fn definition(&self, field: FieldName) -> Option<&FieldDefinition> {
        self.fields.get(&field)
    }

    /// Definitions in display order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }
}
