mod cross_field;
mod rules;

pub(crate) use cross_field::apply_password_match;
pub(crate) use rules::validate_field;

use std::collections::BTreeSet;

use serde::Serialize;

/// Reasons a field can fail validation.
///
/// Declaration order is message priority: when a field carries several kinds, the first
/// one in this order decides which message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Required,
    RequiredTrue,
    Email,
    Pattern,
    MinLength,
    PasswordMismatch,
}

/// Active failure kinds of one field. Rules add and remove only their own kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorSet(BTreeSet<ValidationErrorKind>);

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ValidationErrorKind) -> bool {
        self.0.insert(kind)
    }

    pub fn remove(&mut self, kind: ValidationErrorKind) -> bool {
        self.0.remove(&kind)
    }

    pub fn contains(&self, kind: ValidationErrorKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ValidationErrorKind> + '_ {
        self.0.iter().copied()
    }

    /// Highest-priority failure, if any.
    pub fn primary(&self) -> Option<ValidationErrorKind> {
        self.0.first().copied()
    }
}

impl FromIterator<ValidationErrorKind> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = ValidationErrorKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
