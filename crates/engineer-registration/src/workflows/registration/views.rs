use serde::Serialize;

use super::domain::FieldValue;
use super::validation::ErrorSet;

/// Per-field state exposed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub key: &'static str,
    /// `None` for secret fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    pub touched: bool,
    pub dirty: bool,
    pub invalid: bool,
    /// Active failure kinds, listed only while the error is visible.
    #[serde(skip_serializing_if = "ErrorSet::is_empty")]
    pub errors: ErrorSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Snapshot of the whole form for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub phase: &'static str,
    pub locale: &'static str,
    pub submit_attempted: bool,
    pub valid: bool,
    pub fields: Vec<FieldView>,
}

impl FormView {
    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Fields whose error is currently visible.
    pub fn visible_errors(&self) -> impl Iterator<Item = &FieldView> {
        self.fields.iter().filter(|field| field.invalid)
    }
}
