//! Engineer registration form: schema, live validation, error visibility, and submission.
//!
//! [`RegistrationForm`] is the explicit form-state record (value, error set, touched and
//! dirty flags per field). [`RegistrationComponent`] wraps it with a message catalog, a
//! submission phase, and the [`RegistrationService`] that receives valid records.

pub mod component;
pub mod domain;
pub mod form;
pub mod messages;
pub mod schema;
pub mod submission;
pub(crate) mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use component::RegistrationComponent;
pub use domain::{
    FieldName, FieldValue, FileReference, FileSelection, RegistrationRecord, UnknownField,
    ValueKind,
};
pub use form::{FieldState, FormError, RegistrationForm};
pub use messages::{Locale, MessageCatalog, MessageKey, UnsupportedLocale};
pub use schema::{FieldDefinition, PatternRule, RegistrationSchema, Rule, SchemaError};
pub use submission::{
    RegistrationAck, RegistrationFailure, RegistrationService, SubmissionError, SubmissionPhase,
};
pub use validation::{ErrorSet, ValidationErrorKind};
pub use views::{FieldView, FormView};
