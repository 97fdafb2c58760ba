use std::collections::BTreeMap;

use tracing::debug;

use super::domain::{
    FieldName, FieldValue, FileReference, FileSelection, RegistrationRecord, UnknownField,
    ValueKind,
};
use super::schema::{RegistrationSchema, SchemaError};
use super::validation::{apply_password_match, validate_field, ErrorSet};

/// Errors raised when input cannot be applied to the form at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error("field '{field}' holds a {} value, received {}", .expected.label(), .found.label())]
    KindMismatch {
        field: FieldName,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Live state of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    value: FieldValue,
    errors: ErrorSet,
    touched: bool,
    dirty: bool,
}

impl FieldState {
    fn new(initial: FieldValue) -> Self {
        Self {
            value: initial,
            errors: ErrorSet::new(),
            touched: false,
            dirty: false,
        }
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }
}

/// Explicit form-state record: every field's value, error set, and interaction flags,
/// recomputed after each mutation.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    schema: RegistrationSchema,
    fields: BTreeMap<FieldName, FieldState>,
    submit_attempted: bool,
}

impl RegistrationForm {
    pub fn new(schema: RegistrationSchema) -> Self {
        let fields = schema
            .fields()
            .map(|definition| (definition.name, FieldState::new(definition.initial.clone())))
            .collect();

        let mut form = Self {
            schema,
            fields,
            submit_attempted: false,
        };
        form.revalidate();
        form
    }

    pub fn engineer_profile() -> Result<Self, SchemaError> {
        RegistrationSchema::engineer_profile().map(Self::new)
    }

    pub fn schema(&self) -> &RegistrationSchema {
        &self.schema
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldState> {
        self.fields.get(&name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (FieldName, &FieldState)> {
        self.fields.iter().map(|(name, state)| (*name, state))
    }

    pub fn value(&self, name: FieldName) -> Option<&FieldValue> {
        self.field(name).map(FieldState::value)
    }

    pub fn errors(&self, name: FieldName) -> Option<&ErrorSet> {
        self.field(name).map(FieldState::errors)
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Apply user input to a field. The field becomes dirty once its value differs from
    /// the initial value and stays dirty afterwards.
    pub fn set_value(
        &mut self,
        name: FieldName,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let value = value.into();
        let expected = name.kind();
        if value.kind() != expected {
            return Err(FormError::KindMismatch {
                field: name,
                expected,
                found: value.kind(),
            });
        }

        let initial_differs = self
            .schema
            .definition(name)
            .is_some_and(|definition| definition.initial != value);
        let state = self
            .fields
            .get_mut(&name)
            .ok_or_else(|| UnknownField(name.key().to_string()))?;
        state.dirty |= initial_differs;
        state.value = value;

        self.revalidate();
        Ok(())
    }

    /// Record that the user left a field.
    pub fn mark_touched(&mut self, name: FieldName) {
        if let Some(state) = self.fields.get_mut(&name) {
            state.touched = true;
        }
    }

    pub fn mark_all_touched(&mut self) {
        for state in self.fields.values_mut() {
            state.touched = true;
        }
    }

    /// Attach the first selected file as the CV. An empty selection leaves the form as is.
    pub fn attach_file(&mut self, selection: &FileSelection) -> Option<&FileReference> {
        let file = selection.first()?.clone();
        debug!(
            file = %file.name,
            size_bytes = file.size_bytes,
            "cv file attached"
        );

        let state = self.fields.get_mut(&FieldName::CvFile)?;
        state.value = FieldValue::File(Some(file));
        self.revalidate();

        self.value(FieldName::CvFile).and_then(FieldValue::as_file)
    }

    /// Flag a submit attempt and make every error visible.
    pub(crate) fn note_submit_attempt(&mut self) {
        self.submit_attempted = true;
        self.mark_all_touched();
        self.revalidate();
    }

    /// Recompute every field's errors, then the password confirmation rule.
    pub fn revalidate(&mut self) {
        for definition in self.schema.fields() {
            if let Some(state) = self.fields.get_mut(&definition.name) {
                state.errors = validate_field(definition, &state.value);
            }
        }

        let password = self.fields.get(&FieldName::Password).map(|s| s.value.clone());
        if let (Some(password), Some(confirmation)) =
            (password, self.fields.get_mut(&FieldName::ConfirmPassword))
        {
            apply_password_match(&password, &confirmation.value, &mut confirmation.errors);
        }
    }

    /// Every field valid, including the password confirmation.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(FieldState::is_valid)
    }

    pub fn invalid_fields(&self) -> Vec<FieldName> {
        self.fields
            .iter()
            .filter(|(_, state)| !state.is_valid())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Whether the field's error should be shown: invalid and dirty, touched, or after a
    /// submit attempt.
    pub fn is_field_invalid(&self, name: FieldName) -> bool {
        self.field(name).is_some_and(|state| {
            !state.is_valid() && (state.dirty || state.touched || self.submit_attempted)
        })
    }

    /// Snapshot the current values as a record.
    pub fn record(&self) -> RegistrationRecord {
        let text = |name: FieldName| {
            self.value(name)
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_string()
        };

        RegistrationRecord {
            engineer_name: text(FieldName::EngineerName),
            qualification: text(FieldName::Qualification),
            job_title: text(FieldName::JobTitle),
            years_of_experience: text(FieldName::YearsOfExperience),
            contract_number: text(FieldName::ContractNumber),
            visual_id: text(FieldName::VisualId),
            cv_file: self
                .value(FieldName::CvFile)
                .and_then(FieldValue::as_file)
                .cloned(),
            nationality: text(FieldName::Nationality),
            phone_number: text(FieldName::PhoneNumber),
            email: text(FieldName::Email),
            password: text(FieldName::Password),
            confirm_password: text(FieldName::ConfirmPassword),
            terms_accepted: self
                .value(FieldName::TermsAccepted)
                .and_then(FieldValue::as_flag)
                .unwrap_or(false),
        }
    }
}
