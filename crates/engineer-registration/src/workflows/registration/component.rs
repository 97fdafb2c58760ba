use std::sync::Arc;

use tracing::{error, info, warn};

use super::domain::{FieldName, FieldValue, FileReference, FileSelection};
use super::form::{FormError, RegistrationForm};
use super::messages::{Locale, MessageCatalog};
use super::schema::{RegistrationSchema, SchemaError};
use super::submission::{RegistrationAck, RegistrationService, SubmissionError, SubmissionPhase};
use super::validation::ErrorSet;
use super::views::{FieldView, FormView};
use crate::config::RegistrationConfig;

/// The registration form as seen by a presentation layer: input handlers, per-field
/// visibility and messages, and the submit action.
pub struct RegistrationComponent<S> {
    form: RegistrationForm,
    service: Arc<S>,
    catalog: MessageCatalog,
    locale: Locale,
    phase: SubmissionPhase,
}

impl<S> RegistrationComponent<S>
where
    S: RegistrationService,
{
    pub fn new(service: Arc<S>, config: &RegistrationConfig) -> Result<Self, SchemaError> {
        let schema = RegistrationSchema::from_config(config)?;
        Ok(Self::with_parts(
            RegistrationForm::new(schema),
            service,
            MessageCatalog::builtin(),
            config.locale,
        ))
    }

    pub fn with_parts(
        form: RegistrationForm,
        service: Arc<S>,
        catalog: MessageCatalog,
        locale: Locale,
    ) -> Self {
        Self {
            form,
            service,
            catalog,
            locale,
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Value change from the rendering layer, addressed by field key.
    pub fn on_input(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let field: FieldName = key.parse()?;
        self.form.set_value(field, value)
    }

    /// Focus left the field.
    pub fn on_blur(&mut self, key: &str) {
        if let Some(field) = FieldName::from_key(key) {
            self.form.mark_touched(field);
        }
    }

    pub fn on_file_change(&mut self, selection: &FileSelection) -> Option<&FileReference> {
        self.form.attach_file(selection)
    }

    /// `false` for unknown keys.
    pub fn is_field_invalid(&self, key: &str) -> bool {
        FieldName::from_key(key).is_some_and(|field| self.form.is_field_invalid(field))
    }

    /// Message for the field's highest-priority error; empty when valid or unknown.
    pub fn error_message(&self, key: &str) -> String {
        FieldName::from_key(key)
            .and_then(|field| self.form.errors(field))
            .map(|errors| self.catalog.resolve(errors, self.locale))
            .unwrap_or_default()
    }

    /// Mark every field touched and, if the form is valid, hand the record to the
    /// registration service exactly once.
    pub fn on_submit(&mut self) -> Result<RegistrationAck, SubmissionError> {
        self.phase = SubmissionPhase::SubmitAttempted;
        self.form.note_submit_attempt();

        if !self.form.is_valid() {
            self.phase = SubmissionPhase::Rejected;
            let fields = self.form.invalid_fields();
            let keys: Vec<&str> = fields.iter().map(|field| field.key()).collect();
            warn!(invalid_fields = ?keys, "registration form rejected");
            return Err(SubmissionError::Invalid { fields });
        }

        self.phase = SubmissionPhase::Accepted;
        let record = self.form.record();
        info!(
            fields = self.form.fields().count(),
            cv_attached = record.cv_file.is_some(),
            "registration form accepted"
        );

        match self.service.submit(&record) {
            Ok(ack) => {
                info!(reference = %ack.reference, "registration handed off");
                Ok(ack)
            }
            Err(failure) => {
                error!(%failure, "registration service failed");
                Err(SubmissionError::Service(failure))
            }
        }
    }

    pub fn view(&self) -> FormView {
        let fields = self
            .form
            .fields()
            .map(|(name, state)| {
                let invalid = self.form.is_field_invalid(name);
                FieldView {
                    key: name.key(),
                    value: (!name.is_secret()).then(|| state.value().clone()),
                    touched: state.touched(),
                    dirty: state.dirty(),
                    invalid,
                    errors: if invalid {
                        state.errors().clone()
                    } else {
                        ErrorSet::new()
                    },
                    message: invalid.then(|| self.catalog.resolve(state.errors(), self.locale)),
                }
            })
            .collect();

        FormView {
            phase: self.phase.label(),
            locale: self.locale.code(),
            submit_attempted: self.form.submit_attempted(),
            valid: self.form.is_valid(),
            fields,
        }
    }
}
