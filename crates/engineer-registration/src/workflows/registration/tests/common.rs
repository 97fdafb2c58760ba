use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::config::RegistrationConfig;
use crate::workflows::registration::domain::{FieldName, FileReference, RegistrationRecord};
use crate::workflows::registration::form::RegistrationForm;
use crate::workflows::registration::submission::{
    RegistrationAck, RegistrationFailure, RegistrationService,
};
use crate::workflows::registration::RegistrationComponent;

#[derive(Default)]
pub(super) struct MemoryService {
    submissions: Mutex<Vec<RegistrationRecord>>,
    sequence: AtomicU64,
    failure: Option<RegistrationFailure>,
}

impl MemoryService {
    pub(super) fn failing(failure: RegistrationFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub(super) fn submissions(&self) -> Vec<RegistrationRecord> {
        self.submissions
            .lock()
            .expect("service mutex poisoned")
            .clone()
    }
}

impl RegistrationService for MemoryService {
    fn submit(&self, record: &RegistrationRecord) -> Result<RegistrationAck, RegistrationFailure> {
        self.submissions
            .lock()
            .expect("service mutex poisoned")
            .push(record.clone());

        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(RegistrationAck {
            reference: format!("reg-{id:06}"),
            received_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
        })
    }
}

pub(super) fn form() -> RegistrationForm {
    RegistrationForm::engineer_profile().expect("schema builds")
}

pub(super) fn component(service: Arc<MemoryService>) -> RegistrationComponent<MemoryService> {
    RegistrationComponent::new(service, &RegistrationConfig::default()).expect("schema builds")
}

pub(super) fn cv() -> FileReference {
    FileReference::new("cv.pdf", 48_213).with_media_type("application/pdf")
}

/// Text inputs for a complete, valid profile.
pub(super) fn valid_inputs() -> Vec<(FieldName, &'static str)> {
    vec![
        (FieldName::EngineerName, "Layla Haddad"),
        (FieldName::Qualification, "BSc Civil Engineering"),
        (FieldName::JobTitle, "Site Engineer"),
        (FieldName::YearsOfExperience, "7"),
        (FieldName::ContractNumber, "CN-2291"),
        (FieldName::VisualId, "VID-0042"),
        (FieldName::Nationality, "Jordanian"),
        (FieldName::PhoneNumber, "962791234567"),
        (FieldName::Email, "layla.haddad@example.com"),
        (FieldName::Password, "str0ngpass"),
        (FieldName::ConfirmPassword, "str0ngpass"),
    ]
}

pub(super) fn fill_valid(form: &mut RegistrationForm) {
    for (field, value) in valid_inputs() {
        form.set_value(field, value).expect("text field accepts text");
    }
    form.set_value(FieldName::TermsAccepted, true)
        .expect("terms accepts flag");
}

pub(super) fn fill_valid_component(component: &mut RegistrationComponent<MemoryService>) {
    for (field, value) in valid_inputs() {
        component
            .on_input(field.key(), value)
            .expect("text field accepts text");
    }
    component
        .on_input("termsAccepted", true)
        .expect("terms accepts flag");
}

/// Fields that carry at least one rule in the default schema.
pub(super) fn ruled_fields() -> Vec<FieldName> {
    FieldName::ALL
        .into_iter()
        .filter(|field| *field != FieldName::CvFile)
        .collect()
}
