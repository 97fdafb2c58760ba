use chrono::Utc;
use engineer_registration::workflows::registration::{
    Locale, RegistrationAck, RegistrationFailure, RegistrationRecord, RegistrationService,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::info;

/// In-process stand-in for the registration backend: records and logs each hand-off.
#[derive(Default)]
pub(crate) struct LoggingRegistrationService {
    sequence: AtomicU64,
    records: Mutex<Vec<RegistrationRecord>>,
}

impl RegistrationService for LoggingRegistrationService {
    fn submit(&self, record: &RegistrationRecord) -> Result<RegistrationAck, RegistrationFailure> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let reference = format!("reg-{id:06}");

        info!(
            %reference,
            cv_attached = record.cv_file.is_some(),
            "registration received"
        );

        self.records
            .lock()
            .map_err(|_| RegistrationFailure::Unavailable("record store poisoned".to_string()))?
            .push(record.clone());

        Ok(RegistrationAck {
            reference,
            received_at: Utc::now(),
        })
    }
}

impl LoggingRegistrationService {
    #[cfg(test)]
    pub(crate) fn records(&self) -> Vec<RegistrationRecord> {
        self.records.lock().expect("record mutex poisoned").clone()
    }
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    raw.parse::<Locale>()
        .map_err(|err| format!("{err}; expected 'ar' or 'en'"))
}
