use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{FieldName, RegistrationRecord};

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    SubmitAttempted,
    Accepted,
    Rejected,
}

impl SubmissionPhase {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::SubmitAttempted => "submit_attempted",
            SubmissionPhase::Accepted => "accepted",
            SubmissionPhase::Rejected => "rejected",
        }
    }
}

/// Backend boundary that receives valid registration records.
pub trait RegistrationService: Send + Sync {
    fn submit(&self, record: &RegistrationRecord) -> Result<RegistrationAck, RegistrationFailure>;
}

/// Acknowledgement returned by a registration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationAck {
    pub reference: String,
    pub received_at: DateTime<Utc>,
}

/// Reason a registration service refused or could not take a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationFailure {
    #[error("registration refused: {0}")]
    Refused(String),
    #[error("registration service unavailable: {0}")]
    Unavailable(String),
}

/// Error returned from a submit action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("form has invalid fields: {}", field_list(.fields))]
    Invalid { fields: Vec<FieldName> },
    #[error(transparent)]
    Service(#[from] RegistrationFailure),
}

impl SubmissionError {
    pub fn invalid_fields(&self) -> &[FieldName] {
        match self {
            SubmissionError::Invalid { fields } => fields,
            SubmissionError::Service(_) => &[],
        }
    }
}

fn field_list(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}
