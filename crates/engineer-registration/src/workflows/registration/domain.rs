use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inputs collected by the registration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "engineerName")]
    EngineerName,
    #[serde(rename = "qualification")]
    Qualification,
    #[serde(rename = "jobTitle")]
    JobTitle,
    #[serde(rename = "yearsOfExperience")]
    YearsOfExperience,
    #[serde(rename = "contractNumber")]
    ContractNumber,
    #[serde(rename = "visualID")]
    VisualId,
    #[serde(rename = "cvFile")]
    CvFile,
    #[serde(rename = "nationality")]
    Nationality,
    #[serde(rename = "phoneNumber")]
    PhoneNumber,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "confirmPassword")]
    ConfirmPassword,
    #[serde(rename = "termsAccepted")]
    TermsAccepted,
}

impl FieldName {
    pub const ALL: [FieldName; 13] = [
        FieldName::EngineerName,
        FieldName::Qualification,
        FieldName::JobTitle,
        FieldName::YearsOfExperience,
        FieldName::ContractNumber,
        FieldName::VisualId,
        FieldName::CvFile,
        FieldName::Nationality,
        FieldName::PhoneNumber,
        FieldName::Email,
        FieldName::Password,
        FieldName::ConfirmPassword,
        FieldName::TermsAccepted,
    ];

    /// Key used by the rendering layer and in serialized records.
    pub const fn key(self) -> &'static str {
        match self {
            FieldName::EngineerName => "engineerName",
            FieldName::Qualification => "qualification",
            FieldName::JobTitle => "jobTitle",
            FieldName::YearsOfExperience => "yearsOfExperience",
            FieldName::ContractNumber => "contractNumber",
            FieldName::VisualId => "visualID",
            FieldName::CvFile => "cvFile",
            FieldName::Nationality => "nationality",
            FieldName::PhoneNumber => "phoneNumber",
            FieldName::Email => "email",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirmPassword",
            FieldName::TermsAccepted => "termsAccepted",
        }
    }

    pub const fn kind(self) -> ValueKind {
        match self {
            FieldName::CvFile => ValueKind::File,
            FieldName::TermsAccepted => ValueKind::Flag,
            _ => ValueKind::Text,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Secret fields never appear in logs or rendered views.
    pub const fn is_secret(self) -> bool {
        matches!(self, FieldName::Password | FieldName::ConfirmPassword)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown registration field '{0}'")]
pub struct UnknownField(pub String);

/// Shape of the value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Flag,
    File,
}

impl ValueKind {
    pub const fn label(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Flag => "flag",
            ValueKind::File => "file",
        }
    }
}

/// Current value of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    File(Option<FileReference>),
}

impl FieldValue {
    /// Value a field of the given kind starts with.
    pub fn initial(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Text => FieldValue::Text(String::new()),
            ValueKind::Flag => FieldValue::Flag(false),
            ValueKind::File => FieldValue::File(None),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Flag(_) => ValueKind::Flag,
            FieldValue::File(_) => ValueKind::File,
        }
    }

    /// Empty text, an unchecked flag, and a missing file all count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Flag(flag) => !flag,
            FieldValue::File(file) => file.is_none(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileReference> {
        match self {
            FieldValue::File(file) => file.as_ref(),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<FileReference> for FieldValue {
    fn from(value: FileReference) -> Self {
        FieldValue::File(Some(value))
    }
}

/// Metadata of a file picked by the user. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub name: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl FileReference {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: None,
            last_modified: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }
}

/// A file-picker change event carrying zero or more selected files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSelection {
    pub files: Vec<FileReference>,
}

impl FileSelection {
    pub fn single(file: FileReference) -> Self {
        Self { files: vec![file] }
    }

    pub fn first(&self) -> Option<&FileReference> {
        self.files.first()
    }
}

/// The record handed to the registration service once the form is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub engineer_name: String,
    pub qualification: String,
    pub job_title: String,
    pub years_of_experience: String,
    pub contract_number: String,
    #[serde(rename = "visualID")]
    pub visual_id: String,
    pub cv_file: Option<FileReference>,
    pub nationality: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}
