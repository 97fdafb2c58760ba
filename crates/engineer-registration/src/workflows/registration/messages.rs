use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{ErrorSet, ValidationErrorKind};

/// Languages with bundled error messages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub const fn code(self) -> &'static str {
        match self {
            Locale::Arabic => "ar",
            Locale::English => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}'")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    /// Accepts a bare language code or a region-qualified tag such as `en-GB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let language = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();

        match language {
            "ar" => Ok(Locale::Arabic),
            "en" => Ok(Locale::English),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}

/// User-facing message slots. `requiredTrue` shares the required message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKey {
    Required,
    InvalidEmail,
    InvalidPattern,
    TooShort,
    PasswordMismatch,
}

impl From<ValidationErrorKind> for MessageKey {
    fn from(kind: ValidationErrorKind) -> Self {
        match kind {
            ValidationErrorKind::Required | ValidationErrorKind::RequiredTrue => {
                MessageKey::Required
            }
            ValidationErrorKind::Email => MessageKey::InvalidEmail,
            ValidationErrorKind::Pattern => MessageKey::InvalidPattern,
            ValidationErrorKind::MinLength => MessageKey::TooShort,
            ValidationErrorKind::PasswordMismatch => MessageKey::PasswordMismatch,
        }
    }
}

/// Lookup table from (locale, message key) to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    fallback: Locale,
    entries: BTreeMap<(Locale, MessageKey), String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MessageCatalog {
    /// Catalog with no entries. Lookups that miss `locale` retry with `fallback`.
    pub fn empty(fallback: Locale) -> Self {
        Self {
            fallback,
            entries: BTreeMap::new(),
        }
    }

    /// Arabic and English messages, falling back to Arabic.
    pub fn builtin() -> Self {
        Self::empty(Locale::Arabic)
            .with_message(Locale::Arabic, MessageKey::Required, "هذا الحقل مطلوب")
            .with_message(
                Locale::Arabic,
                MessageKey::InvalidEmail,
                "البريد الإلكتروني غير صحيح",
            )
            .with_message(Locale::Arabic, MessageKey::InvalidPattern, "القيمة غير صحيحة")
            .with_message(Locale::Arabic, MessageKey::TooShort, "الطول غير كافٍ")
            .with_message(
                Locale::Arabic,
                MessageKey::PasswordMismatch,
                "كلمة المرور غير متطابقة",
            )
            .with_message(Locale::English, MessageKey::Required, "This field is required")
            .with_message(
                Locale::English,
                MessageKey::InvalidEmail,
                "Email address is invalid",
            )
            .with_message(Locale::English, MessageKey::InvalidPattern, "Value is invalid")
            .with_message(Locale::English, MessageKey::TooShort, "Value is too short")
            .with_message(
                Locale::English,
                MessageKey::PasswordMismatch,
                "Passwords do not match",
            )
    }

    pub fn with_message(
        mut self,
        locale: Locale,
        key: MessageKey,
        text: impl Into<String>,
    ) -> Self {
        self.entries.insert((locale, key), text.into());
        self
    }

    pub fn lookup(&self, locale: Locale, key: MessageKey) -> Option<&str> {
        self.entries
            .get(&(locale, key))
            .or_else(|| self.entries.get(&(self.fallback, key)))
            .map(String::as_str)
    }

    /// Message for the highest-priority error in `errors`, or an empty string.
    pub fn resolve(&self, errors: &ErrorSet, locale: Locale) -> String {
        errors
            .primary()
            .and_then(|kind| self.lookup(locale, MessageKey::from(kind)))
            .unwrap_or_default()
            .to_string()
    }
}
