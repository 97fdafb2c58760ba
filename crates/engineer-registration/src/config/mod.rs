use std::env;
use std::fmt;

use crate::workflows::registration::{Locale, UnsupportedLocale};

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub registration: RegistrationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = read_flag("APP_LOG_ANSI", false)?;

        let locale = match env::var("APP_LOCALE") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .parse::<Locale>()
                .map_err(|source| ConfigError::InvalidLocale { source })?,
            _ => Locale::default(),
        };
        let require_cv_file = read_flag("APP_REQUIRE_CV", false)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level, ansi },
            registration: RegistrationConfig {
                locale,
                require_cv_file,
            },
        })
    }
}

fn read_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value: raw }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Form behavior: message locale and whether a CV attachment is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub locale: Locale,
    pub require_cv_file: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLocale { source: UnsupportedLocale },
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLocale { source } => {
                write!(f, "APP_LOCALE must be one of 'ar' or 'en' ({source})")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidLocale { source } => Some(source),
            ConfigError::InvalidFlag { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LOG_ANSI");
        env::remove_var("APP_LOCALE");
        env::remove_var("APP_REQUIRE_CV");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.ansi);
        assert_eq!(config.registration.locale, Locale::Arabic);
        assert!(!config.registration.require_cv_file);
    }

    #[test]
    fn reads_locale_and_cv_requirement() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("APP_LOCALE", "en-GB");
        env::set_var("APP_REQUIRE_CV", "yes");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.registration.locale, Locale::English);
        assert!(config.registration.require_cv_file);
        reset_env();
    }

    #[test]
    fn rejects_unknown_locale() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOCALE", "fr");
        let err = AppConfig::load().expect_err("french is not bundled");
        assert!(matches!(err, ConfigError::InvalidLocale { .. }));
        reset_env();
    }

    #[test]
    fn blank_locale_falls_back_to_default() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOCALE", "  ");
        env::set_var("APP_REQUIRE_CV", "");
        let config = AppConfig::load().expect("blank values use defaults");
        assert_eq!(config.registration.locale, Locale::default());
        assert!(!config.registration.require_cv_file);
        reset_env();
    }

    #[test]
    fn rejects_malformed_flag() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_REQUIRE_CV", "sometimes");
        match AppConfig::load() {
            Err(ConfigError::InvalidFlag { name, value }) => {
                assert_eq!(name, "APP_REQUIRE_CV");
                assert_eq!(value, "sometimes");
            }
            other => panic!("expected flag error, got {other:?}"),
        }
        reset_env();
    }
}
