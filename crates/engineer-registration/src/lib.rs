//! Engineer profile registration form.
//!
//! The form owns a field schema, recomputes validation on every mutation, tracks which
//! errors are visible to the user, and hands a finished record to a caller-supplied
//! [`RegistrationService`](workflows::registration::RegistrationService) on a valid submit.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
