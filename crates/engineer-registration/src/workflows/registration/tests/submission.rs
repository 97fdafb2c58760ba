use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use super::common::*;
use crate::workflows::registration::domain::{FieldName, FileSelection, RegistrationRecord};
use crate::workflows::registration::submission::{
    RegistrationFailure, SubmissionError, SubmissionPhase,
};
use crate::workflows::registration::validation::{ErrorSet, ValidationErrorKind};

#[test]
fn component_starts_idle() {
    let component = component(Arc::new(MemoryService::default()));
    assert_eq!(component.phase(), SubmissionPhase::Idle);
    assert!(!component.form().submit_attempted());
}

#[test]
fn empty_submit_is_rejected_and_reveals_everything() {
    let service = Arc::new(MemoryService::default());
    let mut component = component(service.clone());

    let err = component.on_submit().expect_err("empty form is invalid");

    assert_eq!(component.phase(), SubmissionPhase::Rejected);
    assert_eq!(err.invalid_fields(), ruled_fields().as_slice());
    for field in FieldName::ALL {
        let state = component.form().field(field).expect("field exists");
        assert!(state.touched(), "{field} not touched");
    }
    for field in ruled_fields() {
        assert!(component.is_field_invalid(field.key()), "{field} hidden");
    }
    assert!(!component.is_field_invalid("cvFile"));
    assert!(service.submissions().is_empty());
}

#[test]
fn valid_submit_hands_exact_record_once() {
    let service = Arc::new(MemoryService::default());
    let mut component = component(service.clone());
    fill_valid_component(&mut component);
    component.on_file_change(&FileSelection::single(cv()));

    let ack = component.on_submit().expect("valid form submits");

    assert_eq!(ack.reference, "reg-000001");
    assert_eq!(component.phase(), SubmissionPhase::Accepted);
    let submissions = service.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0],
        RegistrationRecord {
            engineer_name: "Layla Haddad".to_string(),
            qualification: "BSc Civil Engineering".to_string(),
            job_title: "Site Engineer".to_string(),
            years_of_experience: "7".to_string(),
            contract_number: "CN-2291".to_string(),
            visual_id: "VID-0042".to_string(),
            cv_file: Some(cv()),
            nationality: "Jordanian".to_string(),
            phone_number: "962791234567".to_string(),
            email: "layla.haddad@example.com".to_string(),
            password: "str0ngpass".to_string(),
            confirm_password: "str0ngpass".to_string(),
            terms_accepted: true,
        }
    );
}

#[test]
fn rejected_form_can_be_fixed_and_resubmitted() {
    let service = Arc::new(MemoryService::default());
    let mut component = component(service.clone());
    fill_valid_component(&mut component);
    component
        .on_input("confirmPassword", "str0ngpasz")
        .expect("text accepted");

    match component.on_submit() {
        Err(SubmissionError::Invalid { fields }) => {
            assert_eq!(fields, vec![FieldName::ConfirmPassword]);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(
        component.error_message("confirmPassword"),
        "كلمة المرور غير متطابقة"
    );

    component
        .on_input("confirmPassword", "str0ngpass")
        .expect("text accepted");
    assert!(!component.is_field_invalid("confirmPassword"));
    assert_eq!(component.phase(), SubmissionPhase::Rejected);

    component.on_submit().expect("fixed form submits");
    assert_eq!(component.phase(), SubmissionPhase::Accepted);
    assert_eq!(service.submissions().len(), 1);
}

#[test]
fn service_failure_is_reported_after_handoff() {
    let service = Arc::new(MemoryService::failing(RegistrationFailure::Unavailable(
        "registry offline".to_string(),
    )));
    let mut component = component(service.clone());
    fill_valid_component(&mut component);

    match component.on_submit() {
        Err(SubmissionError::Service(RegistrationFailure::Unavailable(reason))) => {
            assert_eq!(reason, "registry offline");
        }
        other => panic!("expected service failure, got {other:?}"),
    }
    assert_eq!(component.phase(), SubmissionPhase::Accepted);
    assert_eq!(service.submissions().len(), 1);
}

#[test]
fn view_hides_secrets_and_shows_visible_messages() {
    let service = Arc::new(MemoryService::default());
    let mut component = component(service);
    component.on_input("password", "short").expect("text accepted");
    component.on_input("engineerName", "Omar").expect("text accepted");

    let view = component.view();
    assert_eq!(view.phase, "idle");
    assert_eq!(view.locale, "ar");
    assert!(!view.valid);

    let password = view.field("password").expect("password listed");
    assert!(password.value.is_none());
    assert!(password.invalid);
    assert_eq!(password.message.as_deref(), Some("الطول غير كافٍ"));

    let name = view.field("engineerName").expect("name listed");
    assert!(!name.invalid);
    assert!(name.message.is_none());

    let qualification = view.field("qualification").expect("qualification listed");
    assert!(!qualification.invalid);
    assert!(qualification.errors.is_empty());
    assert_eq!(view.visible_errors().count(), 1);
}

#[test]
fn view_lists_visible_error_kinds() {
    let service = Arc::new(MemoryService::default());
    let mut component = component(service);
    component.on_input("password", "abc").expect("text accepted");
    component.on_input("confirmPassword", "abd").expect("text accepted");

    let view = component.view();
    let confirmation = view.field("confirmPassword").expect("confirmation listed");
    let expected: ErrorSet = [ValidationErrorKind::PasswordMismatch].into_iter().collect();
    assert_eq!(confirmation.errors, expected);

    let json = serde_json::to_value(&view).expect("view serializes");
    let password = json["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .find(|field| field["key"] == "password")
        .expect("password listed");
    assert_eq!(password["errors"], serde_json::json!(["minLength"]));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer poisoned")).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn accepted_submit_logs_counts_not_personal_data() {
    let service = Arc::new(MemoryService::default());
    let mut component = component(service);
    fill_valid_component(&mut component);

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        component.on_submit().expect("complete form");
    });

    let output = logs.contents();
    assert!(output.contains("registration form accepted"), "{output}");
    assert!(output.contains("fields=13"), "{output}");
    assert!(output.contains("reference="), "{output}");
    for value in ["Layla Haddad", "layla.haddad@example.com", "str0ngpass"] {
        assert!(!output.contains(value), "{value} leaked into {output}");
    }
}
