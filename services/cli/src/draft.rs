use crate::demo::print_visible_errors;
use crate::infra::LoggingRegistrationService;
use chrono::{DateTime, Utc};
use clap::Args;
use engineer_registration::config::RegistrationConfig;
use engineer_registration::error::AppError;
use engineer_registration::workflows::registration::{
    FieldValue, FileReference, FileSelection, FormError, RegistrationComponent,
    RegistrationService,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// JSON object mapping field keys (e.g. "engineerName") to values
    #[arg(long)]
    pub(crate) draft: PathBuf,
    /// CV file to attach; only its name, size, and type are captured
    #[arg(long)]
    pub(crate) cv: Option<PathBuf>,
    /// Print the form view as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

/// Field values as typed into the form, keyed by field key.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub(crate) struct Draft {
    pub(crate) values: BTreeMap<String, FieldValue>,
}

pub(crate) fn load_draft(path: &Path) -> Result<Draft, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Enter every draft value and leave the field, as a user filling the form would.
pub(crate) fn apply_draft<S>(
    component: &mut RegistrationComponent<S>,
    draft: &Draft,
) -> Result<(), FormError>
where
    S: RegistrationService,
{
    for (key, value) in &draft.values {
        component.on_input(key, value.clone())?;
        component.on_blur(key);
    }
    Ok(())
}

/// Capture a file's metadata without opening it.
pub(crate) fn file_reference(path: &Path) -> Result<FileReference, std::io::Error> {
    let metadata = fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut file = FileReference::new(name, metadata.len());
    if let Some(mime) = mime_guess::from_path(path).first() {
        file = file.with_media_type(mime.essence_str());
    }
    if let Ok(modified) = metadata.modified() {
        file = file.with_last_modified(DateTime::<Utc>::from(modified));
    }
    Ok(file)
}

pub(crate) fn run_submit(args: SubmitArgs, config: &RegistrationConfig) -> Result<(), AppError> {
    let SubmitArgs { draft, cv, json } = args;

    let service = Arc::new(LoggingRegistrationService::default());
    let mut component = RegistrationComponent::new(service, config)?;

    let draft = load_draft(&draft)?;
    apply_draft(&mut component, &draft)?;

    if let Some(path) = cv {
        let file = file_reference(&path)?;
        component.on_file_change(&FileSelection::single(file));
    }

    let outcome = component.on_submit();
    let view = component.view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        match &outcome {
            Ok(ack) => println!(
                "Registration accepted: reference {} at {}",
                ack.reference, ack.received_at
            ),
            Err(_) => {
                println!("Registration rejected");
                print_visible_errors(&view);
            }
        }
    }

    outcome.map(|_| ()).map_err(AppError::from)
}
