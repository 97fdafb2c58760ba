use crate::infra::LoggingRegistrationService;
use clap::Args;
use engineer_registration::config::RegistrationConfig;
use engineer_registration::error::AppError;
use engineer_registration::workflows::registration::{
    FieldName, FileReference, FileSelection, FormView, RegistrationComponent,
    RegistrationSchema, RegistrationService, SubmissionError,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the initial empty submit that shows every required-field message
    #[arg(long)]
    pub(crate) skip_rejection: bool,
    /// Print the final form view as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

const FLAWED_INPUTS: [(&str, &str); 4] = [
    ("yearsOfExperience", "7y"),
    ("email", "eng@site"),
    ("password", "short"),
    ("confirmPassword", "shorter"),
];

const PROFILE_INPUTS: [(&str, &str); 11] = [
    ("engineerName", "Rania Khalil"),
    ("qualification", "BSc Electrical Engineering"),
    ("jobTitle", "Power Systems Engineer"),
    ("yearsOfExperience", "9"),
    ("contractNumber", "PS-5521"),
    ("visualID", "VID-3090"),
    ("nationality", "Palestinian"),
    ("phoneNumber", "970599123456"),
    ("email", "rania.khalil@example.org"),
    ("password", "substation-9"),
    ("confirmPassword", "substation-9"),
];

pub(crate) fn run_demo(args: DemoArgs, config: &RegistrationConfig) -> Result<(), AppError> {
    let service = Arc::new(LoggingRegistrationService::default());
    let mut component = RegistrationComponent::new(service, config)?;

    println!(
        "Engineer registration demo (locale {}, cv {})",
        component.locale(),
        if config.require_cv_file {
            "required"
        } else {
            "optional"
        }
    );
    println!(
        "Phase: {} | fields: {} | visible errors: {}",
        component.phase().label(),
        FieldName::ALL.len(),
        component.view().visible_errors().count()
    );

    if !args.skip_rejection {
        println!("\nSubmitting the empty form");
        report_submit(&mut component);
    }

    println!("\nEntering flawed values");
    for (key, value) in FLAWED_INPUTS {
        component.on_input(key, value)?;
        component.on_blur(key);
        let message = component.error_message(key);
        println!("- {key} = {value:?}: {}", display_message(&message));
    }

    println!("\nCompleting the profile");
    for (key, value) in PROFILE_INPUTS {
        component.on_input(key, value)?;
        component.on_blur(key);
    }
    component.on_input("termsAccepted", true)?;
    let cv =
        FileReference::new("rania-khalil-cv.pdf", 214_332).with_media_type("application/pdf");
    if let Some(file) = component.on_file_change(&FileSelection::single(cv)) {
        println!("Attached CV: {} ({} bytes)", file.name, file.size_bytes);
    }

    println!("\nSubmitting the completed form");
    report_submit(&mut component);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&component.view())?);
    }

    Ok(())
}

fn report_submit<S>(component: &mut RegistrationComponent<S>)
where
    S: RegistrationService,
{
    match component.on_submit() {
        Ok(ack) => println!(
            "Phase: {} | reference {}",
            component.phase().label(),
            ack.reference
        ),
        Err(SubmissionError::Invalid { fields }) => {
            println!(
                "Phase: {} | {} invalid field(s)",
                component.phase().label(),
                fields.len()
            );
            print_visible_errors(&component.view());
        }
        Err(err) => println!("Phase: {} | {err}", component.phase().label()),
    }
}

pub(crate) fn print_visible_errors(view: &FormView) {
    for field in view.visible_errors() {
        let message = field.message.as_deref().unwrap_or_default();
        println!("- {}: {}", field.key, display_message(message));
    }
}

fn display_message(message: &str) -> &str {
    if message.is_empty() {
        "ok"
    } else {
        message
    }
}

pub(crate) fn print_schema(schema: &RegistrationSchema) {
    println!("Registration form fields");
    for definition in schema.fields() {
        let rules = if definition.rules.is_empty() {
            "no rules".to_string()
        } else {
            definition
                .rules
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "- {} ({}): {}",
            definition.name,
            definition.name.kind().label(),
            rules
        );
    }
}
