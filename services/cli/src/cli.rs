use crate::demo::{print_schema, run_demo, DemoArgs};
use crate::draft::{run_submit, SubmitArgs};
use crate::infra::parse_locale;
use clap::{Parser, Subcommand};
use engineer_registration::config::{AppConfig, RegistrationConfig};
use engineer_registration::error::AppError;
use engineer_registration::telemetry;
use engineer_registration::workflows::registration::{Locale, RegistrationSchema};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Engineer Registration",
    about = "Fill, validate, and submit engineer registration forms from the command line",
    version
)]
struct Cli {
    /// Message locale (ar or en). Overrides APP_LOCALE
    #[arg(long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,
    /// Require a CV attachment. Overrides APP_REQUIRE_CV
    #[arg(long, global = true, overrides_with = "no_require_cv")]
    require_cv: bool,
    /// Accept the form without a CV attachment. Overrides APP_REQUIRE_CV
    #[arg(long, global = true, overrides_with = "require_cv")]
    no_require_cv: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a JSON draft and submit it when every field passes
    Submit(SubmitArgs),
    /// Walk through a scripted registration session (default command)
    Demo(DemoArgs),
    /// List the form fields and their validation rules
    Schema,
}

impl Cli {
    /// Command-line flags win over values loaded from the environment.
    fn apply_overrides(&self, config: &mut RegistrationConfig) {
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if self.require_cv {
            config.require_cv_file = true;
        } else if self.no_require_cv {
            config.require_cv_file = false;
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    cli.apply_overrides(&mut config.registration);

    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, locale = %config.registration.locale, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Submit(args) => run_submit(args, &config.registration),
        Command::Demo(args) => run_demo(args, &config.registration),
        Command::Schema => {
            let schema = RegistrationSchema::from_config(&config.registration)?;
            print_schema(&schema);
            Ok(())
        }
    }
}
