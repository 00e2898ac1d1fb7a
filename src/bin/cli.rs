//! Incident Reporter CLI
//!
//! Drives the gate check, type catalog and report submission from a terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use incident_reporter::{
    error::{AppError, Result},
    models::{Attachment, Config, Environment, IncidentCategory, IncidentType},
    pipeline::{Outcome, SubmissionOrchestrator},
    services::{GateChecker, HttpTransport, ReportSubmitter, type_options},
    view::{GatePage, LineMeasure, ReportPage},
};

/// Incident Reporter - campus incident reporting client
#[derive(Parser, Debug)]
#[command(
    name = "incident-reporter",
    version,
    about = "Campus incident reporting client"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "reporter.toml")]
    config: PathBuf,

    /// Backend origin, overrides the configured one
    #[arg(long, env = "REPORTER_BACKEND_ORIGIN", global = true)]
    origin: Option<String>,

    /// Hosting environment: local or deployed
    #[arg(long, global = true)]
    environment: Option<Environment>,

    /// Hostname the reporter is served from; picks the environment
    /// when --environment is not given
    #[arg(long, env = "REPORTER_HOSTNAME", global = true)]
    hostname: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a college code against the gate
    Gate {
        #[arg(long)]
        code: String,
    },

    /// List incident categories
    Categories,

    /// List the incident types of a category
    Types {
        #[arg(long)]
        category: String,
    },

    /// Submit an incident report
    Submit {
        #[arg(long)]
        category: IncidentCategory,

        /// Type label or token (e.g. "Broken Equipment" or BROKEN_EQUIPMENT)
        #[arg(long = "type")]
        incident_type: Option<String>,

        #[arg(long)]
        description: String,

        /// Incident date; defaults to now
        #[arg(long)]
        date: Option<String>,

        /// Image to attach
        #[arg(long)]
        image: Option<PathBuf>,

        /// Extra form field as name=value
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Validate the configuration file
    Validate,

    /// Show the resolved settings
    Info,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// Resolve a `--type` value (label or token) within a category.
fn resolve_type(category: IncidentCategory, needle: &str) -> Result<IncidentType> {
    IncidentType::find(category, needle).ok_or_else(|| {
        AppError::validation(format!("'{needle}' is not a {category} incident type"))
    })
}

/// Environment from the flags: an explicit one wins over the hostname.
fn pick_environment(
    environment: Option<Environment>,
    hostname: Option<&str>,
) -> Option<Environment> {
    environment.or_else(|| hostname.map(Environment::from_hostname))
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(&cli.config);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });
    if let Some(environment) = pick_environment(cli.environment, cli.hostname.as_deref()) {
        config.backend.environment = environment;
    }

    match cli.command {
        Command::Gate { code } => {
            let checker = GateChecker::new(&config.gate);
            let mut page = GatePage {
                code_input: code,
                ..GatePage::default()
            };
            page.submit_code(&checker);

            if let Some(location) = page.location {
                println!("Access granted, continue to {location}");
            } else {
                for alert in &page.alerts {
                    eprintln!("{alert}");
                }
                return Err(AppError::validation("college code rejected"));
            }
        }

        Command::Categories => {
            for category in IncidentCategory::ALL {
                println!("{:<12} {} types", category.key(), category.type_labels().len());
            }
        }

        Command::Types { category } => {
            for option in type_options(&category) {
                if option.placeholder {
                    println!("(none) {}", option.label);
                } else {
                    println!("{:<40} {}", option.value, option.label);
                }
            }
        }

        Command::Submit {
            category,
            incident_type,
            description,
            date,
            image,
            fields,
        } => {
            let origin = config.backend.resolve_origin(cli.origin.as_deref())?;
            let transport = HttpTransport::new(&config.client)?;
            let submitter = ReportSubmitter::new(transport, &origin, &config.backend.reports_path)?;
            log::info!("Submitting to {}", submitter.endpoint());
            let mut orchestrator =
                SubmissionOrchestrator::new(submitter, config.gate.college_code.clone());

            let mut page = ReportPage::complete();
            page.bind();
            if let Some(form) = page.form.as_mut() {
                form.extra_fields = fields;
            }

            page.select_category(category.key());
            match incident_type {
                Some(needle) => {
                    let found = resolve_type(category, &needle)?;
                    if !page.select_type(&found.token()) {
                        return Err(AppError::validation(format!(
                            "type selector does not offer {}",
                            found.label
                        )));
                    }
                }
                None if !category.type_labels().is_empty() => {
                    return Err(AppError::validation(format!(
                        "--type is required for category {category}"
                    )));
                }
                None => {}
            }

            page.input_description(&description, &LineMeasure::default());
            if let Some(date) = date {
                page.set_date(&date);
            }
            if let Some(path) = image {
                page.choose_files(vec![Attachment::from_path(&path).await?]);
                if let Some(name) = &page.file_name {
                    log::info!("Attached {name}");
                }
            }

            let outcome = orchestrator.handle_submit(&mut page).await;

            for message in &page.messages {
                println!("{}", message.render());
            }
            for alert in &page.alerts {
                println!("{alert}");
            }

            if let Some(Outcome::Failed { message }) = outcome {
                return Err(AppError::rejected(message));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");
        }

        Command::Info => {
            let origin = config.backend.resolve_origin(cli.origin.as_deref())?;
            println!("Config file: {}", cli.config.display());
            println!("Environment: {}", config.backend.environment.as_str());
            println!("Backend origin: {origin}");
            println!("Reports path: {}", config.backend.reports_path);
            println!(
                "Timeout: {}",
                config
                    .client
                    .timeout_secs
                    .map(|s| format!("{s}s"))
                    .unwrap_or_else(|| "none".to_string())
            );
            println!("Report page: {}", config.gate.report_page);
        }
    }

    Ok(())
}
