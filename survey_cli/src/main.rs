//! # Home Surveyor CLI
//!
//! Terminal front end for the survey wizard. Walks the user through every
//! step with line prompts, prints the certificate and exports it as text.

mod console;
mod session;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use survey_core::file_io::{load_survey, save_survey};
use survey_core::settings::AppSettings;
use survey_core::wizard::Wizard;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::console::Console;
use crate::session::Session;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Property measurement survey wizard.
///
/// Collects project, room and contact details, estimates finish costs and
/// writes a plain-text measurement certificate.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Directory the certificate is exported to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Settings file (JSON). Defaults are used when it does not exist.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Survey snapshot to continue from.
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Write a survey snapshot here when the session ends.
    #[arg(long)]
    save: Option<PathBuf>,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `warn` so log lines do not interleave with prompts.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => AppSettings::load_or_default(path)?,
        None => AppSettings::default(),
    };

    let wizard = match &cli.resume {
        Some(path) => {
            info!(path = %path.display(), "resuming survey");
            Wizard::resume(load_survey(path)?, settings)
        }
        None => Wizard::with_settings(settings),
    };

    println!("Home Surveyor - Property Measurement Wizard");
    println!("===========================================");
    println!("Press Enter to keep a value, '-' to clear it.");

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut session = Session::new(wizard, console, &cli.output_dir);
    session.run()?;

    debug!(exported = session.exported().len(), "session ended");

    if let Some(path) = &cli.save {
        save_survey(session.wizard().data(), path)?;
        println!("Survey saved to {}", path.display());
    }

    Ok(())
}
