use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use bsc_volunteer_mailer::config::Settings;
use bsc_volunteer_mailer::error::AppError;
use bsc_volunteer_mailer::event::Event;
use bsc_volunteer_mailer::telemetry::init_telemetry;
use bsc_volunteer_mailer::template::{MailComposer, TemplateStore, TemplateSyntax};

/// Preview a volunteer schedule email for one event
#[derive(Debug, Parser)]
#[command(name = "bsc-mailer", version)]
#[command(group(ArgGroup::new("source").required(true).args(["template", "text"])))]
struct Cli {
    /// Event record as JSON
    #[arg(short, long)]
    event: PathBuf,

    /// ID of a stored email template
    #[arg(short, long)]
    template: Option<String>,

    /// Inline template text
    #[arg(long)]
    text: Option<String>,

    /// Treat inline text as legacy `<name>` markers
    #[arg(long, requires = "text")]
    legacy: bool,

    /// Template directory, overrides configuration
    #[arg(long)]
    templates_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new().context("Failed to load configuration")?;
    init_telemetry(&settings.logging)?;
    tracing::debug!(?settings, "Configuration loaded");

    let event = load_event(&cli.event)
        .with_context(|| format!("Failed to load event from {}", cli.event.display()))?;
    let composer = MailComposer::standard()?;

    if let Some(text) = &cli.text {
        let syntax = if cli.legacy {
            TemplateSyntax::AngleMarkers
        } else {
            TemplateSyntax::Braces
        };
        println!("{}", composer.render_text(syntax, text, &event));
        return Ok(());
    }

    let id = cli.template.as_deref().unwrap_or_default();
    let dir = cli
        .templates_dir
        .unwrap_or_else(|| PathBuf::from(&settings.templates.directory));

    let store = TemplateStore::new();
    store.load_dir(&dir)?;
    let email = store.render(id, Some(&event), &composer)?;

    println!("To: {}", email.recipients);
    println!("Subject: {}", email.subject);
    println!();
    println!("{}", email.body);
    Ok(())
}

fn load_event(path: &Path) -> Result<Event, AppError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
