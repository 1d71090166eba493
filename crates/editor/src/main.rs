//! Gallery template editor (headless)
//!
//! Opens a template, applies a batch of JSON commands and writes or saves
//! the result.
//!
//! ```bash
//! gallery-editor --template hall.json --commands edits.json --out hall.out.json
//! gallery-editor --template hall.json --commands edits.json --save --store ./templates
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gallery_editor_lib::command::execute_json_batch;
use gallery_editor_lib::{EditorSettings, FileTemplateStore, TemplateSession};
use shared::GalleryTemplate;

/// Gallery template editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Template document to open (the default template when omitted)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// JSON array of editor commands to apply
    #[arg(short, long)]
    commands: Option<PathBuf>,

    /// Write the resulting template document here
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Validate and save into the template store
    #[arg(long)]
    save: bool,

    /// Template store directory (overrides settings)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "gallery_editor=debug"
    } else {
        "gallery_editor=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .init();

    let settings = EditorSettings::load();

    let template = match &args.template {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            let template = GalleryTemplate::from_json(&json)
                .with_context(|| format!("Failed to parse template {}", path.display()))?;
            tracing::info!("Loaded template from {} ({})", path.display(), template.name);
            template
        }
        None => GalleryTemplate::default(),
    };
    let mut session = TemplateSession::from_settings(template, &settings);

    if let Some(path) = &args.commands {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read commands {}", path.display()))?;
        let responses = execute_json_batch(&mut session, &json).map_err(anyhow::Error::msg)?;
        let failed = responses.iter().filter(|r| !r.success).count();
        if failed > 0 {
            tracing::warn!("{failed} of {} commands failed", responses.len());
        }
        println!("{}", serde_json::to_string_pretty(&responses)?);
    }

    if let Some(path) = &args.out {
        let doc = session.export()?;
        std::fs::write(path, serde_json::to_string_pretty(&doc)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote template to {}", path.display());
    }

    if args.save {
        let dir = args
            .store
            .clone()
            .or_else(|| settings.templates_dir())
            .context("No template store directory available")?;
        let mut store = FileTemplateStore::new(dir);
        let id = session.save(&mut store)?;
        println!("{id}");
    }

    Ok(())
}
