use aci_snapshot::cli::{Cli, Commands, OutputFormat};
use aci_snapshot::config::resolve_templates;
use aci_snapshot::{LoadStats, ManagedObject, Snapshot, TemplateTable};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let templates = resolve_templates(&cli)?;

    match cli.command {
        Commands::Dn {
            archive,
            dn,
            format,
        } => {
            let snapshot = load_snapshot(&archive, &templates)?;
            let mo = snapshot.get_by_dn(&dn)?;
            let content = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&**mo)?,
                OutputFormat::Text => render_text(mo),
            };
            write_output(&content);
        }
        Commands::Class {
            archive,
            class,
            count,
            format,
        } => {
            let snapshot = load_snapshot(&archive, &templates)?;
            let mos = snapshot.get_by_class(&class)?;
            let content = match (format, count) {
                (OutputFormat::Json, true) => serde_json::to_string_pretty(&ClassCount {
                    class,
                    count: mos.len(),
                })?,
                (OutputFormat::Json, false) => {
                    let items: Vec<&ManagedObject> = mos.iter().map(Arc::as_ref).collect();
                    serde_json::to_string_pretty(&items)?
                }
                (OutputFormat::Text, true) => mos.len().to_string(),
                (OutputFormat::Text, false) => mos
                    .iter()
                    .map(|mo| mo.dn())
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            write_output(&content);
        }
        Commands::Classes { archive } => {
            let snapshot = load_snapshot(&archive, &templates)?;
            println!("{}", serde_json::to_string_pretty(&class_counts(&snapshot))?);
        }
        Commands::Stats { archive } => {
            let snapshot = load_snapshot(&archive, &templates)?;
            let stats = StatsResult {
                archive: archive.to_string_lossy().to_string(),
                load: snapshot.stats(),
                distinct_dns: snapshot.len(),
                distinct_classes: snapshot.classes().count(),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_snapshot(archive: &Path, templates: &TemplateTable) -> Result<Snapshot> {
    Snapshot::load(archive, templates)
        .with_context(|| format!("Failed to load snapshot: {}", archive.display()))
}

#[derive(Debug, Serialize)]
struct ClassCount {
    class: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct StatsResult {
    archive: String,
    #[serde(flatten)]
    load: LoadStats,
    distinct_dns: usize,
    distinct_classes: usize,
}

fn class_counts(snapshot: &Snapshot) -> Vec<ClassCount> {
    let mut counts: Vec<ClassCount> = snapshot
        .classes()
        .map(|(class, count)| ClassCount {
            class: class.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| a.class.cmp(&b.class));
    counts
}

fn render_text(mo: &ManagedObject) -> String {
    let mut out = format!("{} {}\n", mo.class(), mo.dn());
    for (name, value) in mo.attributes() {
        let value = value
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string());
        out.push_str(&format!("  {name}: {value}\n"));
    }
    out
}

fn write_output(content: &str) {
    print!("{content}");
    if !content.ends_with('\n') {
        println!();
    }
}

