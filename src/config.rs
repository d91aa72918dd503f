use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::templates::TemplateTable;

pub const TEMPLATES_ENV: &str = "ACI_RN_TEMPLATES";
const TEMPLATES_FILE: &str = "rn-templates.json";

pub fn resolve_templates(cli: &Cli) -> Result<TemplateTable> {
    let source = resolve_templates_path(cli)?;
    load_templates(source.as_deref(), cli.merge_builtin)
}

/// `--templates`, then `$ACI_RN_TEMPLATES`, then the per-user data file if present.
pub fn resolve_templates_path(cli: &Cli) -> Result<Option<PathBuf>> {
    if let Some(p) = cli.templates.clone() {
        return Ok(Some(p));
    }

    if let Ok(p) = env::var(TEMPLATES_ENV)
        && !p.is_empty()
    {
        return Ok(Some(PathBuf::from(p)));
    }

    let default_path = aci_snapshot_home()?.join(TEMPLATES_FILE);
    if default_path.exists() {
        return Ok(Some(default_path));
    }

    Ok(None)
}

pub fn load_templates(source: Option<&Path>, merge_builtin: bool) -> Result<TemplateTable> {
    let Some(path) = source else {
        return Ok(TemplateTable::builtin());
    };

    let table = TemplateTable::from_file(path)?;
    if merge_builtin {
        Ok(TemplateTable::builtin().merge(table))
    } else {
        Ok(table)
    }
}

fn aci_snapshot_home() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::config_dir)
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Failed to resolve data directory"))?;
    Ok(base.join("aci-snapshot"))
}
