use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "aci-snapshot")]
#[command(about = "Query managed objects from an exported ACI configuration snapshot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON object mapping class names to RN templates
    #[arg(long, value_name = "FILE", global = true)]
    pub templates: Option<PathBuf>,

    /// Layer the template file over the built-in table instead of replacing it
    #[arg(long, global = true)]
    pub merge_builtin: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    Dn {
        archive: PathBuf,

        dn: String,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    Class {
        archive: PathBuf,

        class: String,

        #[arg(long)]
        count: bool,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    Classes {
        archive: PathBuf,
    },
    Stats {
        archive: PathBuf,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
