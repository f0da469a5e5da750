use crate::core::types::OutputFormat;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Source files to run through their engines
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Workspace holding chirpy.toml and .chirpy/ (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub workspace: Option<PathBuf>,

    /// Run the named engine(s) instead of resolving by filename; `|` separates names
    #[arg(long, value_name = "NAME")]
    pub engine: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Do not write engine outputs to disk
    #[arg(long)]
    pub no_write: bool,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Source file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Workspace holding chirpy.toml and .chirpy/ (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub workspace: Option<PathBuf>,
}

#[derive(Args)]
pub struct EnginesArgs {
    /// Only list engines in this category; `|` separates categories
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Workspace holding chirpy.toml and .chirpy/ (default: current directory)
    #[arg(long, value_name = "PATH")]
    pub workspace: Option<PathBuf>,
}
