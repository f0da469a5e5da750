pub mod args;
pub mod commands;

pub use args::{DepsArgs, EnginesArgs, FormatArg, ProcessArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
ENGINE COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "chirpy")]
#[command(version = crate::VERSION)]
#[command(about = "Run stylesheet and script engines over source files")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Engines are picked by file extension unless --engine names them explicitly."
)]
pub struct Args {
    /// Silence console logging
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Run the matching engine chain over files",
        long_about = "Process resolves the engines for each file, runs them as a chain, writes their outputs and reports diagnostics. Exits non-zero when any error diagnostic was produced.",
        after_help = "Example:\n    chirpy process styles/site.css styles/theme.less"
    )]
    Process(ProcessArgs),
    #[command(
        about = "List the dependencies of a file",
        long_about = "Deps asks every engine handling the file for the files it imports.",
        after_help = "Example:\n    chirpy deps styles/site.less"
    )]
    Deps(DepsArgs),
    #[command(
        about = "List registered engines",
        long_about = "Engines prints the registered engines with their category and flags.",
        after_help = "Example:\n    chirpy engines --category css"
    )]
    Engines(EnginesArgs),
}

impl Command {
    /// Workspace root the command operates in, when given explicitly.
    pub fn workspace(&self) -> Option<PathBuf> {
        match self {
            Command::Process(args) => args.workspace.clone(),
            Command::Deps(args) => args.workspace.clone(),
            Command::Engines(args) => args.workspace.clone(),
        }
    }
}

pub async fn run(args: Args) -> crate::Result<ExitCode> {
    match args.command {
        Command::Process(process_args) => commands::process(process_args).await,
        Command::Deps(deps_args) => commands::deps(deps_args).await,
        Command::Engines(engines_args) => commands::engines(engines_args).await,
    }
}
