use chirpy::cli::{self, Args};
use chirpy::logging;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> chirpy::Result<ExitCode> {
    let args = Args::parse();
    let _logging = logging::init(&args)?;
    cli::run(args).await
}
