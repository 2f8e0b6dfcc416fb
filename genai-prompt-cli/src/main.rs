//! `gprompt` binary entry point.

mod cli;
mod errors;
mod logging;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use genai_prompt::{Client, PromptRunner};
use tracing::debug;

use cli::{Cli, RunConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", errors::format_error_help(&err));
            ExitCode::from(errors::exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> genai_prompt::Result<()> {
    let mut builder = Client::builder_from_env()?;
    let config = RunConfig::try_from(cli)?;
    if let Some(secs) = config.timeout {
        builder = builder.timeout(secs);
    }
    let client = builder.build()?;
    debug!(?client, "client ready");

    let runner = PromptRunner::new(client);
    let mut stdout = io::stdout().lock();
    runner.run(config.to_request(), &mut stdout).await?;
    Ok(())
}
