//! Lucid - select text anywhere, get a short LLM explanation.
//!
//! Main entry point for the relay server and the one-shot CLI commands.

mod cli;
mod cmd_explain;
mod server;

use clap::Parser;

use lucid_config::ConfigLoader;
use lucid_protocols::ExplanationMode;

use crate::cli::{Cli, Commands};
use crate::cmd_explain::{handle_check_config, handle_configure, handle_explain, ExplainOptions};
use crate::server::{init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;

    match cli.command {
        None => run_server(config, None, None).await,
        Some(Commands::Run { host, port }) => run_server(config, host, port).await,
        Some(Commands::Explain {
            text,
            code,
            mode,
            prompt,
            question,
            relay_url,
            json,
        }) => {
            let mode = prompt
                .map(ExplanationMode::Custom)
                .or_else(|| mode.map(ExplanationMode::from));
            let options = ExplainOptions {
                text,
                code,
                mode,
                question,
                relay_url,
                json,
            };
            handle_explain(config, options).await
        }
        Some(Commands::Configure { api_key, relay_url }) => {
            handle_configure(config, api_key, relay_url).await
        }
        Some(Commands::CheckConfig) => handle_check_config(&config),
    }
}
