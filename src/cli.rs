//! CLI definitions for Lucid.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use lucid_protocols::ExplanationMode;

/// Lucid CLI.
#[derive(Parser)]
#[command(name = "lucid")]
#[command(about = "Select text anywhere, get a short LLM explanation")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "lucid.toml", global = true, env = "LUCID_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the relay server in foreground (default)
    Run {
        /// Server host (overrides [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides [server].port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Explain a piece of text through a running relay
    Explain {
        /// Text to explain
        text: String,

        /// Treat the text as code (terminal panel, analysis)
        #[arg(long)]
        code: bool,

        /// Explanation verbosity
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Custom instruction placed before the text (overrides --mode)
        #[arg(long)]
        prompt: Option<String>,

        /// Follow-up question about the code, asked after the analysis (implies --code)
        #[arg(long)]
        question: Option<String>,

        /// Relay base URL (overrides [pipeline].relay_url)
        #[arg(long)]
        relay_url: Option<String>,

        /// Print the panel view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send an API key to a running relay
    Configure {
        /// Provider API key
        api_key: String,

        /// Relay base URL (overrides [pipeline].relay_url)
        #[arg(long)]
        relay_url: Option<String>,
    },

    /// Validate the configuration file
    CheckConfig,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum ModeArg {
    Simple,
    Detailed,
}

impl From<ModeArg> for ExplanationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Simple => ExplanationMode::Simple,
            ModeArg::Detailed => ExplanationMode::Detailed,
        }
    }
}
