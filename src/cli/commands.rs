use crate::message::NegotiationError;
use crate::protocol;
use crate::registry::Registry;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "represent")]
#[command(about = "HTTP content negotiation over the built-in protocols", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the protocol selected for an Accept header
    Negotiate {
        /// Accept header value; empty accepts anything
        #[arg(short, long, default_value = "")]
        accept: String,

        /// Content type that wins ties
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Re-encode a document into the format an Accept header prefers
    Convert {
        /// Content-Type of the input document
        #[arg(short, long, default_value = "application/json")]
        content_type: String,

        /// Accept header value for the output
        #[arg(short, long, default_value = "")]
        accept: String,

        /// Input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Parse the process arguments and run against stdin/stdout.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(cli, &mut stdin.lock(), &mut stdout.lock())
}

/// Run a parsed command with explicit streams.
pub fn run(cli: Cli, input: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    let registry = Registry::new();
    protocol::register_builtins(&registry);

    match cli.command {
        Commands::Negotiate { accept, default } => {
            if let Some(default) = default {
                registry.try_set_default(&default)?;
            }
            let chosen = registry
                .match_header(&accept)
                .map_err(NegotiationError::Header)
                .and_then(|p| p.ok_or(NegotiationError::NotAcceptable))
                .map_err(|err| status_error(&err))?;
            writeln!(out, "{}", chosen.content_type())?;
            Ok(())
        }
        Commands::Convert {
            content_type,
            accept,
            input: path,
        } => {
            let decoder = registry
                .match_content_type(&content_type)
                .map_err(NegotiationError::Header)
                .and_then(|p| p.ok_or(NegotiationError::UnsupportedMediaType))
                .map_err(|err| status_error(&err))?;
            let encoder = registry
                .match_header(&accept)
                .map_err(NegotiationError::Header)
                .and_then(|p| p.ok_or(NegotiationError::NotAcceptable))
                .map_err(|err| status_error(&err))?;

            let value = match &path {
                Some(path) => {
                    let mut file = File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    decoder.decode(&mut file)
                }
                None => decoder.decode(input),
            }
            .map_err(|err| status_error(&NegotiationError::Decode(err)))?;

            encoder
                .encode(&value, out)
                .map_err(|err| status_error(&NegotiationError::Encode(err)))?;

            info!(
                from = decoder.content_type(),
                to = encoder.content_type(),
                "converted document"
            );
            Ok(())
        }
    }
}

fn status_error(err: &NegotiationError) -> anyhow::Error {
    anyhow!("{}: {}", err.status(), err)
}
