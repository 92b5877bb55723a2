use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod handlers;

#[derive(Parser)]
#[command(
    name = "fnbridge",
    about = "fnbridge — replay function invocation envelopes through the HTTP adapter",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an envelope through the adapter and print the outbound envelope.
    ///
    /// The envelope is handed to a built-in handler: `echo` returns the
    /// request body, `inspect` returns a JSON description of the canonical
    /// request the handler received.
    Replay {
        /// Envelope schema of the input file
        #[arg(short, long, value_enum, default_value = "v2")]
        payload: PayloadVersion,
        /// Path to the inbound envelope JSON
        #[arg(short, long)]
        envelope: PathBuf,
        /// Path to fnbridge.toml (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Built-in handler to run
        #[arg(long, value_enum, default_value = "inspect")]
        handler: HandlerKind,
        /// Invocation request id passed as ambient metadata
        #[arg(long, default_value = "local-invoke")]
        request_id: String,
        /// Invoked function ARN passed as ambient metadata
        #[arg(long, default_value = "")]
        function_arn: String,
        /// Log each raw v2 envelope before translation
        #[arg(long)]
        observe: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PayloadVersion {
    V1,
    V2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HandlerKind {
    Echo,
    Inspect,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs)?;

    match cli.command {
        Commands::Replay {
            payload,
            envelope,
            config,
            handler,
            request_id,
            function_arn,
            observe,
        } => commands::replay::replay(&commands::replay::ReplayOptions {
            payload,
            envelope,
            config,
            handler,
            request_id,
            function_arn,
            observe,
        }),
        Commands::Config { config } => commands::config::show(config.as_deref()),
    }
}

fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("fnbridge=info".parse()?);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
