//! Flowripple CLI: capture signed events from the terminal.

mod output;

use clap::{Parser, Subcommand, ValueEnum};
use flowripple_lib::config::{parse_client_id, ENV_API_VERSION, ENV_BASE_URL, ENV_CLIENT_ID};
use flowripple_lib::{
    resolve_api_key, CaptureRequest, Client, ClientConfig, SignedEnvelope, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL,
};
use output::{OutputFormat, Report};
use serde_json::Value;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowripple")]
#[command(about = "Flowripple CLI - capture signed events", long_about = None)]
struct Cli {
    /// Output format: plain (human-readable), json (structured).
    #[arg(short, long, default_value = "plain", value_enum)]
    output: OutputFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one event to the capture endpoint
    Capture {
        /// Event name, e.g. user.signup
        event: String,
        /// Event payload as JSON
        #[arg(default_value = "{}")]
        payload: String,
        #[arg(long, env = ENV_CLIENT_ID)]
        client_id: String,
        #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long, env = ENV_API_VERSION, default_value = DEFAULT_API_VERSION)]
        api_version: String,
        /// Report failures as "suppressed" instead of exiting with an error
        #[arg(long)]
        silent: bool,
    },
    /// Print the body and signature that would be sent for a given timestamp
    Sign {
        event: String,
        #[arg(default_value = "{}")]
        payload: String,
        /// Milliseconds since the Unix epoch
        #[arg(long)]
        timestamp: u64,
        #[arg(long, env = ENV_CLIENT_ID)]
        client_id: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = match cli.output {
        OutputFormatArg::Plain => OutputFormat::Plain,
        OutputFormatArg::Json => OutputFormat::Json,
    };

    match run(cli.command).await {
        Ok(report) => {
            println!("{}", report.render(format));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cmd: Commands) -> Result<Report, String> {
    match cmd {
        Commands::Capture {
            event,
            payload,
            client_id,
            base_url,
            api_version,
            silent,
        } => {
            let payload = parse_payload(&payload)?;
            let client_id = parse_client_id(&client_id).map_err(|e| e.to_string())?;
            let (api_key, _source) = resolve_api_key().map_err(|e| e.to_string())?;
            let config = ClientConfig::new(client_id, api_key)
                .with_base_url(base_url)
                .with_api_version(api_version)
                .with_silent(silent);
            let client = Client::new(config);
            let outcome = client
                .capture(&event, &payload)
                .await
                .map_err(|e| e.to_string())?;
            Ok(Report::Captured {
                event,
                url: client.capture_url(),
                outcome,
            })
        }
        Commands::Sign {
            event,
            payload,
            timestamp,
            client_id,
        } => {
            let payload = parse_payload(&payload)?;
            let client_id = parse_client_id(&client_id).map_err(|e| e.to_string())?;
            let (api_key, _source) = resolve_api_key().map_err(|e| e.to_string())?;
            let request = CaptureRequest::new(&event, &payload);
            let envelope =
                SignedEnvelope::seal(client_id, &api_key, timestamp.to_string(), &request)
                    .map_err(|e| e.to_string())?;
            Ok(Report::Signed(envelope))
        }
        Commands::Version => Ok(Report::Version(flowripple_lib::VERSION)),
    }
}

fn parse_payload(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("Invalid payload JSON: {}", e))
}
