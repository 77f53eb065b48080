use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::instrument::WithSubscriber;
use tracing::{error, info};

use daum_dict_lib::DictionaryLookup;
use daum_dict_lib::infrastructure::config::launcher;
use daum_dict_lib::infrastructure::{AppConfig, Feedback, LoggingHandle, build_dispatch};

const DEFAULT_WORKFLOW_NAME: &str = "Daum Dictionary";

#[derive(Parser)]
#[command(name = "daum-dict")]
#[command(about = "Search the Daum dictionary and print script filter feedback")]
struct Args {
    /// Text to look up
    query: Option<String>,

    /// Log at debug level to stderr
    #[arg(short, long)]
    verbose: bool,
}

async fn run(query: Option<String>, config: AppConfig) -> anyhow::Result<Feedback> {
    let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
        info!("Empty query, nothing to look up");
        return Ok(Feedback::new());
    };

    let lookup = DictionaryLookup::new(&config)?;
    let results = lookup.lookup(query.trim()).await?;
    Ok(results.iter().collect())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = AppConfig::from_launcher_env(|key| std::env::var(key).ok());
    if args.verbose {
        config.logging.level = "debug".to_string();
        config.logging.console_output = true;
    }
    let logging = build_dispatch(&config.logging).unwrap_or_else(|e| {
        eprintln!("Logging disabled: {e:#}");
        LoggingHandle::disabled()
    });

    let outcome = run(args.query, config)
        .with_subscriber(logging.dispatch().clone())
        .await;

    logging.scope(|| match outcome {
        Ok(feedback) => match feedback.send(io::stdout().lock()) {
            Ok(()) => {
                info!("Sent {} items", feedback.len());
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to send feedback: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Lookup failed: {:#}", e);
            let workflow_name = std::env::var(launcher::WORKFLOW_NAME_VAR)
                .unwrap_or_else(|_| DEFAULT_WORKFLOW_NAME.to_string());
            if let Err(send_err) = Feedback::error(&workflow_name, &format!("{e:#}")).send(io::stdout().lock()) {
                error!("Failed to send error feedback: {}", send_err);
            }
            ExitCode::FAILURE
        }
    })
}
