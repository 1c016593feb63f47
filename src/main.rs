use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use askpdf::banner::{BannerInfo, print_banner, print_goodbye};
use askpdf::commands::{CommandRegistry, CommandResult, Session, load_file, run_question, run_upload};
use askpdf::config::Config;
use askpdf::consts::default_db_path;
use askpdf::service::http::HttpDocumentService;

#[derive(Parser)]
#[command(name = "askpdf", version, about = "Upload a PDF, then ask it questions.")]
struct Cli {
    /// Document server URL (overrides the saved one)
    #[arg(short, long, env = "ASKPDF_SERVER")]
    server: Option<String>,

    /// SQLite database for settings (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Request timeout in seconds (default: wait until the server answers)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Upload this file, answer --question if given, and exit (non-interactive)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Question to ask about --file
    #[arg(short, long, requires = "file")]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let db = match cli.db {
        Some(db) => db,
        None => default_db_path()?
            .to_str()
            .context("database path is not valid UTF-8")?
            .to_string(),
    };
    let config = Config::open(&db)?;
    let server_url = config.server_url(cli.server.as_deref())?;
    let timeout = cli.timeout.map(Duration::from_secs);

    let service = HttpDocumentService::new(&server_url, timeout)
        .context("failed to build HTTP client")?;
    let server_url = service.base_url().to_string();
    let mut session = Session::new(Arc::new(service), server_url, config, timeout);

    // Single file mode
    if let Some(path) = cli.file {
        let file = load_file(&path).await?;
        session.controller.select_file(file);
        if !run_upload(&mut session).await {
            return Ok(ExitCode::FAILURE);
        }
        if let Some(question) = cli.question
            && !run_question(&mut session, &question).await
        {
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config_label = if db == ":memory:" { "ephemeral" } else { &db };
    print_banner(&BannerInfo {
        server: &session.server_url,
        config: config_label,
        timeout: cli.timeout,
    });

    let registry = CommandRegistry::new();

    // REPL. Async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\naskpdf> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match registry.dispatch(input, &mut session).await {
            CommandResult::Quit => break,
            CommandResult::Handled => {}
            CommandResult::NotACommand => {
                run_question(&mut session, input).await;
            }
        }
    }

    print_goodbye();
    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so they never mix with answers on stdout.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Use RUST_LOG if set, otherwise only warnings from this crate
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("askpdf=warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true).compact())
        .with(filter)
        .init();
}
