use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemchat_core::ChatError;
use gemchat_core::config::ClientConfig;
use gemchat_core::secret::SecretService;
use gemchat_core::session::ChatSession;
use gemchat_infrastructure::{ConfigService, SecretServiceImpl};
use gemchat_interaction::{CompletionClient, CompletionTransport, HttpTransport};

mod command;
mod helper;
mod render;

use command::Command;
use helper::CliHelper;

#[derive(Parser)]
#[command(name = "gemchat")]
#[command(author, version, about = "Chat with Google Gemini from the terminal", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Model name, overriding config.toml
    #[arg(long)]
    model: Option<String>,

    /// Request timeout in seconds, overriding config.toml
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to an alternative config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format!("⚠️  {err:#}").red());
            if matches!(err.downcast_ref::<ChatError>(), Some(e) if e.is_missing_credential()) {
                eprintln!(
                    "{}",
                    "💡 Create a .env file containing GOOGLE_API_KEY=your_api_key and try again."
                        .yellow()
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut client_config = config_service.client_config()?;
    if let Some(model) = cli.model {
        client_config.model = model;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        client_config.timeout_secs = timeout_secs;
    }

    let api_key = SecretServiceImpl::new()?.api_key().await?;
    let client = CompletionClient::new(HttpTransport::new(&client_config, api_key)?);

    let mut session = ChatSession::new();
    info!(session_id = %session.id, model = %client_config.model, "session started");

    repl(&client, &mut session, &client_config).await
}

/// Reads lines until the user quits. Each message is sent and answered
/// before the next prompt is shown.
async fn repl<T: CompletionTransport>(
    client: &CompletionClient<T>,
    session: &mut ChatSession,
    config: &ClientConfig,
) -> Result<()> {
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== 🤖 Google Gemini Chat ===".bright_magenta().bold());
    println!("{}", format!("Model: {}", config.model).bright_black());
    println!(
        "{}",
        "Type a message to chat, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => return Err(err.into()),
        };

        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Clear => {
                session.transcript.clear();
                println!("{}", "🗑️  Conversation cleared.".bright_green());
            }
            Command::History => println!("{}", render::format_history(session)),
            Command::Info => println!("{}", render::format_info(session, config)),
            Command::Help => println!("{}", render::help_text()),
            Command::Unknown(cmd) => {
                println!("{}", format!("Unknown command: {cmd}").bright_black());
            }
            Command::Message(text) => {
                let _ = rl.add_history_entry(line.as_str());
                println!("{}", "💭 Thinking...".bright_black());
                match client.submit(session, &text).await {
                    Ok(reply) => println!("{}", render::format_turn(reply)),
                    Err(err) => eprintln!("{}", format!("Error: {err}").red()),
                }
                println!();
            }
        }
    }

    Ok(())
}
