//! Nutrition Guide binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing (stderr, so logs never mix with the conversation)
//! 3. Build the HTTP backend and check the service once
//! 4. Wire the orchestrator to the terminal renderer
//! 5. Run the interactive input loop until `/quit`, EOF or a session end

mod cli;
mod commands;
mod renderer;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use nutriguide_chat::{
    ChatError, HttpBackend, PresentationAdapter, ResponseOrchestrator, SpeechInput,
};
use nutriguide_core::NutriguideConfig;

use cli::CliArgs;
use commands::InputLine;
use renderer::TerminalRenderer;

type Lines = tokio::io::Lines<BufReader<tokio::io::Stdin>>;

/// Log the result of the startup liveness check. Never fatal.
async fn check_backend(backend: &HttpBackend) {
    match backend.check_status().await {
        Ok(reply) => tracing::info!(
            url = backend.base_url(),
            status = %reply.status,
            message = %reply.message,
            "Backend reachable"
        ),
        Err(e) => tracing::warn!(
            url = backend.base_url(),
            error = %e,
            "Backend liveness check failed; answers may fall back to the apology message"
        ),
    }
}

fn toast(message: &str) {
    println!("  {} {}", style("✓").green().bold(), style(message).green());
}

fn notice(message: &str) {
    println!("  {} {}", style("!").yellow().bold(), message);
}

fn prompt() {
    print!("  {} ", style("You >").green().bold());
    let _ = std::io::stdout().flush();
}

/// Submit one message. Returns `true` when the backend ended the session.
async fn ask(orchestrator: &ResponseOrchestrator, text: &str) -> bool {
    match orchestrator.submit(text).await {
        Ok(response) => response.terminates_session,
        Err(e) => {
            notice(&e.to_string());
            false
        }
    }
}

fn export(orchestrator: &ResponseOrchestrator, dir: &Path) {
    match orchestrator.export_to(dir) {
        Ok(path) => {
            toast("Chat exported successfully!");
            println!("  {}", style(path.display()).dim());
        }
        Err(ChatError::NothingToExport) => notice("Nothing to export yet!"),
        Err(e) => {
            tracing::warn!(error = %e, "Export failed");
            notice(&e.to_string());
        }
    }
}

/// Capture one utterance. The host dictation tool types the recognized text
/// into the terminal, so the next line is taken as the transcript.
async fn listen(speech: &mut SpeechInput, lines: &mut Lines) -> Result<Option<String>, ChatError> {
    speech.start_listening()?;
    println!("  {}", style("Listening... speak now, then press Enter.").dim());
    prompt();
    let heard = lines.next_line().await.unwrap_or(None);
    Ok(speech.stop_listening(heard))
}

async fn run_loop(
    orchestrator: &ResponseOrchestrator,
    speech: &mut SpeechInput,
    export_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let ended = match commands::parse(&line) {
            InputLine::Blank => false,
            InputLine::Message(text) => ask(orchestrator, &text).await,
            InputLine::Suggestion(text) => {
                println!("  {} {}", style("You >").green().bold(), text);
                ask(orchestrator, &text).await
            }
            InputLine::Clear => {
                match orchestrator.reset() {
                    Ok(()) => toast("Chat cleared successfully!"),
                    Err(e) => notice(&e.to_string()),
                }
                false
            }
            InputLine::Export => {
                export(orchestrator, export_dir);
                false
            }
            InputLine::Mic => match listen(speech, &mut lines).await {
                Ok(Some(text)) => ask(orchestrator, &text).await,
                Ok(None) => {
                    notice("No speech detected.");
                    false
                }
                Err(e) => {
                    notice(&format!("{}. Type your question instead.", e));
                    false
                }
            },
            InputLine::Help => {
                commands::print_help();
                false
            }
            InputLine::Quit => true,
            InputLine::Unknown(cmd) => {
                notice(&format!("Unknown command {}. Type /help for the list.", cmd));
                false
            }
        };

        if ended {
            break;
        }
    }

    println!("\n  {}", style("Session ended.").dim());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = NutriguideConfig::load_or_default(&config_file);
    let level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());

    // Tracing.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    tracing::info!("Starting Nutrition Guide v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    config.services.base_url = args.resolve_base_url(&config.services.base_url);
    let export_dir = args.resolve_export_dir(&config.export.directory);

    // Backend.
    let backend = Arc::new(HttpBackend::new(&config.services)?);
    check_backend(&backend).await;

    // Orchestrator.
    let orchestrator = ResponseOrchestrator::new(&config.chat, backend.clone(), backend)
        .with_presenter(PresentationAdapter::new(Arc::new(TerminalRenderer::new())));
    let mut speech = SpeechInput::new(config.chat.speech_enabled);

    tracing::info!(
        session_id = %orchestrator.transcript().session_id(),
        speech = speech.is_available(),
        "Session started"
    );

    orchestrator.replay();
    println!("  {}", style("Type /help for commands.").dim());

    run_loop(&orchestrator, &mut speech, &export_dir).await
}
