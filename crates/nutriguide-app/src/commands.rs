//! Input line parsing for the chat loop.
//!
//! Lines starting with `/` are commands; a bare number picks one of the
//! suggested questions; anything else is a message for the orchestrator.

use console::style;
use nutriguide_chat::SUGGESTIONS;

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum InputLine {
    /// Free text to submit.
    Message(String),
    /// 1-based pick from the suggestion list, resolved to its text.
    Suggestion(String),
    Clear,
    Export,
    Mic,
    Help,
    Quit,
    Unknown(String),
    Blank,
}

/// Classify a raw input line.
pub fn parse(input: &str) -> InputLine {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return InputLine::Blank;
    }

    if let Ok(n) = trimmed.parse::<usize>() {
        if let Some(text) = n.checked_sub(1).and_then(|i| SUGGESTIONS.get(i)) {
            return InputLine::Suggestion(text.to_string());
        }
    }

    if !trimmed.starts_with('/') {
        return InputLine::Message(trimmed.to_string());
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();
    match cmd.as_str() {
        "/clear" => InputLine::Clear,
        "/export" => InputLine::Export,
        "/mic" => InputLine::Mic,
        "/help" | "/h" | "/?" => InputLine::Help,
        "/quit" | "/exit" | "/q" => InputLine::Quit,
        other => InputLine::Unknown(other.to_string()),
    }
}

/// Print the command list.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}    Clear the conversation", style("/clear").cyan());
    println!("  {}   Save the conversation as a text file", style("/export").cyan());
    println!("  {}      Use speech input", style("/mic").cyan());
    println!("  {}     Show this help message", style("/help").cyan());
    println!("  {}     End the session", style("/quit").cyan());
    println!(
        "  {}      Ask one of the suggested questions",
        style("1-6").cyan()
    );
    println!();
}
