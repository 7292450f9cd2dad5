//! Terminal rendering of chat turns.
//!
//! Translates the rich-text markers used in turn bodies into terminal
//! styling: `<br>` becomes a line break, `<strong>` bold, `<em>` italic.

use std::sync::LazyLock;

use console::style;
use nutriguide_chat::{RenderInstruction, Renderer, ResponseSource, Speaker};
use regex::{Captures, Regex};

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid line break regex"));

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<strong>(.*?)</strong>").expect("Invalid strong regex"));

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<em>(.*?)</em>").expect("Invalid em regex"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

/// Convert a rich-text body into styled terminal lines.
pub fn to_terminal(body: &str) -> Vec<String> {
    let text = STRONG.replace_all(body, |c: &Captures| style(&c[1]).bold().to_string());
    let text = EMPHASIS.replace_all(&text, |c: &Captures| style(&c[1]).italic().to_string());
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

/// Prints assistant turns to stdout.
///
/// User turns are skipped since the terminal already shows what was typed.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, instruction: &RenderInstruction) {
        if instruction.speaker == Speaker::User {
            return;
        }

        println!();
        println!("  {}", style("Nutrition Guide >").cyan().bold());
        for line in to_terminal(&instruction.body) {
            if instruction.source == Some(ResponseSource::Error) {
                println!("  {}", style(line).yellow());
            } else {
                println!("  {}", line);
            }
        }

        if !instruction.suggestions.is_empty() {
            println!();
            println!("  {}", style("Type a number to ask:").dim());
            for (i, s) in instruction.suggestions.iter().enumerate() {
                println!("  {} {}", style(format!("{}.", i + 1)).cyan(), s);
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_terminal_plain_lines() {
        console::set_colors_enabled(false);
        let lines = to_terminal("<strong>Apple</strong><br><br>Calories: 52 kcal<br>Fat: 0.2 g");
        assert_eq!(lines, vec!["Apple", "", "Calories: 52 kcal", "Fat: 0.2 g"]);
    }

    #[test]
    fn test_to_terminal_strips_unknown_tags() {
        console::set_colors_enabled(false);
        let lines = to_terminal("<em>Tip:</em> eat <span>greens</span>");
        assert_eq!(lines, vec!["Tip: eat greens"]);
    }

    #[test]
    fn test_to_terminal_welcome_has_bullets() {
        console::set_colors_enabled(false);
        let lines = to_terminal(nutriguide_chat::WELCOME_MESSAGE);
        assert_eq!(lines[0], "Welcome to the Nutrition Facts Guide!");
        assert!(lines.iter().any(|l| l == "• Is oatmeal good for breakfast?"));
    }
}
