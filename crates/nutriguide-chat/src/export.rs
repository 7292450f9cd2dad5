//! Plain-text transcript export.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use tracing::info;

use crate::error::ChatError;
use crate::transcript::SessionTranscript;
use crate::types::Turn;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid line break regex"));

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid markup regex"));

/// Strip rich-text markers from a turn body and collapse whitespace.
pub fn plain_text(content: &str) -> String {
    let spaced = LINE_BREAK.replace_all(content, " ");
    let stripped = MARKUP_TAG.replace_all(&spaced, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"<label>: <content>"` per turn, separated by a blank line.
pub fn render_plain_text(turns: &[Arc<Turn>]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker.export_label(), plain_text(&t.content)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// File name for a session started on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("nutrition-chat-{}.txt", date.format("%Y-%m-%d"))
}

/// Write the transcript under `dir` and return the file path.
///
/// Refuses when only the welcome turn exists.
pub fn write_export(transcript: &SessionTranscript, dir: &Path) -> Result<PathBuf, ChatError> {
    let turns = transcript.snapshot();
    if turns.len() <= 1 {
        return Err(ChatError::NothingToExport);
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(transcript.started_on()));
    std::fs::write(&path, render_plain_text(&turns))?;

    info!(path = %path.display(), turns = turns.len(), "Transcript exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_projection() {
        let turns = vec![
            Arc::new(Turn::assistant("<strong>Hi</strong>")),
            Arc::new(Turn::user("calories in rice?")),
        ];
        assert_eq!(
            render_plain_text(&turns),
            "Nutrition Guide: Hi\n\nYou: calories in rice?"
        );
    }

    #[test]
    fn test_plain_text_line_breaks_and_tags() {
        assert_eq!(
            plain_text("<strong>Apple</strong><br><br>Calories: 52 kcal<br/>Fat: 0.2 g"),
            "Apple Calories: 52 kcal Fat: 0.2 g"
        );
        assert_eq!(plain_text("<em>so</em>   good\n now"), "so good now");
    }

    #[test]
    fn test_plain_text_keeps_bullets() {
        assert_eq!(plain_text("• apple<br>• pear"), "• apple • pear");
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_filename(date), "nutrition-chat-2024-03-07.txt");
    }

    #[test]
    fn test_write_export_nothing_to_export() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = SessionTranscript::new();
        let err = write_export(&transcript, dir.path()).unwrap_err();
        assert!(matches!(err, ChatError::NothingToExport));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = SessionTranscript::new();
        transcript.append(Turn::user("calories in rice?"));
        transcript.append(Turn::assistant("Rice has <strong>130</strong> kcal"));

        let path = write_export(&transcript, dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            export_filename(transcript.started_on())
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let blocks: Vec<&str> = content.split("\n\n").collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("Nutrition Guide: Welcome to the Nutrition Facts Guide!"));
        assert_eq!(blocks[1], "You: calories in rice?");
        assert_eq!(blocks[2], "Nutrition Guide: Rice has 130 kcal");
        // Export never mutates the transcript
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn test_write_export_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("chat");
        let transcript = SessionTranscript::new();
        transcript.append(Turn::user("hello"));
        let path = write_export(&transcript, &nested).unwrap();
        assert!(path.exists());
    }
}
