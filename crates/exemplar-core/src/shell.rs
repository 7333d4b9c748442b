//! Command/output extraction from shell transcripts.
//!
//! A transcript is a sequence of interactions:
//!
//! ```text
//! # optional explanation
//! $ command
//! output line
//! output line
//! ```
//!
//! The scan is a two-state machine over lines. While seeking a command, a
//! comment line is remembered as a pending explanation and is kept only if
//! the very next line is a command. While in output, every line is captured
//! until the next comment or prompt line. Captured output is stripped of
//! leading and trailing blank lines.

use serde::{Deserialize, Serialize};

/// Default prompt marker that introduces a command line.
pub const DEFAULT_PROMPT_MARKER: &str = "$";

/// One shell interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Text of the comment line just before the command, or empty.
    #[serde(default)]
    pub explanation: String,
    /// The command, without the prompt marker.
    pub command: String,
    /// Lines printed by the command. May be empty.
    #[serde(default)]
    pub output: String,
}

enum ScanState {
    SeekingCommand { explanation: Option<String> },
    InOutput { current: CommandOutput, lines: Vec<String> },
}

/// Extracts [`CommandOutput`] pairs from transcript text.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    comment_marker: String,
    prompt_marker: String,
}

impl TranscriptParser {
    /// Create a parser for the given comment and prompt markers.
    #[must_use]
    pub fn new(comment_marker: impl Into<String>, prompt_marker: impl Into<String>) -> Self {
        Self {
            comment_marker: comment_marker.into(),
            prompt_marker: prompt_marker.into(),
        }
    }

    /// Text after `marker` and one space, trimmed; `None` if the line does
    /// not carry the marker or nothing follows it.
    fn marked_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
        let rest = line.strip_prefix(marker)?.strip_prefix(' ')?.trim();
        (!rest.is_empty()).then_some(rest)
    }

    fn is_boundary(&self, line: &str) -> bool {
        line.starts_with(self.comment_marker.as_str()) || line.starts_with(self.prompt_marker.as_str())
    }

    /// Scan a whole transcript into command/output pairs, in file order.
    #[must_use]
    pub fn parse(&self, content: &str) -> Vec<CommandOutput> {
        let mut pairs = Vec::new();
        let mut state = ScanState::SeekingCommand { explanation: None };

        for line in content.lines() {
            if let Some(command) = Self::marked_text(line, &self.prompt_marker) {
                let explanation = match state {
                    ScanState::SeekingCommand { explanation } => explanation,
                    ScanState::InOutput { current, lines } => {
                        pairs.push(Self::close(current, &lines));
                        None
                    },
                };
                state = ScanState::InOutput {
                    current: CommandOutput {
                        explanation: explanation.unwrap_or_default(),
                        command: command.to_string(),
                        output: String::new(),
                    },
                    lines: Vec::new(),
                };
                continue;
            }

            if self.is_boundary(line) {
                if let ScanState::InOutput { current, lines } = state {
                    pairs.push(Self::close(current, &lines));
                }
                state = ScanState::SeekingCommand {
                    explanation: Self::marked_text(line, &self.comment_marker).map(str::to_string),
                };
                continue;
            }

            match &mut state {
                ScanState::InOutput { lines, .. } => lines.push(line.to_string()),
                ScanState::SeekingCommand { explanation } => *explanation = None,
            }
        }

        if let ScanState::InOutput { current, lines } = state {
            pairs.push(Self::close(current, &lines));
        }
        pairs
    }

    fn close(mut current: CommandOutput, lines: &[String]) -> CommandOutput {
        let is_blank = |line: &&String| line.trim().is_empty();
        let start = lines.iter().position(|l| !is_blank(&l)).unwrap_or(lines.len());
        let end = lines.iter().rposition(|l| !is_blank(&l)).map_or(start, |i| i + 1);
        current.output = lines[start..end].join("\n").trim_end().to_string();
        current
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new(crate::segment::DEFAULT_COMMENT_MARKER, DEFAULT_PROMPT_MARKER)
    }
}

/// Extract command/output pairs using the default `#` and `$` markers.
#[must_use]
pub fn extract_commands(content: &str) -> Vec<CommandOutput> {
    TranscriptParser::default().parse(content)
}
