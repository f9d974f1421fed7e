use std::path::Path;
use std::time::Duration;

use super::ProbeError;

/// Flags appended to every probe so it prints only time-to-first-byte.
const FORCED_FLAGS: &[&str] = &[
    "-L",
    "--silent",
    "-o /dev/null",
    "-w '%{time_starttransfer}\\n'",
];

/// Separator between script lines: a shell line continuation.
const CONTINUATION: &str = " \\\n";

/// An immutable probe command, finalised before sampling begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSpec {
    /// The command as written, trimmed.
    command: String,
    /// Non-blank command lines with continuation markers removed.
    lines: Vec<String>,
    /// Display title, padded with a space on each side.
    title: String,
}

impl ProbeSpec {
    /// Parse a (possibly multi-line, backslash-continued) shell command.
    ///
    /// The title is the second whitespace-separated token, normally the probe
    /// target. Single-token commands use their only token instead.
    pub fn parse(text: &str) -> Result<Self, ProbeError> {
        let command = text.trim();

        let lines: Vec<String> = command
            .lines()
            .map(|line| {
                let line = line.trim_end();
                line.strip_suffix('\\').unwrap_or(line).trim().to_string()
            })
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(ProbeError::EmptyDefinition);
        }

        let mut tokens = command
            .split_whitespace()
            .map(|t| t.trim_end_matches('\\'))
            .filter(|t| !t.is_empty());
        let first = tokens.next().unwrap_or_default();
        let title = tokens.next().unwrap_or(first);

        Ok(Self {
            command: command.to_string(),
            lines,
            title: format!(" {} ", title),
        })
    }

    /// The default probe for a bare domain: `curl <domain>`.
    pub fn from_domain(domain: &str) -> Result<Self, ProbeError> {
        Self::parse(&format!("curl {}", domain.trim()))
    }

    /// Read and parse a definition file.
    pub fn load(path: &Path) -> Result<Self, ProbeError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ProbeError::io("failed to read probe definition", path, e))?;
        Self::parse(&text)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render the script text: the command lines followed by the forced
    /// flags, joined by line continuations.
    pub fn render_script(&self, max_duration: Duration) -> String {
        let max_time = format!("--max-time {:.6}", max_duration.as_secs_f64());
        let mut script = self
            .lines
            .iter()
            .map(String::as_str)
            .chain(FORCED_FLAGS.iter().copied())
            .chain(std::iter::once(max_time.as_str()))
            .collect::<Vec<_>>()
            .join(CONTINUATION);
        script.push('\n');
        script
    }
}
