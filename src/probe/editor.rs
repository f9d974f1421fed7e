use std::path::Path;
use std::process::Command;

use tracing::info;

use super::ProbeError;

/// Editor used when nothing else is configured.
const FALLBACK_EDITOR: &str = "nano";

/// The interactive editor used to author the probe command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    program: String,
    args: Vec<String>,
}

impl Editor {
    /// Parse an editor command line such as `code --wait`.
    ///
    /// Returns `None` for a blank command.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Pick the editor: explicit choice, then `$VISUAL`, then `$EDITOR`, then nano.
    pub fn resolve(explicit: Option<&str>) -> Self {
        let visual = std::env::var("VISUAL").ok();
        let editor = std::env::var("EDITOR").ok();
        Self::resolve_from(explicit, visual.as_deref(), editor.as_deref())
    }

    fn resolve_from(explicit: Option<&str>, visual: Option<&str>, editor: Option<&str>) -> Self {
        [explicit, visual, editor]
            .into_iter()
            .flatten()
            .find_map(Self::parse)
            .unwrap_or_else(|| Self {
                program: FALLBACK_EDITOR.to_string(),
                args: Vec::new(),
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Open `path` in the editor on the current terminal and wait for it to exit.
    pub fn edit(&self, path: &Path) -> Result<(), ProbeError> {
        info!(editor = %self.program, path = %path.display(), "Opening probe definition");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| ProbeError::EditorLaunch {
                editor: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProbeError::EditorFailed {
                editor: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}
