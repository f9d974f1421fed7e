//! Probe definition and execution.
//!
//! Setting up a probe happens once, before sampling starts:
//!
//! 1. [`ProbeTarget::resolve`] decides whether the positional argument is a
//!    bare domain or a definition file.
//! 2. [`Editor::edit`] hands the file to the operator's editor.
//! 3. [`ProbeSpec::parse`] turns the command text into an immutable spec.
//! 4. [`ProbeScript::write`] renders the executable script with the forced
//!    timing flags.
//!
//! During sampling a [`Probe`] is invoked once per cycle. [`ShellProbe`] is
//! the production implementation.

mod editor;
mod script;
mod shell;
mod spec;
mod target;

pub use editor::Editor;
pub use script::ProbeScript;
pub use shell::{ShellProbe, DEFAULT_SHELL, TIMEOUT_GRACE};
pub use spec::ProbeSpec;
pub use target::ProbeTarget;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::data::Measurement;

/// Something that can be measured once per sampling cycle.
///
/// Implementations must never fail: every outcome, including errors, is
/// folded into the returned [`Measurement`].
#[async_trait]
pub trait Probe: Send + Sync {
    /// Run the probe once and classify the outcome.
    async fn measure(&self) -> Measurement;

    /// Human-readable description for logs.
    fn description(&self) -> &str;
}

/// Errors raised while preparing a probe. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Reading or writing a definition or script file failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition file holds no command.
    #[error("probe definition is empty")]
    EmptyDefinition,

    /// The editor could not be started.
    #[error("failed to launch editor '{editor}': {source}")]
    EditorLaunch {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    /// The editor exited unsuccessfully.
    #[error("editor '{editor}' exited with {status}")]
    EditorFailed {
        editor: String,
        status: std::process::ExitStatus,
    },
}

impl ProbeError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProbeError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
