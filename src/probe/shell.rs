use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

use super::Probe;
use crate::data::Measurement;

/// Shell used to run the probe script.
pub const DEFAULT_SHELL: &str = "sh";

/// Extra time allowed past the probe's own `--max-time` before the child is
/// killed and the cycle counted as an execution failure.
pub const TIMEOUT_GRACE: Duration = Duration::from_secs(1);

/// Runs a script through a shell and reads one number from its stdout.
#[derive(Debug, Clone)]
pub struct ShellProbe {
    shell: String,
    script: PathBuf,
    timeout: Duration,
    description: String,
}

impl ShellProbe {
    /// Create a probe for `script`, whose own runtime is bounded by `max_duration`.
    pub fn new(script: impl AsRef<Path>, max_duration: Duration) -> Self {
        let script = script.as_ref().to_path_buf();
        Self {
            description: format!("{} {}", DEFAULT_SHELL, script.display()),
            shell: DEFAULT_SHELL.to_string(),
            script,
            timeout: max_duration + TIMEOUT_GRACE,
        }
    }

    /// Use a different shell (e.g. `bash`).
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self.description = format!("{} {}", self.shell, self.script.display());
        self
    }

    /// Hard limit after which the child is killed.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Probe for ShellProbe {
    async fn measure(&self) -> Measurement {
        let output = Command::new(&self.shell)
            .arg(&self.script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, output).await {
            Ok(Ok(output)) => {
                if !output.status.success() {
                    warn!(status = %output.status, "Probe exited unsuccessfully");
                }
                Measurement::classify(output.status.success(), &output.stdout)
            }
            Ok(Err(e)) => {
                warn!(shell = %self.shell, error = %e, "Failed to launch probe");
                Measurement::ExecutionFailure
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Probe timed out, killed");
                Measurement::ExecutionFailure
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
