use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::debug;

use super::{ProbeError, ProbeSpec};

/// Script permissions: read and execute for the owning user only.
#[cfg(unix)]
const SCRIPT_MODE: u32 = 0o500;

/// The generated probe script on disk.
///
/// The file lives in the system temp directory and is removed when this
/// value is dropped.
#[derive(Debug)]
pub struct ProbeScript {
    file: NamedTempFile,
}

impl ProbeScript {
    /// Render `spec` with the forced timing flags and write it out.
    pub fn write(spec: &ProbeSpec, max_duration: Duration) -> Result<Self, ProbeError> {
        let contents = spec.render_script(max_duration);

        let mut file = tempfile::Builder::new()
            .prefix("probewatch-")
            .suffix(".sh")
            .tempfile()
            .map_err(|e| ProbeError::io("failed to create probe script", std::env::temp_dir(), e))?;

        let path = file.path().to_path_buf();
        file.write_all(contents.as_bytes())
            .map_err(|e| ProbeError::io("failed to write probe script", &path, e))?;
        file.flush()
            .map_err(|e| ProbeError::io("failed to write probe script", &path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(SCRIPT_MODE);
            std::fs::set_permissions(file.path(), permissions).map_err(|e| {
                ProbeError::io("failed to set probe script permissions", file.path(), e)
            })?;
        }

        debug!(path = %file.path().display(), "Wrote probe script");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
