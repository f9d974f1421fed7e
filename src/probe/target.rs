use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use super::{Editor, ProbeError, ProbeSpec};

/// Where the probe definition comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeTarget {
    /// No argument: author a definition in a throwaway file.
    Scratch,
    /// A bare domain name, probed with `curl <domain>`.
    Domain(String),
    /// An existing definition file.
    File(PathBuf),
    /// A definition file to create.
    NewFile(PathBuf),
}

impl ProbeTarget {
    /// Interpret the positional target argument.
    ///
    /// Existing paths always win. Otherwise anything that looks like a host
    /// name (a dot after the first character, no path separators) is a
    /// domain, and everything else names a new definition file.
    pub fn resolve(arg: Option<&str>) -> Self {
        let Some(arg) = arg.map(str::trim).filter(|a| !a.is_empty()) else {
            return ProbeTarget::Scratch;
        };

        let path = Path::new(arg);
        if path.exists() {
            ProbeTarget::File(path.to_path_buf())
        } else if looks_like_domain(arg) {
            ProbeTarget::Domain(arg.to_string())
        } else {
            ProbeTarget::NewFile(path.to_path_buf())
        }
    }

    /// Produce the probe spec, opening the definition in `editor` when one is
    /// given. Domains never go through the editor.
    pub fn load(&self, editor: Option<&Editor>) -> Result<ProbeSpec, ProbeError> {
        match self {
            ProbeTarget::Domain(domain) => {
                info!(domain = %domain, "Probing bare domain");
                ProbeSpec::from_domain(domain)
            }
            ProbeTarget::Scratch => {
                let file = NamedTempFile::new().map_err(|e| {
                    ProbeError::io("failed to create probe definition", std::env::temp_dir(), e)
                })?;
                edit_and_load(file.path(), editor)
            }
            ProbeTarget::File(path) => edit_and_load(path, editor),
            ProbeTarget::NewFile(path) => {
                std::fs::File::create(path)
                    .map_err(|e| ProbeError::io("failed to create probe definition", path, e))?;
                edit_and_load(path, editor)
            }
        }
    }
}

fn edit_and_load(path: &Path, editor: Option<&Editor>) -> Result<ProbeSpec, ProbeError> {
    if let Some(editor) = editor {
        editor.edit(path)?;
    }
    ProbeSpec::load(path)
}

fn looks_like_domain(arg: &str) -> bool {
    arg.find('.').is_some_and(|i| i > 0)
        && !arg.contains(['/', '\\'])
        && !arg.chars().any(char::is_whitespace)
}
