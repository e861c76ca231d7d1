//! Maps a script path to the argument vector that runs it
//!
//! | extension      | invocation                  | platforms    |
//! |----------------|-----------------------------|--------------|
//! | `.py`          | `<python> <path>`           | all          |
//! | `.bat`, `.cmd` | `cmd /c <path>`             | Windows only |
//! | `.bash`, `.sh` | `bash <path>`               | all          |
//!
//! Pure: no filesystem access, the path is not checked for existence.

use crate::domain::PlatformFamily;
use std::path::Path;
use thiserror::Error;

/// Why a script cannot be turned into a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedScript {
    #[error("batch scripts can only run on Windows ({extension})")]
    WindowsOnly { extension: String },

    #[error("Unsupported extension: {0}")]
    UnknownExtension(String),
}

#[derive(Debug, Clone)]
pub struct ScriptCommandBuilder {
    platform: PlatformFamily,
    python_interpreter: String,
}

impl ScriptCommandBuilder {
    pub fn new(platform: PlatformFamily, python_interpreter: impl Into<String>) -> Self {
        Self {
            platform,
            python_interpreter: python_interpreter.into(),
        }
    }

    /// Build the argument vector for `path`
    pub fn build(&self, path: &Path) -> Result<Vec<String>, UnsupportedScript> {
        let extension = extension_of(path);
        let path_arg = path.to_string_lossy().into_owned();

        match (extension.as_str(), self.platform) {
            (".py", _) => Ok(vec![self.python_interpreter.clone(), path_arg]),
            (".bat" | ".cmd", PlatformFamily::Windows) => {
                Ok(vec!["cmd".to_string(), "/c".to_string(), path_arg])
            }
            (".bat" | ".cmd", PlatformFamily::Posix) => Err(UnsupportedScript::WindowsOnly {
                extension: extension.clone(),
            }),
            (".bash" | ".sh", _) => Ok(vec!["bash".to_string(), path_arg]),
            ("", _) => Err(UnsupportedScript::UnknownExtension("(none)".to_string())),
            _ => Err(UnsupportedScript::UnknownExtension(extension.clone())),
        }
    }
}

/// Lower-cased extension with its leading dot, empty if there is none
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
