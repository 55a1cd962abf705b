use std::{error::Error, fmt, io, path::PathBuf};

/// Failures while turning a Contents.json into icon specifications.
///
/// All of these are fatal for a run; entries that merely lack a filename or
/// size are skipped rather than reported here.
#[derive(Debug)]
pub enum ManifestError {
    /// The manifest file does not exist.
    NotFound(PathBuf),
    /// The manifest exists but is not a valid Contents.json document.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// An entry carries a size or scale that is not a number, or resolves
    /// to more pixels than a PNG header can hold.
    InvalidSize { filename: String, value: String },
    /// An entry's filename is absolute or climbs out of the appiconset.
    InvalidFilename(String),
    /// The manifest parsed but produced no icons to generate.
    NoEntries(PathBuf),
    /// Reading the manifest failed for a reason other than absence.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Manifest not found: {}", path.display()),
            Self::Malformed { path, .. } => {
                write!(f, "Manifest is not valid Contents.json: {}", path.display())
            }
            Self::InvalidSize { filename, value } => {
                write!(f, "Invalid size or scale {value:?} for {filename}")
            }
            Self::InvalidFilename(filename) => {
                write!(f, "Icon filename {filename:?} must stay inside the appiconset")
            }
            Self::NoEntries(path) => {
                write!(f, "No icon specifications found in {}", path.display())
            }
            Self::Io { path, .. } => write!(f, "Failed to read {}", path.display()),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
