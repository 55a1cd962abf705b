//! Contents.json data model for Apple's Asset Catalog format
//!
//! Only the fields needed to size app icons are modelled; everything else in
//! the catalog entries (role, subtype, color-space, ...) is ignored when
//! deserializing.

use crate::error::ManifestError;
use crate::png_encoder::MAX_DIMENSION;
use serde::Deserialize;
use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

/// File name of the manifest inside an `.appiconset` directory.
pub const CONTENTS_FILE_NAME: &str = "Contents.json";

/// Scale assumed for entries that omit `scale`.
const DEFAULT_SCALE: &str = "1x";

/// Root structure of a Contents.json file
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ContentsFile {
    /// Image entries in catalog order. A missing key reads as empty.
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

/// Individual image entry within an asset catalog
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ImageEntry {
    /// The filename for the image file, relative to the `.appiconset`
    pub filename: Option<String>,

    /// The size of the image in points (e.g., "29x29", "60x60")
    pub size: Option<String>,

    /// The scale factor for the image (e.g., "1x", "2x", "3x")
    pub scale: Option<String>,
}

/// A resolved icon to generate: where it goes and its square pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub filename: String,
    pub pixel_size: u32,
}

impl IconSpec {
    pub fn new(filename: impl Into<String>, pixel_size: u32) -> Self {
        Self {
            filename: filename.into(),
            pixel_size,
        }
    }
}

impl ContentsFile {
    /// Parses Contents.json text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Resolves every usable entry to an [`IconSpec`], keeping catalog order.
    ///
    /// Entries without a filename or size are skipped, as are entries that
    /// resolve to zero or fewer pixels. A size or scale that is not numeric,
    /// a size too large for PNG, or a filename escaping the directory is an
    /// error.
    pub fn icon_specs(&self) -> Result<Vec<IconSpec>, ManifestError> {
        let mut specs = Vec::with_capacity(self.images.len());

        for image in &self.images {
            let (Some(filename), Some(size)) = (non_empty(&image.filename), non_empty(&image.size))
            else {
                continue;
            };
            let scale = image.scale.as_deref().unwrap_or(DEFAULT_SCALE);

            let nominal = parse_nominal_size(size).ok_or_else(|| ManifestError::InvalidSize {
                filename: filename.to_string(),
                value: size.to_string(),
            })?;
            let factor = parse_scale(scale).ok_or_else(|| ManifestError::InvalidSize {
                filename: filename.to_string(),
                value: scale.to_string(),
            })?;

            let pixels = (nominal * factor as f64).floor();
            if !pixels.is_finite() || pixels < 1.0 {
                continue;
            }
            if pixels > f64::from(MAX_DIMENSION) {
                return Err(ManifestError::InvalidSize {
                    filename: filename.to_string(),
                    value: format!("{size} at {scale}"),
                });
            }
            if !stays_inside(filename) {
                return Err(ManifestError::InvalidFilename(filename.to_string()));
            }

            specs.push(IconSpec::new(filename, pixels as u32));
        }

        Ok(specs)
    }
}

/// Loads `Contents.json` from an `.appiconset` directory and resolves it.
pub fn load(dir: &Path) -> Result<Vec<IconSpec>, ManifestError> {
    let path = contents_path(dir);

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ManifestError::NotFound(path))
        }
        Err(source) => return Err(ManifestError::Io { path, source }),
    };

    let contents =
        ContentsFile::from_json(&text).map_err(|source| ManifestError::Malformed {
            path: path.clone(),
            source,
        })?;

    contents.icon_specs()
}

/// Location of the manifest inside `dir`.
pub fn contents_path(dir: &Path) -> PathBuf {
    dir.join(CONTENTS_FILE_NAME)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// "60x60" -> 60.0. Only the width is significant.
fn parse_nominal_size(size: &str) -> Option<f64> {
    size.split('x').next()?.trim().parse().ok()
}

// "2x" -> 2. Negative scales parse so the entry resolves to no pixels.
fn parse_scale(scale: &str) -> Option<i64> {
    scale.trim().trim_end_matches('x').parse().ok()
}

// Relative, with no `..`, so the icon lands under the appiconset.
fn stays_inside(filename: &str) -> bool {
    Path::new(filename)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
