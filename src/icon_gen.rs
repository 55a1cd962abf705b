use crate::contents_json::{self, IconSpec};
use crate::error::ManifestError;
use crate::png_encoder::{self, Color};
use anyhow::{Context, Result};
use image::Rgba;
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

/// Where Flutter-style projects keep the iOS app icon set.
pub const DEFAULT_APPICONSET: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";

/// Material Blue 600.
pub const DEFAULT_BACKGROUND: Color = Rgba([0x1E, 0x88, 0xE5, 0xFF]);

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory holding Contents.json; icons are written relative to it.
    pub appiconset: PathBuf,
    /// Fill color for every generated icon.
    pub background: Color,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            appiconset: PathBuf::from(DEFAULT_APPICONSET),
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Generates one solid-color PNG per Contents.json entry.
///
/// Returns the written paths in manifest order. Nothing is written when the
/// manifest is missing, malformed, or yields no icons.
pub fn generate_icons(config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.appiconset;
    create_dir_all(dir).context("Can't create appiconset directory")?;

    let specs = contents_json::load(dir)?;
    if specs.is_empty() {
        return Err(ManifestError::NoEntries(contents_json::contents_path(dir)).into());
    }

    let mut written = Vec::with_capacity(specs.len());
    for spec in &specs {
        let destination = dir.join(&spec.filename);
        generate_icon(&destination, spec, config.background)?;
        println!(
            "  ✓ Generated {} ({}x{})",
            destination.display(),
            spec.pixel_size,
            spec.pixel_size
        );
        written.push(destination);
    }

    Ok(written)
}

fn generate_icon(destination: &Path, spec: &IconSpec, background: Color) -> Result<()> {
    if let Some(parent) = destination.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Can't create directory {}", parent.display()))?;
    }

    let png = png_encoder::encode(spec.pixel_size, spec.pixel_size, background)
        .with_context(|| format!("Failed to encode {}", spec.filename))?;

    std::fs::write(destination, png)
        .with_context(|| format!("Failed to write {}", destination.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &Path, background: Color) -> GeneratorConfig {
        GeneratorConfig {
            appiconset: dir.to_path_buf(),
            background,
        }
    }

    fn write_manifest(dir: &Path, json: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("Contents.json"), json).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.appiconset, PathBuf::from(DEFAULT_APPICONSET));
        assert_eq!(config.background, Rgba([0x1E, 0x88, 0xE5, 0xFF]));
    }

    #[test]
    fn test_generates_icons_in_manifest_order() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        write_manifest(
            dir,
            r#"{"images":[
                {"filename":"Icon-20.png","size":"20x20","scale":"2x"},
                {"filename":"Icon-1024.png","size":"1024x1024","scale":"1x"}
            ]}"#,
        );
        let color = Rgba([10, 20, 30, 255]);

        let written = generate_icons(&config_in(dir, color)).unwrap();
        assert_eq!(written, vec![dir.join("Icon-20.png"), dir.join("Icon-1024.png")]);

        for (path, size) in written.iter().zip([40, 1024]) {
            let img = image::open(path).unwrap().to_rgba8();
            assert_eq!(img.dimensions(), (size, size));
            assert!(img.pixels().all(|p| *p == color));
        }
    }

    #[test]
    fn test_empty_manifest_writes_nothing() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), r#"{"images":[]}"#);

        let err = generate_icons(&config_in(temp.path(), DEFAULT_BACKGROUND)).unwrap_err();
        assert!(matches!(err.downcast_ref::<ManifestError>(), Some(ManifestError::NoEntries(_))));

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "only Contents.json should remain");
    }

    #[test]
    fn test_missing_manifest_creates_directory_only() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("Assets.xcassets").join("AppIcon.appiconset");

        let err = generate_icons(&config_in(&dir, DEFAULT_BACKGROUND)).unwrap_err();
        assert!(matches!(err.downcast_ref::<ManifestError>(), Some(ManifestError::NotFound(_))));
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_nested_filename_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            r#"{"images":[{"filename":"legacy/ipad/Icon-76.png","size":"76x76","scale":"1x"}]}"#,
        );

        let written = generate_icons(&config_in(temp.path(), DEFAULT_BACKGROUND)).unwrap();
        let expected = temp.path().join("legacy/ipad/Icon-76.png");
        assert_eq!(written, vec![expected.clone()]);
        assert_eq!(image::open(&expected).unwrap().width(), 76);
    }

    #[test]
    fn test_escaping_filename_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("AppIcon.appiconset");
        write_manifest(
            &dir,
            r#"{"images":[
                {"filename":"Icon-20.png","size":"20x20","scale":"1x"},
                {"filename":"../escaped.png","size":"20x20","scale":"1x"}
            ]}"#,
        );

        let err = generate_icons(&config_in(&dir, DEFAULT_BACKGROUND)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::InvalidFilename(_))
        ));
        assert!(!temp.path().join("escaped.png").exists());
        assert!(!dir.join("Icon-20.png").exists());
    }

    #[test]
    fn test_existing_files_are_overwritten() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            r#"{"images":[{"filename":"Icon.png","size":"8x8","scale":"1x"}]}"#,
        );
        let target = temp.path().join("Icon.png");
        fs::write(&target, b"stale").unwrap();

        generate_icons(&config_in(temp.path(), DEFAULT_BACKGROUND)).unwrap();

        let bytes = fs::read(&target).unwrap();
        assert_eq!(bytes, png_encoder::encode(8, 8, DEFAULT_BACKGROUND).unwrap());
    }
}
