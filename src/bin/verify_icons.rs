use anyhow::{bail, Context, Result};
use appicon_gen::{
    cli::AppiconsetArgs,
    contents_json,
    icon_gen::DEFAULT_BACKGROUND,
    png_encoder::{self, Color},
    IconSpec,
};
use clap::Parser;
use std::path::Path;

#[derive(Debug, Parser)]
#[clap(
    name = "verify-icons",
    about = "Check that generated placeholder icons match their Contents.json"
)]
struct Args {
    #[clap(flatten)]
    target: AppiconsetArgs,
}

fn main() -> Result<()> {
    let appiconset = Args::parse().target.into_path();
    let specs = contents_json::load(&appiconset)?;

    println!("Checking {} icons in {}", specs.len(), appiconset.display());

    let mut failures = 0;
    for spec in &specs {
        let path = appiconset.join(&spec.filename);
        match verify_icon(&path, spec, DEFAULT_BACKGROUND) {
            Ok(()) => println!("  ✓ {} ({}x{})", path.display(), spec.pixel_size, spec.pixel_size),
            Err(err) => {
                failures += 1;
                println!("  ✗ {}: {:#}", path.display(), err);
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} icons failed verification", specs.len());
    }
    Ok(())
}

fn verify_icon(path: &Path, spec: &IconSpec, background: Color) -> Result<()> {
    let bytes = std::fs::read(path).context("Failed to read icon")?;

    for chunk in png_encoder::read_chunks(&bytes)? {
        if !chunk.crc_matches() {
            bail!("checksum mismatch in {} chunk", chunk.tag_str());
        }
    }

    let img = image::load_from_memory(&bytes)
        .context("Failed to decode icon")?
        .to_rgba8();

    if img.dimensions() != (spec.pixel_size, spec.pixel_size) {
        bail!(
            "expected {}x{}, found {}x{}",
            spec.pixel_size,
            spec.pixel_size,
            img.width(),
            img.height()
        );
    }

    if let Some((x, y, pixel)) = img.enumerate_pixels().find(|(_, _, p)| **p != background) {
        bail!("pixel ({x}, {y}) is {:?}, expected {:?}", pixel.0, background.0);
    }

    Ok(())
}
