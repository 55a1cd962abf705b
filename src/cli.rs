use crate::icon_gen::DEFAULT_APPICONSET;
use clap::Args;
use std::path::PathBuf;

/// The appiconset location, given as `--appiconset <DIR>` or as a bare path.
#[derive(Debug, Args)]
pub struct AppiconsetArgs {
    /// Path to the AppIcon.appiconset directory containing Contents.json.
    #[clap(long, value_name = "APPICONSET", conflicts_with = "dir")]
    appiconset: Option<PathBuf>,

    /// Same as --appiconset.
    #[clap(value_name = "DIR", hide = true)]
    dir: Option<PathBuf>,
}

impl AppiconsetArgs {
    pub fn into_path(self) -> PathBuf {
        self.appiconset
            .or(self.dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_APPICONSET))
    }
}
