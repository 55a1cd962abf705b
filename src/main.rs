use anyhow::Result;
use appicon_gen::cli::AppiconsetArgs;
use appicon_gen::icon_gen::{self, GeneratorConfig};
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "appicon-gen",
    about = "Generate solid-color placeholder icons for every entry in an appiconset"
)]
struct Args {
    #[clap(flatten)]
    target: AppiconsetArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = GeneratorConfig {
        appiconset: args.target.into_path(),
        ..GeneratorConfig::default()
    };

    icon_gen::generate_icons(&config)?;
    Ok(())
}
