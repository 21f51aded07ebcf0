use std::{collections::BTreeSet, path::PathBuf};

use clap::Args;
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use q3_deps::extract::gather_dependencies;
use q3_pk3::Pk3Archive;

use crate::{commands::Format, source::MapSource};

#[derive(Args)]
pub struct DepsArgs {
    /// A map archive, as a local path or http(s) url
    #[arg(value_name = "MAP")]
    map: String,

    /// Where downloaded maps are stored
    #[arg(long, env = "Q3_DOWNLOAD_DIR", value_name = "DIR", default_value = "downloads")]
    download_dir: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl DepsArgs {
    pub fn handle(&self) -> Result<()> {
        let path = MapSource::parse(&self.map).fetch(&self.download_dir)?;
        let mut archive = Pk3Archive::open(&path).context(format!("path: {}", path.display()))?;
        let dependencies = gather_dependencies(&mut archive)
            .context(format!("reading dependencies of {}", path.display()))?;

        match self.format {
            Format::Text => {
                println!(
                    "{}",
                    dependencies.bsp.if_supports_color(Stdout, |t| t.bold())
                );
                print_group("Textures", &dependencies.textures);
                print_group("Entities", &dependencies.entities);
                print_group("Shaders", &dependencies.shaders);
            }
            Format::Json => {
                let json = serde_json::to_string_pretty(&dependencies)
                    .into_diagnostic()
                    .context("serializing dependencies")?;
                println!("{}", json);
            }
        }

        Ok(())
    }
}

fn print_group(title: &str, members: &BTreeSet<String>) {
    println!("\n{} ({})", title, members.len());
    if !members.is_empty() {
        println!("{}", members.iter().map(|m| format!("   {}", m)).join("\n"));
    }
}
