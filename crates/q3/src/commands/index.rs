use std::path::PathBuf;

use clap::Args;
use miette::{miette, Context, Result};
use q3_pk3::ArchiveIndex;

#[derive(Args)]
pub struct IndexArgs {
    /// An input PK3 file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Only list the `textures/<folder>/` prefixes the archive provides
    #[arg(long, default_value_t = false)]
    texture_folders: bool,
}

impl IndexArgs {
    pub fn handle(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(miette!("{} does not exist", self.file.display()));
        }
        let index = ArchiveIndex::load(&self.file)
            .context(format!("path: {}", self.file.display()))?;

        if self.texture_folders {
            for folder in index.texture_folders() {
                println!("{}", folder);
            }
        } else {
            for path in index.iter() {
                println!("{}", path);
            }
        }

        Ok(())
    }
}
