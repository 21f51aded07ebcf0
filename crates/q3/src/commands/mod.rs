pub mod check;
pub mod deps;
pub mod index;

use clap::ValueEnum;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable report
    #[default]
    Text,
    /// Machine readable report
    Json,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Check whether maps can be played with the demo data
    Check(check::CheckArgs),
    /// List the dependencies a map declares, without resolving them
    Deps(deps::DepsArgs),
    /// List the lower-cased contents of an archive
    Index(index::IndexArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Check(check) => check.handle(),
            Commands::Deps(deps) => deps.handle(),
            Commands::Index(index) => index.handle(),
        }
    }
}
