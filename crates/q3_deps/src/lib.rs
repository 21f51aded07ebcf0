//! This library decides whether a *Quake III Arena* custom map can be played on the **demo**
//! client.
//!
//! The demo ships a single `pak0.pk3` holding a fraction of the retail assets. A custom map
//! loads on the demo only if every texture, model, sound and shader image it uses comes from
//! the map archive itself, the demo data, or the free point releases (`pak1.pk3` …
//! `pak7.pk3`).
//!
//! # Pipeline
//!
//! | Step    | Module                 | Output                                              |
//! |---------|------------------------|-----------------------------------------------------|
//! | Gather  | [`extract`]            | [`MapDependencies`] from the level and shaders      |
//! | Load    | [`config`]             | [`ReferenceSets`] for the demo, patch, retail data  |
//! | Resolve | [`resolve`]            | [`Classification`] of every dependency              |
//! | Report  | [`report`]             | [`Report`] with counts and a [`Verdict`]            |
//!
//! Reference sets are loaded once and shared by every map checked afterwards.
//!
//! ```no_run
//! use q3_deps::config::{CheckerConfig, ReferenceSets};
//!
//! fn check(map: &std::path::Path) -> q3_deps::error::Result<()> {
//!     let config = CheckerConfig::with_base_dir("/games/quake3");
//!     let references = ReferenceSets::load(&config)?;
//!
//!     let report = q3_deps::check_map(map, &references, &config)?;
//!     println!("{}: {}", report.map.display(), report.verdict.summary());
//!     Ok(())
//! }
//! ```
//!

use std::{
    io::{Read, Seek},
    path::{Path, PathBuf},
};

use q3_pk3::Pk3Archive;
use tracing::{info, instrument};

pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod resolve;

pub use config::{CheckerConfig, ReferenceSets};
pub use extract::MapDependencies;
pub use report::{Report, Verdict};
pub use resolve::{Bucket, Classification, Resolver};

use crate::error::Result;

/// Check the map archive stored at `path`.
#[instrument(skip_all, fields(map = %path.as_ref().display()))]
pub fn check_map(
    path: impl AsRef<Path>,
    references: &ReferenceSets,
    config: &CheckerConfig,
) -> Result<Report> {
    let mut archive = Pk3Archive::open(path.as_ref())?;
    check_archive(path.as_ref(), &mut archive, references, config)
}

/// Check an already opened map archive, reporting it under `name`.
pub fn check_archive<R: Read + Seek>(
    name: impl Into<PathBuf>,
    archive: &mut Pk3Archive<R>,
    references: &ReferenceSets,
    config: &CheckerConfig,
) -> Result<Report> {
    let dependencies = extract::gather_dependencies(archive)?;
    let map_index = archive.index();

    let classification =
        Resolver::new(&map_index, references, config).resolve(dependencies.all());
    let report = Report::new(name, dependencies, classification);

    info!(
        map = %report.map.display(),
        verdict = %report.verdict,
        full = report.counts.full,
        missing = report.counts.missing,
        "checked map"
    );

    Ok(report)
}
