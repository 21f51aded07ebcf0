//! Where the reference archives live and which dependencies to skip

use std::path::{Path, PathBuf};

use bon::Builder;
use q3_pk3::ArchiveIndex;
use tracing::{info, instrument};

use crate::error::Result;

/// Game folder every archive path is relative to
pub const GAME_DIR: &str = "baseq3";

/// Retail point releases ship `pak1.pk3` through `pak7.pk3`
pub const PATCH_COUNT: u32 = 7;

/// Path prefixes the engine or editor provides, skipped before resolution
pub const DEFAULT_IGNORE_PATHS: [&str; 2] = ["textures/common/", "textures/radiant/notex"];

/// Engine-internal shader names, skipped before resolution
pub const DEFAULT_IGNORE_TERMS: [&str; 5] = [
    "noshader",
    "shadernotfound",
    "$lightmap",
    "$whiteimage",
    "flareshader",
];

/// Options for where the reference archives are and which dependencies never count
///
/// ```
/// use q3_deps::config::CheckerConfig;
///
/// let config = CheckerConfig::builder()
///     .demo_pak("demo/baseq3/pak0.pk3")
///     .full_pak("retail/baseq3/pak0.pk3")
///     .build();
///
/// assert_eq!(config.patch_paks.len(), 7);
/// assert!(config.ignore_terms.contains(&"$lightmap".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CheckerConfig {
    /// The demo client's `pak0.pk3`
    #[builder(into, default = Path::new(GAME_DIR).join("pak0-demo.pk3"))]
    pub demo_pak: PathBuf,

    /// The retail game's `pak0.pk3`
    #[builder(into, default = Path::new(GAME_DIR).join("pak0-full.pk3"))]
    pub full_pak: PathBuf,

    /// The point release archives, pooled into one index
    #[builder(default = patch_paks(Path::new(GAME_DIR)))]
    pub patch_paks: Vec<PathBuf>,

    /// Dependencies starting with one of these, compared lower-cased, are skipped
    #[builder(default = DEFAULT_IGNORE_PATHS.iter().map(|p| p.to_string()).collect())]
    pub ignore_paths: Vec<String>,

    /// Dependencies equal to one of these, compared lower-cased, are skipped
    #[builder(default = DEFAULT_IGNORE_TERMS.iter().map(|t| t.to_string()).collect())]
    pub ignore_terms: Vec<String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CheckerConfig {
    /// The default archive layout below a game install at `base_dir`.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let game_dir = base_dir.as_ref().join(GAME_DIR);
        Self::builder()
            .demo_pak(game_dir.join("pak0-demo.pk3"))
            .full_pak(game_dir.join("pak0-full.pk3"))
            .patch_paks(patch_paks(&game_dir))
            .build()
    }
}

/// `pak1.pk3` … `pak7.pk3` inside `game_dir`
pub fn patch_paks(game_dir: &Path) -> Vec<PathBuf> {
    (1..=PATCH_COUNT)
        .map(|i| game_dir.join(format!("pak{}.pk3", i)))
        .collect()
}

/// The indices every map is resolved against
///
/// Loaded once and shared read-only between any number of map checks.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSets {
    /// Contents of the demo `pak0.pk3`
    pub demo: ArchiveIndex,

    /// Union of every point release archive
    pub patch: ArchiveIndex,

    /// Contents of the retail `pak0.pk3`
    pub full: ArchiveIndex,
}

impl ReferenceSets {
    /// Index the archives named by `config`. Missing archives contribute nothing.
    #[instrument(skip_all)]
    pub fn load(config: &CheckerConfig) -> Result<ReferenceSets> {
        let demo = ArchiveIndex::load(&config.demo_pak)?;
        let full = ArchiveIndex::load(&config.full_pak)?;
        let patch = ArchiveIndex::merge(
            config
                .patch_paks
                .iter()
                .map(ArchiveIndex::load)
                .collect::<q3_pk3::error::Result<Vec<_>>>()?,
        );

        info!(
            demo = demo.len(),
            patch = patch.len(),
            full = full.len(),
            "loaded reference archives"
        );

        Ok(ReferenceSets { demo, patch, full })
    }
}
