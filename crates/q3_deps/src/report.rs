//! Counts and verdict for one checked map

use std::{fmt, path::PathBuf};

use crate::{
    extract::MapDependencies,
    resolve::{Bucket, Classification},
};

/// Largest number of retail-only assets a map may need and still be worth trying on the demo
pub const PROBABLY_PLAYABLE_LIMIT: usize = 5;

/// Whether a map can be played on the demo client
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "verdict", content = "full_only", rename_all = "snake_case")
)]
pub enum Verdict {
    /// Nothing is needed from the retail data
    Playable,
    /// A handful of retail-only assets, the map probably still loads
    Probably(usize),
    /// Too many retail-only assets
    NotPlayable(usize),
}

impl Verdict {
    /// The verdict for a map needing `full` assets found only in the retail data.
    pub fn from_full_count(full: usize) -> Self {
        match full {
            0 => Verdict::Playable,
            n if n <= PROBABLY_PLAYABLE_LIMIT => Verdict::Probably(n),
            n => Verdict::NotPlayable(n),
        }
    }

    /// Number of retail-only assets behind the verdict
    pub fn full_count(self) -> usize {
        match self {
            Verdict::Playable => 0,
            Verdict::Probably(n) | Verdict::NotPlayable(n) => n,
        }
    }

    /// One-line summary for reports
    pub fn summary(self) -> String {
        match self {
            Verdict::Playable => {
                "YES, all dependencies satisfied by map/demo/patch; playable on demo".into()
            }
            Verdict::Probably(n) => format!("PROBABLY, only {} asset(s) require full pak0", n),
            Verdict::NotPlayable(n) => format!("NO, requires {} assets only in full pak0", n),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Playable => "fully demo-playable",
            Verdict::Probably(_) => "probably demo-playable",
            Verdict::NotPlayable(_) => "not demo-playable",
        })
    }
}

/// Size of every bucket
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BucketCounts {
    pub map: usize,
    pub demo: usize,
    pub patch: usize,
    pub full: usize,
    pub missing: usize,
}

impl BucketCounts {
    pub fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Map => self.map,
            Bucket::Demo => self.demo,
            Bucket::Patch => self.patch,
            Bucket::Full => self.full,
            Bucket::Missing => self.missing,
        }
    }
}

impl From<&Classification> for BucketCounts {
    fn from(classification: &Classification) -> Self {
        Self {
            map: classification.map.len(),
            demo: classification.demo.len(),
            patch: classification.patch.len(),
            full: classification.full.len(),
            missing: classification.missing.len(),
        }
    }
}

/// Everything known about one checked map
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// The map archive that was checked
    pub map: PathBuf,

    /// What the archive declares
    pub dependencies: MapDependencies,

    pub counts: BucketCounts,
    pub classification: Classification,
    pub verdict: Verdict,
}

impl Report {
    pub fn new(
        map: impl Into<PathBuf>,
        dependencies: MapDependencies,
        classification: Classification,
    ) -> Self {
        let counts = BucketCounts::from(&classification);
        Self {
            map: map.into(),
            dependencies,
            counts,
            verdict: Verdict::from_full_count(counts.full),
            classification,
        }
    }

    /// Number of dependencies skipped by the ignore lists
    pub fn ignored(&self) -> usize {
        self.classification.ignored.len()
    }
}
