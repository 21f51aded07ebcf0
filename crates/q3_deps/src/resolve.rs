//! Matching dependencies against the map, demo, patch and retail archives

use std::fmt;

use indexmap::IndexSet;
use q3_pk3::ArchiveIndex;
use tracing::{debug, instrument, trace};

use crate::config::{CheckerConfig, ReferenceSets};

/// Where a dependency was satisfied, in priority order
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bucket {
    /// Shipped by the map archive itself
    Map,
    /// Present in the demo `pak0.pk3`
    Demo,
    /// Present in a point release archive
    Patch,
    /// Only present in the retail `pak0.pk3`
    Full,
    /// Not found anywhere
    Missing,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Map,
        Bucket::Demo,
        Bucket::Patch,
        Bucket::Full,
        Bucket::Missing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Map => "map pk3",
            Bucket::Demo => "demo pak0",
            Bucket::Patch => "patches pak1-7",
            Bucket::Full => "full pak0",
            Bucket::Missing => "missing",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Look `base` up in `set`, letting `.tga` and `.jpg` stand in for each other.
///
/// The renderer tries both image formats for any texture, so:
///
/// - a path without extension tries `.tga`, `.jpg`, then the bare path
/// - a `.tga` path also tries `.jpg`, and a `.jpg` path also tries `.tga`
/// - any other extension must match exactly
///
/// Returns the lower-cased candidate that matched.
pub fn find_in_set(base: &str, set: &ArchiveIndex) -> Option<String> {
    candidates(&base.to_lowercase())
        .into_iter()
        .find(|candidate| set.contains(candidate))
}

fn candidates(low: &str) -> Vec<String> {
    let name = low.rsplit('/').next().unwrap_or(low);

    if !name.contains('.') {
        vec![format!("{}.tga", low), format!("{}.jpg", low), low.to_owned()]
    } else if let Some(stem) = low.strip_suffix(".tga") {
        vec![low.to_owned(), format!("{}.jpg", stem)]
    } else if let Some(stem) = low.strip_suffix(".jpg") {
        vec![low.to_owned(), format!("{}.tga", stem)]
    } else {
        vec![low.to_owned()]
    }
}

/// Dependencies sorted into buckets
///
/// Every list is kept sorted so two runs over the same inputs compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Classification {
    pub map: Vec<String>,
    pub demo: Vec<String>,
    pub patch: Vec<String>,
    pub full: Vec<String>,
    pub missing: Vec<String>,

    /// Dependencies skipped by the ignore lists
    pub ignored: Vec<String>,
}

impl Classification {
    /// Members of `bucket`
    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Map => &self.map,
            Bucket::Demo => &self.demo,
            Bucket::Patch => &self.patch,
            Bucket::Full => &self.full,
            Bucket::Missing => &self.missing,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Map => &mut self.map,
            Bucket::Demo => &mut self.demo,
            Bucket::Patch => &mut self.patch,
            Bucket::Full => &mut self.full,
            Bucket::Missing => &mut self.missing,
        }
    }

    /// Number of classified dependencies, not counting ignored ones
    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sort(&mut self) {
        for bucket in Bucket::ALL {
            self.bucket_mut(bucket).sort();
        }
        self.ignored.sort();
    }
}

/// Classifies the dependencies of one map
pub struct Resolver<'a> {
    map: &'a ArchiveIndex,
    texture_folders: IndexSet<String>,
    references: &'a ReferenceSets,
    ignore_paths: Vec<String>,
    ignore_terms: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        map: &'a ArchiveIndex,
        references: &'a ReferenceSets,
        config: &CheckerConfig,
    ) -> Self {
        let texture_folders = map.texture_folders();
        debug!(folders = texture_folders.len(), "map ships texture folders");

        Self {
            map,
            texture_folders,
            references,
            ignore_paths: config.ignore_paths.iter().map(|p| p.to_lowercase()).collect(),
            ignore_terms: config.ignore_terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Whether `dependency` is engine provided and never needs resolving
    pub fn is_ignored(&self, dependency: &str) -> bool {
        let low = dependency.to_lowercase();
        self.ignore_terms.iter().any(|term| *term == low)
            || self.ignore_paths.iter().any(|path| low.starts_with(path.as_str()))
    }

    /// The bucket `dependency` lands in, `None` when it is ignored.
    pub fn classify(&self, dependency: &str) -> Option<Bucket> {
        if self.is_ignored(dependency) {
            return None;
        }

        // anything under a texture folder the map ships is assumed to be provided by it
        let low = dependency.to_lowercase();
        if self
            .texture_folders
            .iter()
            .any(|folder| low.starts_with(folder.as_str()))
        {
            return Some(Bucket::Map);
        }

        let sets = [
            (Bucket::Map, self.map),
            (Bucket::Demo, &self.references.demo),
            (Bucket::Patch, &self.references.patch),
            (Bucket::Full, &self.references.full),
        ];
        let bucket = sets
            .into_iter()
            .find_map(|(bucket, set)| {
                let found = find_in_set(dependency, set)?;
                trace!(dependency, found = %found, %bucket, "matched");
                Some(bucket)
            })
            .unwrap_or(Bucket::Missing);

        Some(bucket)
    }

    /// Sort every dependency into its bucket.
    #[instrument(skip_all)]
    pub fn resolve<I, S>(&self, dependencies: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classification = Classification::default();
        for dependency in dependencies {
            let dependency = dependency.as_ref();
            match self.classify(dependency) {
                Some(bucket) => {
                    debug!(dependency, %bucket, "classified");
                    classification
                        .bucket_mut(bucket)
                        .push(dependency.to_owned());
                }
                None => classification.ignored.push(dependency.to_owned()),
            }
        }
        classification.sort();
        classification
    }
}
