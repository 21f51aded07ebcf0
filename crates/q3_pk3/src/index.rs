//! Case-insensitive listings of archive contents

use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, instrument};

use crate::{error::Result, read::Pk3Archive};

/// The lower-cased set of every path contained in one or more PK3 archives.
///
/// Paths keep the order in which they were first seen, so iterating an index is
/// deterministic for a given set of archives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveIndex {
    paths: IndexSet<Box<str>>,
}

impl ArchiveIndex {
    /// Build the index of the archive at `path`.
    ///
    /// A path that does not exist yields an empty index rather than an error, so optional
    /// reference archives can simply be left out.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<ArchiveIndex> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("archive not present, using an empty index");
            return Ok(ArchiveIndex::default());
        }

        let index = Pk3Archive::open(path)?.index();
        debug!(entries = index.len(), "indexed archive");
        Ok(index)
    }

    /// Union of several indices, used to pool the point-release patch archives.
    pub fn merge(indices: impl IntoIterator<Item = ArchiveIndex>) -> ArchiveIndex {
        let mut merged = ArchiveIndex::default();
        for index in indices {
            merged.extend(index.paths);
        }
        merged
    }

    /// Number of distinct paths in the index
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the index has no paths
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether `path` is present, compared case-insensitively
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path.to_lowercase().as_str())
    }

    /// Iterate the lower-cased paths
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|p| p.as_ref())
    }

    /// Every distinct first-level folder below `textures/`, as a `textures/<name>/` prefix.
    ///
    /// Only real folders count: `textures/foo.tga` contributes nothing while
    /// `textures/foo/` and `textures/foo/bar.tga` both contribute `textures/foo/`.
    pub fn texture_folders(&self) -> IndexSet<String> {
        self.iter()
            .filter_map(|path| {
                let rest = path.strip_prefix("textures/")?;
                let (folder, _) = rest.split_once('/')?;
                (!folder.is_empty()).then(|| format!("textures/{}/", folder))
            })
            .collect()
    }
}

impl<S: AsRef<str>> Extend<S> for ArchiveIndex {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.paths
            .extend(iter.into_iter().map(|p| Box::<str>::from(p.as_ref().to_lowercase())));
    }
}

impl<S: AsRef<str>> FromIterator<S> for ArchiveIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut index = ArchiveIndex::default();
        index.extend(iter);
        index
    }
}
