//! Types for reading PK3 archives
//!

use std::{
    fmt::{self, Debug},
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use tracing::{debug, instrument};
use zip::ZipArchive;

use crate::{
    error::{Error, FileNotFoundError, Result},
    index::ArchiveIndex,
};

/// PK3 archive reader
///
/// Entries are always read whole into memory, the level and shader files this crate is
/// used for are small enough that streaming them buys nothing.
///
/// ```no_run
/// fn list_pk3_contents(path: &std::path::Path) -> q3_pk3::error::Result<()> {
///     let mut pk3 = q3_pk3::Pk3Archive::open(path)?;
///
///     let names = pk3.file_names().map(str::to_owned).collect::<Vec<_>>();
///     for name in names {
///         let data = pk3.by_name(&name)?;
///         println!("{}: {} bytes", name, data.len());
///     }
///
///     Ok(())
/// }
/// ```
pub struct Pk3Archive<R> {
    inner: ZipArchive<R>,
}

impl<R: Read + Seek> Debug for Pk3Archive<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pk3Archive({} entries)", self.inner.len())
    }
}

impl Pk3Archive<BufReader<File>> {
    /// Open the PK3 archive stored at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> Pk3Archive<R> {
    /// Read a PK3 archive collecting the files it contains.
    pub fn new(reader: R) -> Result<Pk3Archive<R>> {
        let inner = ZipArchive::new(reader).map_err(Error::InvalidArchive)?;
        debug!(entries = inner.len(), "opened pk3 archive");

        Ok(Pk3Archive { inner })
    }

    /// Number of entries contained in this PK3.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether this PK3 archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all the file and directory names in this archive, in the
    /// order they are listed in the central directory.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.inner.file_names()
    }

    /// Get the index of a file entry by name, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.inner.index_for_name(name)
    }

    /// Read the contents of a file entry by name
    pub fn by_name(&mut self, name: &str) -> Result<Vec<u8>> {
        let Some(index) = self.index_for_name(name) else {
            return Err(Error::FileNotFound(FileNotFoundError::Name(
                name.to_owned(),
            )));
        };
        self.by_index(index)
    }

    /// Read the contents of a file entry by index
    pub fn by_index(&mut self, file_number: usize) -> Result<Vec<u8>> {
        let mut file = self.inner.by_index(file_number).map_err(|err| match err {
            zip::result::ZipError::FileNotFound => {
                Error::FileNotFound(FileNotFoundError::Index(file_number))
            }
            other => Error::from(other),
        })?;

        let mut buffer = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// Build the lower-cased [`ArchiveIndex`] of every entry in this archive.
    pub fn index(&self) -> ArchiveIndex {
        self.file_names().collect()
    }

    /// Unwrap and return the inner reader object
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}
