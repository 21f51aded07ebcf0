//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// The map or a reference archive could not be opened or read
    #[error(transparent)]
    #[diagnostic(transparent)]
    Archive(#[from] q3_pk3::error::Error),

    /// The map archive has no level under `maps/`
    #[error("no bsp found in map pk3")]
    #[diagnostic(help("a map pk3 must contain a compiled level at maps/<name>.bsp"))]
    NoBspFound,

    /// The level inside the map archive is unusable
    #[error(transparent)]
    #[diagnostic(transparent)]
    Bsp(#[from] q3_bsp::error::Error),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
