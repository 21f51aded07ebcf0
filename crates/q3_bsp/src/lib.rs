//! This library reads asset references out of **IBSP** levels used by *Quake III Arena*.
//!
//! # IBSP Format Documentation
//!
//! A compiled Quake III level is a single `.bsp` file stored under `maps/` in a PK3 archive.
//! It starts with a small header followed by a directory of 17 lumps, each a contiguous
//! region of the file.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "IBSP"                                            |
//! | 0x0004         | Version                | 4 bytes: 46 for Quake III Arena, 47 for Quake Live         |
//! | 0x0008         | Lump directory         | 17 × 8 bytes: offset and length of each lump               |
//!
//! ### Lump Directory
//!
//! Each entry is a pair of signed 32-bit integers, the offset of the lump from the start of
//! the file and its length in bytes. Only two lumps name assets outside of the level:
//!
//! - **Lump 0, Entities**: a text block of `{ "key" "value" ... }` entity definitions,
//!   terminated with a NUL. The `model`, `model2` and `noise` keys name meshes and sounds;
//!   `model` values starting with `*` refer to brush models inside the level.
//! - **Lump 1, Textures**: a list of fixed size records, one per shader used by the level.
//!
//! ### Texture Record
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Name                   | 64 bytes: NUL padded shader or image path               |
//! | 0x0040         | Surface Flags          | 4 bytes: surface flags                                  |
//! | 0x0044         | Content Flags          | 4 bytes: content flags                                  |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.bsp`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod entity;
pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use entity::{EntityKey, EntityReference};
pub use read::BspFile;
pub use write::BspWriter;
