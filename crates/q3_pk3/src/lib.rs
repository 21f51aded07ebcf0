//! This library handles indexing and reading **PK3** archives used by *Quake III Arena*.
//!
//! # PK3 Archive Format Documentation
//!
//! A PK3 is a plain zip archive, renamed so the engine can tell its content packs apart from
//! other files in the game directory. The engine mounts every PK3 under `baseq3/` in
//! alphabetical order, so later archives (`pak1.pk3` … `pak8.pk3`) patch files shipped in
//! `pak0.pk3`.
//!
//! ## Layout
//!
//! Paths inside an archive are relative to the game directory and use `/` as separator. The
//! engine compares them case-insensitively, which is why [`ArchiveIndex`] lower-cases every
//! path it stores.
//!
//! | Folder       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | `maps/`      | Compiled levels (`.bsp`) and their arena/ai data                 |
//! | `textures/`  | Surface images (`.tga`, `.jpg`), usually one folder per map set  |
//! | `scripts/`   | Shader scripts (`.shader`) describing how surfaces render        |
//! | `models/`    | Meshes (`.md3`) and their skins                                  |
//! | `sound/`     | Sound effects (`.wav`)                                           |
//! | `levelshots/`| Loading screen images                                            |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.pk3`
//! - **Compression Methods**: stored or deflate
//!

pub mod error;
pub mod index;
pub mod read;

pub use index::ArchiveIndex;
pub use read::Pk3Archive;
