//! Base types for the structure of an IBSP file.

use std::fmt;

use binrw::{BinRead, BinWrite};

/// Number of entries in the lump directory
pub const LUMP_COUNT: usize = 17;

/// Magic identifier every Quake III level starts with
pub const BSP_MAGIC: &[u8; 4] = b"IBSP";

/// Version written by the retail `q3map` compiler
pub const BSP_VERSION: u32 = 46;

/// Size in bytes of the magic, version and lump directory
pub const HEADER_SIZE: usize = 8 + LUMP_COUNT * 8;

/// Size in bytes of one record in the texture lump
pub const TEXTURE_RECORD_SIZE: usize = 72;

/// Size in bytes of the NUL padded name inside a texture record
pub const TEXTURE_NAME_SIZE: usize = 64;

/// IBSP file header
///
/// Defines the header of the level which always starts with "IBSP", followed by a version
/// and the lump directory. All data is stored in little endian format.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(magic = b"IBSP", little)]
pub struct BspHeader {
    /// Format version, 46 for retail Quake III Arena
    pub version: u32,

    /// Location of every lump in the file, indexed by [`LumpType`]
    pub lumps: [Lump; LUMP_COUNT],
}

impl Default for BspHeader {
    fn default() -> Self {
        Self {
            version: BSP_VERSION,
            lumps: [Lump::default(); LUMP_COUNT],
        }
    }
}

impl BspHeader {
    /// Directory entry for `lump`
    pub fn lump(&self, lump: LumpType) -> Lump {
        self.lumps[lump as usize]
    }
}

/// Entry of the lump directory
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct Lump {
    /// Offset of the lump from the start of the file
    pub offset: i32,

    /// Length of the lump in bytes
    pub length: i32,
}

/// Texture lump record
///
/// Each surface of the level names the shader it is drawn with through one of these.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct TextureRecord {
    /// Shader or image path, NUL padded
    pub name: [u8; TEXTURE_NAME_SIZE],

    /// Surface flags
    pub surface_flags: i32,

    /// Content flags
    pub content_flags: i32,
}

impl TextureRecord {
    /// Create a record for `name` with no flags set.
    ///
    /// Names are cut to 63 bytes so the record always keeps a terminating NUL.
    pub fn new(name: &str) -> Self {
        let mut raw = [0u8; TEXTURE_NAME_SIZE];
        let bytes = name.as_bytes();
        let len = bytes.len().min(TEXTURE_NAME_SIZE - 1);
        raw[..len].copy_from_slice(&bytes[..len]);

        Self {
            name: raw,
            surface_flags: 0,
            content_flags: 0,
        }
    }

    /// The record's name up to the first NUL, with non-ASCII bytes dropped.
    pub fn name(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|b| *b == b'\0')
            .unwrap_or(TEXTURE_NAME_SIZE);
        decode_ascii_lossy(&self.name[..end])
    }
}

/// Decode `bytes` as ASCII, silently dropping anything outside of it.
pub fn decode_ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|b| b.is_ascii())
        .map(|b| *b as char)
        .collect()
}

/// The lumps of an IBSP level, in directory order
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LumpType {
    Entities = 0,
    Textures = 1,
    Planes = 2,
    Nodes = 3,
    Leafs = 4,
    LeafFaces = 5,
    LeafBrushes = 6,
    Models = 7,
    Brushes = 8,
    BrushSides = 9,
    Vertices = 10,
    MeshVerts = 11,
    Effects = 12,
    Faces = 13,
    Lightmaps = 14,
    LightVols = 15,
    VisData = 16,
}

impl LumpType {
    pub fn name(self) -> &'static str {
        match self {
            LumpType::Entities => "entities",
            LumpType::Textures => "textures",
            LumpType::Planes => "planes",
            LumpType::Nodes => "nodes",
            LumpType::Leafs => "leafs",
            LumpType::LeafFaces => "leaf_faces",
            LumpType::LeafBrushes => "leaf_brushes",
            LumpType::Models => "models",
            LumpType::Brushes => "brushes",
            LumpType::BrushSides => "brush_sides",
            LumpType::Vertices => "vertices",
            LumpType::MeshVerts => "meshverts",
            LumpType::Effects => "effects",
            LumpType::Faces => "faces",
            LumpType::Lightmaps => "lightmaps",
            LumpType::LightVols => "lightvols",
            LumpType::VisData => "visdata",
        }
    }
}

impl fmt::Display for LumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
