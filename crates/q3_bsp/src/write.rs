//! Types for creating IBSP levels
//!
//! The writer only fills the lumps this crate reads back (entities and textures), every
//! other lump is left empty. That is enough to produce fixture levels for tooling tests.

use std::io::Cursor;

use binrw::BinWrite;

use crate::{
    error::Result,
    types::{BspHeader, Lump, LumpType, TextureRecord, BSP_VERSION, HEADER_SIZE, LUMP_COUNT},
};

/// IBSP writer
///
/// ```
/// use q3_bsp::{BspFile, BspWriter};
///
/// let data = BspWriter::new()
///     .texture("textures/base_wall/metal")
///     .entity(&[("classname", "misc_model"), ("model", "models/mapobjects/tree.md3")])
///     .finish()?;
///
/// let bsp = BspFile::new(&data)?;
/// assert_eq!(bsp.textures()?, vec!["textures/base_wall/metal"]);
/// # Ok::<(), q3_bsp::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BspWriter {
    version: u32,
    entities: String,
    textures: Vec<TextureRecord>,
}

impl Default for BspWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BspWriter {
    pub fn new() -> Self {
        Self {
            version: BSP_VERSION,
            entities: String::new(),
            textures: Vec::new(),
        }
    }

    /// Override the version written to the header
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Append raw text to the entity lump
    pub fn entities(mut self, text: &str) -> Self {
        self.entities.push_str(text);
        self
    }

    /// Append one entity definition built from key/value pairs
    pub fn entity(mut self, pairs: &[(&str, &str)]) -> Self {
        self.entities.push_str("{\n");
        for (key, value) in pairs {
            self.entities
                .push_str(&format!("\"{}\" \"{}\"\n", key, value));
        }
        self.entities.push_str("}\n");
        self
    }

    /// Append a record to the texture lump
    pub fn texture(mut self, name: &str) -> Self {
        self.textures.push(TextureRecord::new(name));
        self
    }

    /// Lay out the header and lumps and return the level bytes.
    pub fn finish(&self) -> Result<Vec<u8>> {
        let mut entities = self.entities.clone().into_bytes();
        entities.push(b'\0');

        let mut textures = Vec::new();
        {
            let mut cursor = Cursor::new(&mut textures);
            for record in &self.textures {
                record.write(&mut cursor)?;
            }
        }

        let entities_offset = HEADER_SIZE;
        let textures_offset = align4(entities_offset + entities.len());
        let end = textures_offset + textures.len();

        let mut header = BspHeader {
            version: self.version,
            lumps: [Lump {
                offset: end as i32,
                length: 0,
            }; LUMP_COUNT],
        };
        header.lumps[LumpType::Entities as usize] = Lump {
            offset: entities_offset as i32,
            length: entities.len() as i32,
        };
        header.lumps[LumpType::Textures as usize] = Lump {
            offset: textures_offset as i32,
            length: textures.len() as i32,
        };

        let mut data = Vec::with_capacity(end);
        header.write(&mut Cursor::new(&mut data))?;
        data.extend_from_slice(&entities);
        data.resize(textures_offset, 0);
        data.extend_from_slice(&textures);

        Ok(data)
    }
}

fn align4(value: usize) -> usize {
    (value + 3) & !3
}
