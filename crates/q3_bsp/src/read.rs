//! Types for reading IBSP levels
//!

use std::{collections::BTreeSet, io::Cursor};

use binrw::BinRead;
use tracing::{trace, warn};

use crate::{
    entity::{entity_references, EntityReference},
    error::{Error, Result},
    types::{
        decode_ascii_lossy, BspHeader, LumpType, TextureRecord, BSP_MAGIC, HEADER_SIZE,
        TEXTURE_RECORD_SIZE,
    },
};

/// A parsed view over the bytes of an IBSP level
///
/// Only the header is decoded up front. Lumps are sliced out of the borrowed data on demand.
///
/// ```no_run
/// fn print_textures(data: &[u8]) -> q3_bsp::error::Result<()> {
///     let bsp = q3_bsp::BspFile::new(data)?;
///
///     for name in bsp.textures()? {
///         println!("{}", name);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BspFile<'a> {
    header: BspHeader,
    data: &'a [u8],
}

impl<'a> BspFile<'a> {
    /// Check the magic and read the lump directory of `data`.
    pub fn new(data: &'a [u8]) -> Result<BspFile<'a>> {
        if data.get(0..4) != Some(BSP_MAGIC.as_slice()) {
            return Err(Error::InvalidMagic);
        }
        if data.len() < HEADER_SIZE {
            return Err(Error::Truncated(data.len()));
        }

        let header = BspHeader::read(&mut Cursor::new(data)).map_err(|err| match err {
            binrw::Error::BadMagic { .. } => Error::InvalidMagic,
            other => Error::from(other),
        })?;
        trace!(version = header.version, "read bsp header");

        Ok(BspFile { header, data })
    }

    /// The decoded header
    pub fn header(&self) -> &BspHeader {
        &self.header
    }

    /// Raw bytes of `lump`, cut short where the file ends before the lump does.
    ///
    /// A lump with a negative offset or length reads as empty.
    pub fn lump(&self, lump: LumpType) -> &'a [u8] {
        let entry = self.header.lump(lump);

        let (Ok(start), Ok(length)) = (
            usize::try_from(entry.offset),
            usize::try_from(entry.length),
        ) else {
            warn!(
                %lump,
                offset = entry.offset,
                length = entry.length,
                "bsp lump has a negative offset or length"
            );
            return &[];
        };

        let start = start.min(self.data.len());
        let end = start.saturating_add(length).min(self.data.len());
        if end - start < length {
            warn!(
                %lump,
                offset = entry.offset,
                length = entry.length,
                available = end - start,
                "bsp lump runs past the end of the file"
            );
        }

        &self.data[start..end]
    }

    /// Every record of the texture lump.
    ///
    /// The record count comes from the directory length. A length that is not a multiple of
    /// the record size drops the trailing bytes, while a record cut off by the end of the file
    /// is read with its missing bytes zeroed.
    pub fn texture_records(&self) -> Result<Vec<TextureRecord>> {
        let lump = self.lump(LumpType::Textures);
        let declared = usize::try_from(self.header.lump(LumpType::Textures).length).unwrap_or(0);

        let remainder = declared % TEXTURE_RECORD_SIZE;
        if remainder != 0 {
            warn!(
                length = declared,
                remainder, "texture lump has a trailing partial record"
            );
        }

        let count = declared / TEXTURE_RECORD_SIZE;
        let mut records = Vec::with_capacity(count.min(lump.len() / TEXTURE_RECORD_SIZE + 1));
        for chunk in lump.chunks(TEXTURE_RECORD_SIZE).take(count) {
            let mut raw = [0u8; TEXTURE_RECORD_SIZE];
            raw[..chunk.len()].copy_from_slice(chunk);
            records.push(TextureRecord::read(&mut Cursor::new(&raw[..]))?);
        }

        Ok(records)
    }

    /// Non-empty names from the texture lump, in lump order.
    pub fn textures(&self) -> Result<Vec<String>> {
        Ok(self
            .texture_records()?
            .iter()
            .map(TextureRecord::name)
            .filter(|name| !name.is_empty())
            .collect())
    }

    /// The entity lump as text, with non-ASCII bytes dropped.
    pub fn entities(&self) -> String {
        decode_ascii_lossy(self.lump(LumpType::Entities))
    }

    /// Asset references from the entity lump
    pub fn entity_references(&self) -> Vec<EntityReference> {
        entity_references(&self.entities())
    }

    /// Every asset this level names: texture names and entity references.
    pub fn dependencies(&self) -> Result<BTreeSet<String>> {
        let mut dependencies: BTreeSet<String> = self.textures()?.into_iter().collect();
        dependencies.extend(self.entity_references().into_iter().map(|r| r.value));
        Ok(dependencies)
    }
}
