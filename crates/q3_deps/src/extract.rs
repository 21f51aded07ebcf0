//! Collecting the assets a map archive asks for

use std::{
    collections::BTreeSet,
    io::{Read, Seek},
};

use q3_bsp::BspFile;
use q3_pk3::Pk3Archive;
use q3_shader::ShaderScript;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result};

/// Every dependency declared by one map archive, split by where it was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapDependencies {
    /// Archive entry the level was read from
    pub bsp: String,

    /// Names from the level's texture lump
    pub textures: BTreeSet<String>,

    /// `model`, `model2` and `noise` values from the level's entities
    pub entities: BTreeSet<String>,

    /// Asset paths named by the archive's shader scripts
    pub shaders: BTreeSet<String>,
}

impl MapDependencies {
    /// Union of all origins, case preserved
    pub fn all(&self) -> BTreeSet<String> {
        self.textures
            .iter()
            .chain(&self.entities)
            .chain(&self.shaders)
            .cloned()
            .collect()
    }
}

/// Whether `name` is a level, `maps/*.bsp` compared case-insensitively
pub fn is_bsp(name: &str) -> bool {
    let name = name.to_lowercase();
    name.starts_with("maps/") && name.ends_with(".bsp")
}

/// Whether `name` is a shader script, `scripts/*.shader` compared case-insensitively
pub fn is_shader_script(name: &str) -> bool {
    let name = name.to_lowercase();
    name.starts_with("scripts/") && name.ends_with(".shader")
}

/// The first level in listing order.
///
/// Archives shipping several levels are rare; only the first one is inspected.
pub fn find_bsp<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut levels = names.into_iter().filter(|name| is_bsp(name));
    let first = levels.next()?;
    for other in levels {
        warn!(used = first, ignored = other, "map archive holds more than one bsp");
    }
    Some(first)
}

/// Read the level and shader scripts of a map archive and collect their dependencies.
#[instrument(skip_all)]
pub fn gather_dependencies<R: Read + Seek>(
    archive: &mut Pk3Archive<R>,
) -> Result<MapDependencies> {
    let bsp_name = find_bsp(archive.file_names())
        .map(str::to_owned)
        .ok_or(Error::NoBspFound)?;
    let shader_names = archive
        .file_names()
        .filter(|name| is_shader_script(name))
        .map(str::to_owned)
        .collect::<Vec<_>>();

    let data = archive.by_name(&bsp_name)?;
    let bsp = BspFile::new(&data)?;
    let textures = bsp.textures()?.into_iter().collect::<BTreeSet<_>>();
    let entities = bsp
        .entity_references()
        .into_iter()
        .map(|r| r.value)
        .collect::<BTreeSet<_>>();
    debug!(
        bsp = %bsp_name,
        textures = textures.len(),
        entities = entities.len(),
        "read level"
    );

    let mut shaders = BTreeSet::new();
    for name in &shader_names {
        let script = ShaderScript::from_bytes(&archive.by_name(name)?);
        let references = script.asset_references();
        debug!(script = %name, references = references.len(), "read shader script");
        shaders.extend(references);
    }

    let dependencies = MapDependencies {
        bsp: bsp_name,
        textures,
        entities,
        shaders,
    };
    info!(
        bsp = %dependencies.bsp,
        scripts = shader_names.len(),
        dependencies = dependencies.all().len(),
        "gathered map dependencies"
    );

    Ok(dependencies)
}
