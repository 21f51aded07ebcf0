//! Asset references in the entity lump
//!
//! The entity lump is a free-form text block of `{ "key" "value" ... }` definitions. Only
//! a handful of keys name files outside of the level itself, those are picked out with a
//! pattern scan instead of a full entity parser.

use std::{fmt, sync::LazyLock};

use regex::Regex;

/// One pattern per key, so a value that looks like a key is still scanned for the others
static ENTITY_PATTERNS: LazyLock<[(EntityKey, Regex); 3]> = LazyLock::new(|| {
    EntityKey::ALL.map(|key| {
        let pattern = format!(r#""{}"\s*"([^"]+)""#, key.as_str());
        (key, Regex::new(&pattern).expect("entity pattern is valid"))
    })
});

/// Entity keys whose values name external assets
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKey {
    /// `model`, a mesh or an inline brush model (`*N`)
    Model,
    /// `model2`, an additional mesh drawn by movers and misc models
    Model2,
    /// `noise`, a looping or triggered sound
    Noise,
}

impl EntityKey {
    pub const ALL: [EntityKey; 3] = [EntityKey::Model, EntityKey::Model2, EntityKey::Noise];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKey::Model => "model",
            EntityKey::Model2 => "model2",
            EntityKey::Noise => "noise",
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key/value pair naming an asset the level loads at runtime
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityReference {
    pub key: EntityKey,
    pub value: String,
}

/// Scan an entity block for asset references, grouped by key.
///
/// Inline brush models (`"model" "*3"`) live inside the level and are skipped.
pub fn entity_references(text: &str) -> Vec<EntityReference> {
    ENTITY_PATTERNS
        .iter()
        .flat_map(|(key, pattern)| {
            pattern.captures_iter(text).filter_map(move |caps| {
                let value = caps.get(1)?.as_str();
                (!value.starts_with('*')).then(|| EntityReference {
                    key: *key,
                    value: value.to_owned(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::entity::{entity_references, EntityKey, EntityReference};

    #[test]
    fn finds_model_and_sound_references() {
        let text = r#"{
"classname" "worldspawn"
"message" "Tig's Den"
}
{
"classname" "misc_model"
"model" "models/mapobjects/tree.md3"
}
{
"classname" "func_door"
"model2"	"models/weapons2/gauntlet/gauntlet.md3"
"noise" "sound/world/hum.wav"
}
"#;

        assert_eq!(
            entity_references(text),
            vec![
                EntityReference {
                    key: EntityKey::Model,
                    value: "models/mapobjects/tree.md3".into()
                },
                EntityReference {
                    key: EntityKey::Model2,
                    value: "models/weapons2/gauntlet/gauntlet.md3".into()
                },
                EntityReference {
                    key: EntityKey::Noise,
                    value: "sound/world/hum.wav".into()
                },
            ]
        );
    }

    #[test]
    fn skips_brush_models() {
        let text = r#"{ "classname" "func_plat" "model" "*3" }"#;

        assert!(entity_references(text).is_empty());
    }

    #[test]
    fn key_names_used_as_values_are_scanned_per_key() {
        let text = r#"{ "noise" "model" "models/a.md3" }"#;

        assert_eq!(
            entity_references(text),
            vec![
                EntityReference {
                    key: EntityKey::Model,
                    value: "models/a.md3".into()
                },
                EntityReference {
                    key: EntityKey::Noise,
                    value: "model".into()
                },
            ]
        );
    }

    #[test]
    fn ignores_other_keys_and_empty_values() {
        let text = r#"{ "music" "music/sonic1.wav" "model" "" "targetname" "model" }"#;

        assert!(entity_references(text).is_empty());
    }
}
