//! Types for scanning shader scripts
//!

use std::{borrow::Cow, collections::BTreeSet, fmt, sync::LazyLock};

use regex::Regex;
use tracing::trace;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern is valid"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//.*").expect("line comment pattern is valid"));

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(qer_editorImage|map|clampMap|animMap)\b\s+(\S+)")
        .expect("directive pattern is valid")
});

/// Folders a directive argument must live under to count as an asset reference
pub const ASSET_ROOTS: [&str; 3] = ["textures/", "models/", "sound/"];

/// Shader keywords whose first argument is an asset path
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Directive {
    /// `qer_editorImage`, the preview image shown by the level editor
    EditorImage,
    /// `map`, a texture stage image
    Map,
    /// `clampMap`, a texture stage image that does not tile
    ClampMap,
    /// `animMap`, an animated stage; its first argument is the frame rate
    AnimMap,
}

impl Directive {
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::EditorImage => "qer_editorImage",
            Directive::Map => "map",
            Directive::ClampMap => "clampMap",
            Directive::AnimMap => "animMap",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "qer_editorImage" => Some(Directive::EditorImage),
            "map" => Some(Directive::Map),
            "clampMap" => Some(Directive::ClampMap),
            "animMap" => Some(Directive::AnimMap),
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A directive keyword and the argument following it, with quotes removed
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirectiveMatch {
    pub directive: Directive,
    pub argument: String,
}

impl DirectiveMatch {
    /// Whether the argument is a path under one of the [`ASSET_ROOTS`]
    pub fn is_asset_path(&self) -> bool {
        ASSET_ROOTS
            .iter()
            .any(|root| self.argument.starts_with(root))
    }
}

/// Remove `/* ... */` and `// ...` comments from shader text.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    match BLOCK_COMMENT.replace_all(text, "") {
        Cow::Borrowed(text) => LINE_COMMENT.replace_all(text, ""),
        Cow::Owned(text) => Cow::Owned(LINE_COMMENT.replace_all(&text, "").into_owned()),
    }
}

/// Decode `bytes` as UTF-8, dropping invalid sequences instead of replacing them.
pub fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// A comment-free shader script
///
/// No attempt is made to understand the shader block structure, directives are picked out of
/// the text wherever they appear.
///
/// ```
/// let script = q3_shader::ShaderScript::new(
///     "textures/tig/glow { qer_editorImage textures/tig/glow.tga { map $lightmap } }",
/// );
///
/// let references = script.asset_references();
/// assert!(references.contains("textures/tig/glow.tga"));
/// assert_eq!(references.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderScript {
    text: String,
}

impl ShaderScript {
    /// Strip the comments from `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: strip_comments(text).into_owned(),
        }
    }

    /// Decode a script read straight out of an archive.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(&decode_utf8_dropping_invalid(bytes))
    }

    /// Script text with comments removed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every directive in the script, in order of appearance
    pub fn directives(&self) -> Vec<DirectiveMatch> {
        DIRECTIVE
            .captures_iter(&self.text)
            .filter_map(|caps| {
                let directive = Directive::from_keyword(caps.get(1)?.as_str())?;
                let argument = caps.get(2)?.as_str().trim_matches('"').to_owned();
                Some(DirectiveMatch {
                    directive,
                    argument,
                })
            })
            .collect()
    }

    /// Asset paths named by the script's directives
    pub fn asset_references(&self) -> BTreeSet<String> {
        let references = self
            .directives()
            .into_iter()
            .filter(DirectiveMatch::is_asset_path)
            .map(|m| m.argument)
            .collect::<BTreeSet<_>>();
        trace!(count = references.len(), "scanned shader script");
        references
    }
}
