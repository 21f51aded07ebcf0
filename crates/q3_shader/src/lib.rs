//! This library scans **shader scripts** used by *Quake III Arena* for the assets they name.
//!
//! # Shader Script Format
//!
//! Shader scripts are plain text files stored under `scripts/` with the `.shader` extension.
//! Each file holds any number of shader definitions: a name followed by a `{ ... }` block of
//! general directives and nested `{ ... }` stages.
//!
//! ```text
//! textures/tig_den/lava
//! {
//!     qer_editorImage textures/tig_den/lava.tga   // shown in the editor
//!     {
//!         map textures/tig_den/lava.tga
//!         blendFunc GL_ONE GL_ZERO
//!     }
//!     {
//!         map $lightmap
//!     }
//! }
//! ```
//!
//! ## Syntax
//!
//! - Tokens are separated by whitespace, arguments may be wrapped in double quotes.
//! - `//` starts a comment running to the end of the line, `/* ... */` comments may span lines.
//! - Keywords are matched exactly as written by the stock tools (`qer_editorImage`, `map`,
//!   `clampMap`, `animMap`).
//! - Arguments starting with `$` (`$lightmap`, `$whiteimage`) are engine generated images.
//!

pub mod script;

pub use script::{Directive, DirectiveMatch, ShaderScript};
