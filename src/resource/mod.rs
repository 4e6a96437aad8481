//! Nested translation resource documents.
//!
//! A resource document maps string keys either to translated text or to a
//! nested group of keys. Dot-path keys (`"Common.buttons.submit"`) address a
//! leaf through the nesting, one segment per level.
//!
//! ## Module Structure
//!
//! - `document`: the tagged node type, path lookup and insertion
//! - `json_format`: ASCII-escaped pretty printing for generated files

mod document;
mod json_format;

pub use document::{PathConflict, ResourceDocument, ResourceMap, ResourceNode};
pub use json_format::{AsciiPrettyFormatter, to_ascii_json};
