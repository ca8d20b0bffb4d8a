//! Serde DTOs mirroring the JSON descriptor set emitted by the compiler.
//!
//! No validation happens here; see [`super::loader`].

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level descriptor set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaSetDto {
    /// Compiled files, in input order.
    #[serde(default)]
    pub files: Vec<FileDto>,
}

/// A compiled schema file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDto {
    /// File path as seen by the compiler.
    pub name: String,
    /// Declared package.
    #[serde(default)]
    pub package: Option<String>,
    /// Top-level messages.
    #[serde(default)]
    pub messages: Vec<MessageDto>,
    /// File-level annotations.
    #[serde(default)]
    pub annotations: BTreeMap<String, AnnotationDto>,
    /// Position of the file header.
    #[serde(default)]
    pub location: Option<PositionDto>,
}

/// A message declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    /// Simple message name.
    pub name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDto>,
    /// Nested messages in declaration order.
    #[serde(default)]
    pub messages: Vec<MessageDto>,
    /// Message annotations.
    #[serde(default)]
    pub annotations: BTreeMap<String, AnnotationDto>,
    /// Position of the declaration.
    #[serde(default)]
    pub location: Option<PositionDto>,
}

/// A field declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDto {
    /// Field name.
    pub name: String,
    /// Scalar or message type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// `repeated` label.
    #[serde(default)]
    pub repeated: bool,
    /// `optional` label in proto3 syntax.
    #[serde(default)]
    pub proto3_optional: bool,
    /// Field annotations.
    #[serde(default)]
    pub annotations: BTreeMap<String, AnnotationDto>,
    /// Position of the declaration.
    #[serde(default)]
    pub location: Option<PositionDto>,
}

/// An annotation value, optionally wrapped with its own position.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnnotationDto {
    /// `{ "value": ..., "location": {...} }`
    Located(LocatedAnnotationDto),
    /// Any other JSON value.
    Bare(serde_json::Value),
}

/// An annotation value with the position it was written at.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocatedAnnotationDto {
    /// The annotation payload.
    pub value: serde_json::Value,
    /// Where the annotation was written.
    pub location: PositionDto,
}

/// A 1-indexed line/column pair.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PositionDto {
    /// Line number.
    pub line: usize,
    /// Column number.
    #[serde(default)]
    pub column: usize,
}
