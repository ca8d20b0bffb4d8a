//! DTO → schema arena conversion with validation.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use miette::Diagnostic;

use super::dto::{AnnotationDto, FieldDto, FileDto, MessageDto, PositionDto, SchemaSetDto};
use super::{Annotation, Attributes, FieldAttrs, NodeData, NodeId, Schema};
use crate::types::Location;

/// Errors while loading a descriptor set.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LoadError {
    /// IO error reading the descriptor file.
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The descriptor set is not valid JSON or has the wrong shape.
    #[error("Invalid descriptor set: {0}")]
    #[diagnostic(code(aep_lint::schema::json))]
    Json(#[from] serde_json::Error),

    /// A node has an empty name.
    #[error("{context}: name must not be empty")]
    #[diagnostic(code(aep_lint::schema::empty_name))]
    EmptyName {
        /// Where the error occurred (e.g., "files[0].messages[2]").
        context: String,
    },

    /// Two fields of one message share a name.
    #[error("{context}: duplicate field `{field}`")]
    #[diagnostic(code(aep_lint::schema::duplicate_field))]
    DuplicateField {
        /// The message containing the duplicate.
        context: String,
        /// The duplicated field name.
        field: String,
    },

    /// Two files share a path.
    #[error("duplicate file `{name}` in descriptor set")]
    #[diagnostic(code(aep_lint::schema::duplicate_file))]
    DuplicateFile {
        /// The duplicated file path.
        name: String,
    },
}

/// Converts a `SchemaSetDto` to a validated `Schema`.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: SchemaSetDto) -> Result<Schema, LoadError> {
    let mut schema = Schema::default();
    let mut seen_files = HashSet::new();

    for (i, file) in dto.files.into_iter().enumerate() {
        if !seen_files.insert(file.name.clone()) {
            return Err(LoadError::DuplicateFile { name: file.name });
        }
        convert_file(&mut schema, file, i)?;
    }

    Ok(schema)
}

fn require_name(name: &str, context: &str) -> Result<(), LoadError> {
    if name.trim().is_empty() {
        return Err(LoadError::EmptyName {
            context: context.to_string(),
        });
    }
    Ok(())
}

fn location(file: &Path, position: Option<PositionDto>) -> Location {
    let position = position.unwrap_or_default();
    Location::new(file, position.line, position.column)
}

fn convert_annotations(
    file: &Path,
    annotations: BTreeMap<String, AnnotationDto>,
) -> BTreeMap<String, Annotation> {
    annotations
        .into_iter()
        .map(|(key, dto)| {
            let annotation = match dto {
                AnnotationDto::Located(located) => {
                    Annotation::new(located.value, Some(location(file, Some(located.location))))
                }
                AnnotationDto::Bare(value) => Annotation::new(value, None),
            };
            (key, annotation)
        })
        .collect()
}

fn convert_file(schema: &mut Schema, dto: FileDto, index: usize) -> Result<NodeId, LoadError> {
    let ctx = format!("files[{index}]");
    require_name(&dto.name, &ctx)?;

    let path = PathBuf::from(&dto.name);
    let id = schema.push(NodeData {
        location: location(&path, dto.location),
        annotations: convert_annotations(&path, dto.annotations),
        name: dto.name,
        attrs: Attributes::File {
            package: dto.package,
        },
        parent: None,
        children: Vec::new(),
    });

    for (i, message) in dto.messages.into_iter().enumerate() {
        convert_message(schema, &path, id, message, &format!("{ctx}.messages[{i}]"))?;
    }

    Ok(id)
}

fn convert_message(
    schema: &mut Schema,
    path: &Path,
    parent: NodeId,
    dto: MessageDto,
    ctx: &str,
) -> Result<NodeId, LoadError> {
    require_name(&dto.name, ctx)?;

    let id = schema.push(NodeData {
        location: location(path, dto.location),
        annotations: convert_annotations(path, dto.annotations),
        name: dto.name.clone(),
        attrs: Attributes::Message,
        parent: Some(parent),
        children: Vec::new(),
    });

    let mut seen = HashSet::new();
    for (i, field) in dto.fields.into_iter().enumerate() {
        let field_ctx = format!("{ctx}.fields[{i}]");
        if !seen.insert(field.name.clone()) {
            return Err(LoadError::DuplicateField {
                context: format!("{ctx} ({})", dto.name),
                field: field.name,
            });
        }
        convert_field(schema, path, id, field, &field_ctx)?;
    }

    for (i, nested) in dto.messages.into_iter().enumerate() {
        convert_message(schema, path, id, nested, &format!("{ctx}.messages[{i}]"))?;
    }

    Ok(id)
}

fn convert_field(
    schema: &mut Schema,
    path: &Path,
    parent: NodeId,
    dto: FieldDto,
    ctx: &str,
) -> Result<NodeId, LoadError> {
    require_name(&dto.name, ctx)?;

    Ok(schema.push(NodeData {
        location: location(path, dto.location),
        annotations: convert_annotations(path, dto.annotations),
        name: dto.name,
        attrs: Attributes::Field(FieldAttrs {
            type_name: dto.type_name,
            repeated: dto.repeated,
            proto3_optional: dto.proto3_optional,
        }),
        parent: Some(parent),
        children: Vec::new(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NodeKind;

    #[test]
    fn empty_message_name_is_rejected_with_context() {
        let err = Schema::from_json(
            r#"{"files": [{"name": "a.proto", "messages": [{"name": "Ok"}, {"name": ""}]}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "files[0].messages[1]: name must not be empty");
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let err = Schema::from_json(
            r#"{"files": [{"name": "a.proto", "messages": [{"name": "Book", "fields": [
                {"name": "name", "type": "string"},
                {"name": "name", "type": "string"}
            ]}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateField { ref field, .. } if field == "name"));
    }

    #[test]
    fn duplicate_files_are_rejected() {
        let err = Schema::from_json(r#"{"files": [{"name": "a.proto"}, {"name": "a.proto"}]}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateFile { .. }));
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(
            Schema::from_json("{\"files\": ["),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn located_and_bare_annotations_are_both_accepted() {
        let schema = Schema::from_json(
            r#"{"files": [{"name": "a.proto", "messages": [{
                "name": "Book",
                "location": {"line": 3, "column": 1},
                "annotations": {
                    "aep.api.resource": {"value": {"type": "a/book"}, "location": {"line": 4, "column": 3}},
                    "custom": {"value": 1}
                }
            }]}]}"#,
        )
        .unwrap();
        let book = schema.find_message("Book").unwrap();

        let resource = book.annotation("aep.api.resource").unwrap();
        assert_eq!(resource.value()["type"], "a/book");
        assert_eq!(resource.location(), Some(&Location::new("a.proto", 4, 3)));

        // Missing `location` key: the whole object is the value.
        let custom = book.annotation("custom").unwrap();
        assert_eq!(custom.value()["value"], 1);
        assert!(custom.location().is_none());
    }

    #[test]
    fn fields_precede_nested_messages() {
        let schema = Schema::from_json(
            r#"{"files": [{"name": "a.proto", "messages": [{"name": "Outer",
                "messages": [{"name": "Inner"}],
                "fields": [{"name": "name", "type": "string"}]
            }]}]}"#,
        )
        .unwrap();
        let kinds: Vec<NodeKind> = schema
            .find_message("Outer")
            .unwrap()
            .children()
            .map(|n| n.kind())
            .collect();
        assert_eq!(kinds, vec![NodeKind::Field, NodeKind::Message]);
    }
}
