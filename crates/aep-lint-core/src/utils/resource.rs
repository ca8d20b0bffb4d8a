//! Resource metadata extraction.
//!
//! Resources are declared either by annotating a message with
//! [`RESOURCE_KEY`] or, for resources without a backing message, by listing
//! definitions on the file under [`RESOURCE_DEFINITION_KEY`]. Both use the
//! same [`ResourceAnnotation`] shape. Fields that hold another resource's
//! name point at its type under [`RESOURCE_REFERENCE_KEY`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{Node, NodeKind};
use crate::types::Location;

/// Annotation key for message-level resources.
pub const RESOURCE_KEY: &str = "aep.api.resource";

/// Annotation key for file-level resource definitions.
pub const RESOURCE_DEFINITION_KEY: &str = "aep.api.resource_definition";

/// Annotation key for field-level resource references.
pub const RESOURCE_REFERENCE_KEY: &str = "aep.api.field_info.resource_reference";

/// Field conventionally holding the resource name.
pub const DEFAULT_NAME_FIELD: &str = "name";

fn default_name_field() -> String {
    DEFAULT_NAME_FIELD.to_string()
}

/// Resource metadata attached to a message or file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAnnotation {
    /// `{Service Name}/{Type}`, e.g. `library.example.com/book`.
    #[serde(rename = "type", default)]
    pub resource_type: String,
    /// Singular label.
    #[serde(default)]
    pub singular: String,
    /// Plural label.
    #[serde(default)]
    pub plural: String,
    /// Path patterns; the first one is canonical.
    #[serde(default, alias = "pattern")]
    pub patterns: Vec<String>,
    /// Field holding the resource name.
    #[serde(default = "default_name_field")]
    pub name_field: String,
}

/// Resource reference attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// Type of the referenced resource.
    #[serde(rename = "type", default)]
    pub resource_type: String,
    /// Type of a resource whose parent is referenced.
    #[serde(default)]
    pub child_type: String,
}

/// Returns true if the node looks like a resource, annotated or not.
///
/// A resource candidate is a top-level message with a `name` field whose
/// name does not end in `Request` or `Response`.
#[must_use]
pub fn is_resource_candidate(node: Node<'_>) -> bool {
    if node.kind() != NodeKind::Message {
        return false;
    }
    let nested = node
        .parent()
        .is_some_and(|p| p.kind() == NodeKind::Message);
    let name = node.name();
    node.find_field(DEFAULT_NAME_FIELD).is_some()
        && !name.ends_with("Request")
        && !name.ends_with("Response")
        && !nested
}

/// Decodes the resource annotation, keeping decode errors.
///
/// Returns `None` if the node was never annotated.
#[must_use]
pub fn parse_resource(node: Node<'_>) -> Option<Result<ResourceAnnotation, serde_json::Error>> {
    node.annotation(RESOURCE_KEY).map(|a| a.parse())
}

/// Returns the resource annotation, if present and well-formed.
#[must_use]
pub fn get_resource(node: Node<'_>) -> Option<ResourceAnnotation> {
    match parse_resource(node)? {
        Ok(resource) => Some(resource),
        Err(e) => {
            debug!("Ignoring malformed resource annotation on {}: {}", node.name(), e);
            None
        }
    }
}

/// Returns true if the node carries a well-formed resource annotation.
#[must_use]
pub fn has_resource(node: Node<'_>) -> bool {
    get_resource(node).is_some()
}

/// Returns the file-level resource definitions, in declaration order.
///
/// A single definition object is accepted as a one-element list.
#[must_use]
pub fn get_resource_definitions(file: Node<'_>) -> Vec<ResourceAnnotation> {
    let Some(annotation) = file.annotation(RESOURCE_DEFINITION_KEY) else {
        return Vec::new();
    };
    if let Ok(list) = annotation.parse::<Vec<ResourceAnnotation>>() {
        return list;
    }
    match annotation.parse::<ResourceAnnotation>() {
        Ok(single) => vec![single],
        Err(e) => {
            debug!("Ignoring malformed resource definitions in {}: {}", file.name(), e);
            Vec::new()
        }
    }
}

/// Returns true if the file declares at least one resource definition.
#[must_use]
pub fn has_resource_definitions(file: Node<'_>) -> bool {
    !get_resource_definitions(file).is_empty()
}

/// Decodes the resource reference on a field, keeping decode errors.
///
/// Returns `None` if the field carries no reference.
#[must_use]
pub fn parse_resource_reference(
    field: Node<'_>,
) -> Option<Result<ResourceReference, serde_json::Error>> {
    field.annotation(RESOURCE_REFERENCE_KEY).map(|a| a.parse())
}

/// Returns true if the field carries a resource reference, well-formed or not.
#[must_use]
pub fn has_resource_reference(field: Node<'_>) -> bool {
    field.kind() == NodeKind::Field && field.annotation(RESOURCE_REFERENCE_KEY).is_some()
}

/// Location of the field's resource reference, falling back to the field.
#[must_use]
pub fn resource_reference_location(field: Node<'_>) -> &Location {
    field
        .annotation(RESOURCE_REFERENCE_KEY)
        .and_then(|a| a.location())
        .unwrap_or_else(|| field.location())
}

/// Splits `Service/Type` into its two halves.
///
/// Returns `None` unless there is exactly one `/` with text on both sides.
#[must_use]
pub fn split_resource_type_name(resource_type: &str) -> Option<(&str, &str)> {
    let (service, type_name) = resource_type.split_once('/')?;
    if service.is_empty() || type_name.is_empty() || type_name.contains('/') {
        return None;
    }
    Some((service, type_name))
}

/// Location of the resource annotation, falling back to the node itself.
#[must_use]
pub fn resource_location(node: Node<'_>) -> &Location {
    node.annotation(RESOURCE_KEY)
        .and_then(|a| a.location())
        .unwrap_or_else(|| node.location())
}

/// Location of the file's resource definitions, falling back to the file.
#[must_use]
pub fn resource_definition_location(file: Node<'_>) -> &Location {
    file.annotation(RESOURCE_DEFINITION_KEY)
        .and_then(|a| a.location())
        .unwrap_or_else(|| file.location())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    const SCHEMA: &str = r#"{"files": [{
        "name": "library.proto",
        "annotations": {
            "aep.api.resource_definition": [
                {"type": "library.example.com/shelf", "patterns": ["shelves/{shelf}"]}
            ]
        },
        "messages": [
            {"name": "Book",
             "fields": [{"name": "name", "type": "string"}],
             "annotations": {"aep.api.resource": {
                "value": {"type": "library.example.com/book", "singular": "book", "plural": "books",
                          "pattern": ["publishers/{publisher}/books/{book}"]},
                "location": {"line": 5, "column": 3}}},
             "messages": [{"name": "Page", "fields": [{"name": "name", "type": "string"}]}]},
            {"name": "GetBookRequest", "fields": [
                {"name": "name", "type": "string",
                 "annotations": {"aep.api.field_info.resource_reference": {
                    "value": {"type": "library.example.com/book"},
                    "location": {"line": 9, "column": 5}}}},
                {"name": "parent", "type": "string",
                 "annotations": {"aep.api.field_info.resource_reference": {"child_type": "library.example.com/book"}}}
            ]},
            {"name": "Broken", "fields": [{"name": "name", "type": "string"}],
             "annotations": {"aep.api.resource": {"patterns": "not-a-list"}}},
            {"name": "Author"}
        ]
    }]}"#;

    fn schema() -> Schema {
        Schema::from_json(SCHEMA).unwrap()
    }

    #[test]
    fn candidates() {
        let schema = schema();
        let check = |name: &str| is_resource_candidate(schema.find_message(name).unwrap());
        assert!(check("Book"));
        assert!(check("Broken"));
        assert!(!check("Page"), "nested messages are not resources");
        assert!(!check("GetBookRequest"), "request payloads are not resources");
        assert!(!check("Author"), "no name field");
    }

    #[test]
    fn extracts_annotation_independently_of_candidacy() {
        let schema = schema();
        let book = schema.find_message("Book").unwrap();
        let resource = get_resource(book).unwrap();
        assert_eq!(resource.resource_type, "library.example.com/book");
        assert_eq!(resource.patterns, vec!["publishers/{publisher}/books/{book}"]);
        assert_eq!(resource.name_field, "name");
        assert_eq!(resource_location(book), &Location::new("library.proto", 5, 3));

        assert!(get_resource(schema.find_message("Author").unwrap()).is_none());
    }

    #[test]
    fn malformed_annotation_is_absent_but_reported_by_parse() {
        let schema = schema();
        let broken = schema.find_message("Broken").unwrap();
        assert!(!has_resource(broken));
        assert!(matches!(parse_resource(broken), Some(Err(_))));
    }

    #[test]
    fn file_level_definitions() {
        let schema = schema();
        let file = schema.files().next().unwrap();
        let defs = get_resource_definitions(file);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].resource_type, "library.example.com/shelf");
        assert!(has_resource_definitions(file));
    }

    #[test]
    fn field_level_references() {
        let schema = schema();
        let request = schema.find_message("GetBookRequest").unwrap();

        let name = request.find_field("name").unwrap();
        assert!(has_resource_reference(name));
        let reference = parse_resource_reference(name).unwrap().unwrap();
        assert_eq!(reference.resource_type, "library.example.com/book");
        assert!(reference.child_type.is_empty());
        assert_eq!(
            resource_reference_location(name),
            &Location::new("library.proto", 9, 5)
        );

        let parent = request.find_field("parent").unwrap();
        let reference = parse_resource_reference(parent).unwrap().unwrap();
        assert_eq!(reference.child_type, "library.example.com/book");

        let book = schema.find_message("Book").unwrap();
        assert!(!has_resource_reference(book.find_field("name").unwrap()));
        assert!(!has_resource_reference(book), "messages never carry references");
    }

    #[test]
    fn split_type_name() {
        assert_eq!(
            split_resource_type_name("Library/Book"),
            Some(("Library", "Book"))
        );
        assert_eq!(split_resource_type_name("Book"), None);
        assert_eq!(split_resource_type_name("/Book"), None);
        assert_eq!(split_resource_type_name("Library/"), None);
        assert_eq!(split_resource_type_name("a/b/c"), None);
    }
}
