//! Immutable schema tree handed over by the schema compiler.
//!
//! # Architecture
//!
//! ```text
//! JSON descriptor set
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert (loader)
//! Schema arena (NodeData indexed by NodeId)
//!   ↓ Node<'a> handles
//! walker / rules
//! ```
//!
//! Ownership flows top-down: the [`Schema`] owns every node. Parent links
//! are plain [`NodeId`]s used for navigation only.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::Location;

pub mod dto;
pub mod loader;
mod walk;

pub use loader::LoadError;
pub use walk::Walk;

/// Index of a node inside its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of the node in traversal-independent arena order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The variant of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A schema source file.
    File,
    /// A message declaration (top-level or nested).
    Message,
    /// A field of a message.
    Field,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Message => write!(f, "message"),
            Self::Field => write!(f, "field"),
        }
    }
}

/// Field-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAttrs {
    /// Scalar type (`string`, `int32`, ...) or message type name.
    pub type_name: String,
    /// Whether the field is repeated.
    pub repeated: bool,
    /// Whether the field carries the `proto3_optional` label.
    pub proto3_optional: bool,
}

/// Kind-specific attribute set of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Attributes {
    File { package: Option<String> },
    Message,
    Field(FieldAttrs),
}

/// A free-form annotation attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    value: serde_json::Value,
    location: Option<Location>,
}

impl Annotation {
    /// Creates a new annotation.
    #[must_use]
    pub fn new(value: serde_json::Value, location: Option<Location>) -> Self {
        Self { value, location }
    }

    /// Returns the raw annotation value.
    #[must_use]
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Returns where the annotation was written, if the compiler recorded it.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Decodes the annotation value into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the expected shape.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.value)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) name: String,
    pub(crate) attrs: Attributes,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) annotations: BTreeMap<String, Annotation>,
    pub(crate) location: Location,
}

/// A compiled schema: every file of one lint pass.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    nodes: Vec<NodeData>,
    files: Vec<NodeId>,
}

impl Schema {
    /// Parses a JSON descriptor set.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tree is invalid.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let dto: dto::SchemaSetDto = serde_json::from_str(content)?;
        loader::load(dto)
    }

    /// Reads and parses a JSON descriptor set from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub(crate) fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = data.parent {
            self.nodes[parent.0].children.push(id);
        } else {
            self.files.push(id);
        }
        self.nodes.push(data);
        id
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the schema has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a handle to a node of this schema.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { schema: self, id })
    }

    /// Iterates over the file nodes in input order.
    pub fn files(&self) -> impl Iterator<Item = Node<'_>> {
        self.files.iter().map(move |&id| Node { schema: self, id })
    }

    /// Walks the tree depth-first, parents before children.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Finds the first message with the given simple name, in traversal order.
    #[must_use]
    pub fn find_message(&self, name: &str) -> Option<Node<'_>> {
        self.walk()
            .find(|n| n.kind() == NodeKind::Message && n.name() == name)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A borrowed handle to one node of a [`Schema`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    schema: &'a Schema,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(self) -> &'a NodeData {
        self.schema.data(self.id)
    }

    /// Returns the node's id.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Returns the schema this node belongs to.
    #[must_use]
    pub fn schema(self) -> &'a Schema {
        self.schema
    }

    /// Returns the node variant.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        match self.data().attrs {
            Attributes::File { .. } => NodeKind::File,
            Attributes::Message => NodeKind::Message,
            Attributes::Field(_) => NodeKind::Field,
        }
    }

    /// Returns the simple name (file path for files).
    #[must_use]
    pub fn name(self) -> &'a str {
        &self.data().name
    }

    /// Returns the source position of the declaration.
    #[must_use]
    pub fn location(self) -> &'a Location {
        &self.data().location
    }

    /// Returns the enclosing node, if any.
    #[must_use]
    pub fn parent(self) -> Option<Node<'a>> {
        self.data().parent.map(|id| Node {
            schema: self.schema,
            id,
        })
    }

    /// Returns the file this node was declared in.
    #[must_use]
    pub fn file(self) -> Node<'a> {
        let mut node = self;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// Returns the file's package, for file nodes.
    #[must_use]
    pub fn package(self) -> Option<&'a str> {
        match &self.data().attrs {
            Attributes::File { package } => package.as_deref(),
            _ => None,
        }
    }

    /// Returns the fully-qualified name (`package.Outer.Inner`).
    ///
    /// Files return their path.
    #[must_use]
    pub fn full_name(self) -> String {
        if self.kind() == NodeKind::File {
            return self.name().to_string();
        }
        let mut parts = vec![self.name()];
        let mut current = self.parent();
        while let Some(node) = current {
            match node.kind() {
                NodeKind::File => {
                    if let Some(package) = node.package().filter(|p| !p.is_empty()) {
                        parts.push(package);
                    }
                }
                _ => parts.push(node.name()),
            }
            current = node.parent();
        }
        parts.reverse();
        parts.join(".")
    }

    /// Iterates over direct children in declaration order.
    pub fn children(self) -> impl Iterator<Item = Node<'a>> {
        let schema = self.schema;
        self.data()
            .children
            .iter()
            .map(move |&id| Node { schema, id })
    }

    /// Walks this node's subtree, the node itself first.
    #[must_use]
    pub fn walk(self) -> Walk<'a> {
        Walk::subtree(self)
    }

    /// Iterates over the fields of a message.
    pub fn fields(self) -> impl Iterator<Item = Node<'a>> {
        self.children().filter(|n| n.kind() == NodeKind::Field)
    }

    /// Iterates over messages declared directly inside this node.
    pub fn messages(self) -> impl Iterator<Item = Node<'a>> {
        self.children().filter(|n| n.kind() == NodeKind::Message)
    }

    /// Finds a field of this message by name.
    #[must_use]
    pub fn find_field(self, name: &str) -> Option<Node<'a>> {
        self.fields().find(|f| f.name() == name)
    }

    /// Returns the field attributes, for field nodes.
    #[must_use]
    pub fn field_attrs(self) -> Option<&'a FieldAttrs> {
        match &self.data().attrs {
            Attributes::Field(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Looks up an attached annotation by key.
    #[must_use]
    pub fn annotation(self, key: &str) -> Option<&'a Annotation> {
        self.data().annotations.get(key)
    }

    /// Iterates over all annotations, ordered by key.
    pub fn annotations(self) -> impl Iterator<Item = (&'a str, &'a Annotation)> {
        self.data()
            .annotations
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"{
        "files": [{
            "name": "library.proto",
            "package": "library.v1",
            "messages": [{
                "name": "Book",
                "location": {"line": 10, "column": 1},
                "fields": [
                    {"name": "name", "type": "string", "location": {"line": 11, "column": 3}},
                    {"name": "tags", "type": "string", "repeated": true}
                ],
                "messages": [{"name": "Edition", "fields": [{"name": "name", "type": "string"}]}]
            }]
        }]
    }"#;

    #[test]
    fn navigation_follows_declarations() {
        let schema = Schema::from_json(LIBRARY).unwrap();
        let book = schema.find_message("Book").unwrap();
        assert_eq!(book.kind(), NodeKind::Message);
        assert_eq!(book.full_name(), "library.v1.Book");
        assert_eq!(book.fields().count(), 2);
        assert_eq!(book.messages().count(), 1);

        let tags = book.find_field("tags").unwrap();
        assert!(tags.field_attrs().unwrap().repeated);
        assert_eq!(tags.parent(), Some(book));

        let edition = schema.find_message("Edition").unwrap();
        assert_eq!(edition.full_name(), "library.v1.Book.Edition");
        assert_eq!(edition.parent().map(Node::kind), Some(NodeKind::Message));
        assert_eq!(edition.file().name(), "library.proto");
    }

    #[test]
    fn locations_carry_the_file_path() {
        let schema = Schema::from_json(LIBRARY).unwrap();
        let name = schema.find_message("Book").unwrap().find_field("name").unwrap();
        assert_eq!(name.location(), &Location::new("library.proto", 11, 3));
    }

    #[test]
    fn node_lookup_rejects_foreign_ids() {
        let schema = Schema::from_json(LIBRARY).unwrap();
        assert!(schema.node(NodeId(schema.len())).is_none());
        assert!(schema.node(NodeId(0)).is_some());
    }
}
