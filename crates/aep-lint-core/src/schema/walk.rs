//! Depth-first, parent-before-children traversal.

use super::{Node, NodeId, Schema};

/// Iterator over every node of a [`Schema`].
///
/// Files come in input order; within a node, children come in declaration
/// order (fields first, then nested messages). Uses an explicit stack, so
/// nesting depth is only bounded by memory.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    schema: &'a Schema,
    stack: Vec<NodeId>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        let stack = schema.files.iter().rev().copied().collect();
        Self { schema, stack }
    }

    pub(crate) fn subtree(node: Node<'a>) -> Self {
        Self {
            schema: node.schema(),
            stack: vec![node.id()],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.schema.node(id)?;
        let start = self.stack.len();
        self.stack.extend(node.children().map(Node::id));
        self.stack[start..].reverse();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{NodeKind, Schema};

    #[test]
    fn visits_parents_before_children_in_declaration_order() {
        let schema = Schema::from_json(
            r#"{"files": [
                {"name": "a.proto", "messages": [
                    {"name": "Book", "fields": [{"name": "name", "type": "string"}, {"name": "title", "type": "string"}],
                     "messages": [{"name": "Edition", "fields": [{"name": "year", "type": "int32"}]}]},
                    {"name": "Shelf"}
                ]},
                {"name": "b.proto", "messages": [{"name": "Publisher"}]}
            ]}"#,
        )
        .unwrap();

        let order: Vec<(NodeKind, &str)> = schema.walk().map(|n| (n.kind(), n.name())).collect();
        assert_eq!(
            order,
            vec![
                (NodeKind::File, "a.proto"),
                (NodeKind::Message, "Book"),
                (NodeKind::Field, "name"),
                (NodeKind::Field, "title"),
                (NodeKind::Message, "Edition"),
                (NodeKind::Field, "year"),
                (NodeKind::Message, "Shelf"),
                (NodeKind::File, "b.proto"),
                (NodeKind::Message, "Publisher"),
            ]
        );
    }

    #[test]
    fn subtree_walk_starts_at_the_node() {
        let schema = Schema::from_json(
            r#"{"files": [{"name": "a.proto", "messages": [
                {"name": "Book", "messages": [{"name": "Edition"}]},
                {"name": "Shelf"}
            ]}]}"#,
        )
        .unwrap();
        let book = schema.find_message("Book").unwrap();
        let names: Vec<&str> = book.walk().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Book", "Edition"]);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        use crate::schema::{Attributes, NodeData};
        use crate::types::Location;

        let depth = 50_000;
        let mut schema = Schema::default();
        let mut parent = None;
        for i in 0..=depth {
            let attrs = if i == 0 {
                Attributes::File { package: None }
            } else {
                Attributes::Message
            };
            parent = Some(schema.push(NodeData {
                name: format!("M{i}"),
                attrs,
                parent,
                children: Vec::new(),
                annotations: std::collections::BTreeMap::new(),
                location: Location::default(),
            }));
        }
        assert_eq!(schema.walk().count(), depth + 1);
        assert_eq!(schema.walk().last().map(|n| n.name().to_string()), Some(format!("M{depth}")));
    }
}
