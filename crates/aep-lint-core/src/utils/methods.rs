//! Helpers recognizing standard-method payload messages.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::{Node, NodeKind};

#[allow(clippy::expect_used)] // literal pattern
static GET_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Get[A-Z][A-Za-z0-9]*Request$").expect("valid regex"));

/// Returns true if the node is the request message of a Get method.
#[must_use]
pub fn is_get_request_message(node: Node<'_>) -> bool {
    node.kind() == NodeKind::Message && GET_REQUEST.is_match(node.name())
}
