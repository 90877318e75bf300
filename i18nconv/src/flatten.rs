//! Flattening nested documents into separator-joined key paths.

use indexmap::IndexMap;
use serde_json::Value;

use crate::types::Node;

/// Flattens `node` into a mapping from joined key path to leaf value.
///
/// Paths are built as `parent + separator + segment`, or just `segment` under an empty
/// parent. Entries follow the document's insertion order; when two paths collide after
/// joining (`{"a.b": .., "a": {"b": ..}}` with `.`), the later value wins and keeps the
/// earlier position.
pub fn flatten(node: &Node, separator: &str) -> IndexMap<String, String> {
    let mut flat = IndexMap::new();
    if let Node::Internal(children) = node {
        flatten_into(children, separator, "", &mut flat);
    }
    flat
}

/// Flattens a parsed JSON document; arrays and scalars are leaves.
pub fn flatten_value(value: Value, separator: &str) -> IndexMap<String, String> {
    flatten(&Node::from_json(value), separator)
}

fn flatten_into(
    children: &IndexMap<String, Node>,
    separator: &str,
    prefix: &str,
    flat: &mut IndexMap<String, String>,
) {
    for (segment, child) in children {
        let path = if prefix.is_empty() {
            segment.clone()
        } else {
            format!("{}{}{}", prefix, separator, segment)
        };

        match child {
            Node::Internal(grandchildren) => flatten_into(grandchildren, separator, &path, flat),
            Node::Leaf(value) => {
                flat.insert(path, value.clone());
            }
        }
    }
}
