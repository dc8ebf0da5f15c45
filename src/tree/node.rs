//! The `Node` variant and its structural helpers.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single element of a normalized configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Null,
    Bool(bool),
    /// Every numeric scalar, integer or not.
    Number(f64),
    String(String),
    List(Vec<Node>),
    Map(BTreeMap<String, Node>),
}

/// Shape of a node, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::List => "list",
            NodeKind::Map => "map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// The empty map a store publishes before its first load.
    pub fn empty_map() -> Self {
        Node::Map(BTreeMap::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::List(_) => NodeKind::List,
            Node::Map(_) => NodeKind::Map,
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        match self {
            Node::List(items) => 1 + items.iter().map(Node::node_count).sum::<usize>(),
            Node::Map(entries) => 1 + entries.values().map(Node::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Convert into a `serde_json::Value` for re-serialization.
    ///
    /// Non-finite numbers have no JSON form and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Node::String(s) => Value::String(s.clone()),
            Node::List(items) => Value::Array(items.iter().map(Node::to_json).collect()),
            Node::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::empty_map()
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut inner = BTreeMap::new();
        inner.insert("port".to_string(), Node::Number(5672.0));
        inner.insert("hosts".to_string(), Node::List(vec!["a".into(), "b".into()]));
        let mut root = BTreeMap::new();
        root.insert("rabbitmq".to_string(), Node::Map(inner));
        root.insert("debug".to_string(), Node::Bool(true));
        Node::Map(root)
    }

    #[test]
    fn test_default_is_empty_map() {
        assert_eq!(Node::default(), Node::Map(BTreeMap::new()));
        assert_eq!(Node::default().kind(), NodeKind::Map);
    }

    #[test]
    fn test_node_count() {
        // root, rabbitmq, port, hosts, a, b, debug
        assert_eq!(sample().node_count(), 7);
        assert_eq!(Node::Null.node_count(), 1);
    }

    #[test]
    fn test_to_json() {
        let json = sample().to_json();
        assert_eq!(json["rabbitmq"]["port"], serde_json::json!(5672.0));
        assert_eq!(json["rabbitmq"]["hosts"][1], "b");
        assert_eq!(json["debug"], true);
        assert_eq!(Node::Number(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let node = sample();
        assert_eq!(serde_json::to_value(&node).unwrap(), node.to_json());
    }
}
