//! Normalization of parser output into a `Node` tree.
//!
//! # Responsibilities
//! - Reject map keys that are not strings (YAML allows any scalar or even
//!   collections as keys)
//! - Reject value shapes outside the `Node` closure (YAML tags, TOML datetimes)
//! - Convert every number to `f64`
//!
//! Errors carry the dotted location of the offending node.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::tree::node::Node;

/// Error raised when a parsed document falls outside the `Node` closure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("unsupported map key {key} at {at}")]
    UnsupportedKey { at: String, key: String },

    #[error("unsupported type {type_name} at {at}")]
    UnsupportedType { at: String, type_name: String },
}

/// Tracks the dotted location of the node being normalized.
#[derive(Default)]
struct Location {
    segments: Vec<String>,
}

impl Location {
    fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    fn pop(&mut self) {
        self.segments.pop();
    }

    fn render(&self) -> String {
        if self.segments.is_empty() {
            "<root>".to_string()
        } else {
            self.segments.join(".")
        }
    }
}

/// Normalize a YAML (or JSON) document parsed by `serde_yaml`.
pub fn normalize_yaml(value: &serde_yaml::Value) -> Result<Node, NormalizeError> {
    yaml_node(value, &mut Location::default())
}

fn yaml_node(value: &serde_yaml::Value, at: &mut Location) -> Result<Node, NormalizeError> {
    use serde_yaml::Value;

    match value {
        Value::Null => Ok(Node::Null),
        Value::Bool(b) => Ok(Node::Bool(*b)),
        Value::Number(n) => n.as_f64().map(Node::Number).ok_or_else(|| {
            NormalizeError::UnsupportedType {
                at: at.render(),
                type_name: format!("number {}", n),
            }
        }),
        Value::String(s) => Ok(Node::String(s.clone())),
        Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                at.push(index.to_string());
                out.push(yaml_node(item, at)?);
                at.pop();
            }
            Ok(Node::List(out))
        }
        Value::Mapping(mapping) => {
            let mut out = BTreeMap::new();
            for (key, item) in mapping {
                let key = match key {
                    Value::String(key) => key,
                    other => {
                        return Err(NormalizeError::UnsupportedKey {
                            at: at.render(),
                            key: render_yaml_key(other),
                        })
                    }
                };
                at.push(key.clone());
                out.insert(key.clone(), yaml_node(item, at)?);
                at.pop();
            }
            Ok(Node::Map(out))
        }
        Value::Tagged(tagged) => Err(NormalizeError::UnsupportedType {
            at: at.render(),
            type_name: format!("tagged value {}", tagged.tag),
        }),
    }
}

fn render_yaml_key(key: &serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match key {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Sequence(_) => format!("sequence {:?}", key),
        Value::Mapping(_) => format!("mapping {:?}", key),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, render_yaml_key(&tagged.value)),
    }
}

/// Normalize a TOML document parsed by `toml`.
///
/// TOML tables are always string-keyed, so only datetimes can fail.
pub fn normalize_toml(value: &toml::Value) -> Result<Node, NormalizeError> {
    toml_node(value, &mut Location::default())
}

fn toml_node(value: &toml::Value, at: &mut Location) -> Result<Node, NormalizeError> {
    use toml::Value;

    match value {
        Value::Boolean(b) => Ok(Node::Bool(*b)),
        Value::Integer(i) => Ok(Node::Number(*i as f64)),
        Value::Float(f) => Ok(Node::Number(*f)),
        Value::String(s) => Ok(Node::String(s.clone())),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                at.push(index.to_string());
                out.push(toml_node(item, at)?);
                at.pop();
            }
            Ok(Node::List(out))
        }
        Value::Table(table) => {
            let mut out = BTreeMap::new();
            for (key, item) in table {
                at.push(key.clone());
                out.insert(key.clone(), toml_node(item, at)?);
                at.pop();
            }
            Ok(Node::Map(out))
        }
        Value::Datetime(_) => Err(NormalizeError::UnsupportedType {
            at: at.render(),
            type_name: "datetime".to_string(),
        }),
    }
}
