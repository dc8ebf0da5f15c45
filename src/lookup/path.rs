//! Dotted-path resolution.
//!
//! # Rules
//! - Segments are separated by `.`
//! - A single leading empty segment (`.a.b`) is dropped
//! - Any other empty segment (`a..b`, `a.`, `.`) is an invalid path
//! - Against a map a segment is a key, against a list a base-10 index
//! - Scalars cannot be descended into
//!
//! Error locations are the joined prefix up to and including the failing
//! segment.

use thiserror::Error;

use crate::tree::{Node, NodeKind};

/// Error raised while walking a path through a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path {path:?}")]
    InvalidPath { path: String },

    #[error("index out of range at {at:?}: list has only {len} items")]
    IndexOutOfRange { at: String, len: usize },

    #[error("invalid list index at {at:?}")]
    InvalidIndex { at: String },

    #[error("nonexistent map key at {at:?}")]
    MissingKey { at: String },

    #[error("invalid type at {at:?}: expected list or map, got {found}")]
    NotContainer { at: String, found: NodeKind },
}

/// Split `path` into segments, applying the leading-dot rule.
pub fn segments(path: &str) -> Result<Vec<&str>, PathError> {
    let mut parts: Vec<&str> = path.split('.').collect();
    if parts.first() == Some(&"") {
        parts.remove(0);
    }
    if parts.iter().any(|part| part.is_empty()) {
        return Err(PathError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(parts)
}

/// Resolve `path` against `tree`, returning the node it addresses.
///
/// The empty path addresses the root.
pub fn resolve<'a>(tree: &'a Node, path: &str) -> Result<&'a Node, PathError> {
    let parts = segments(path)?;
    let mut current = tree;

    for (pos, part) in parts.iter().enumerate() {
        let at = || parts[..=pos].join(".");
        current = match current {
            Node::List(items) => {
                let index: i64 = part
                    .parse()
                    .map_err(|_| PathError::InvalidIndex { at: at() })?;
                usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| PathError::IndexOutOfRange {
                        at: at(),
                        len: items.len(),
                    })?
            }
            Node::Map(entries) => entries
                .get(*part)
                .ok_or_else(|| PathError::MissingKey { at: at() })?,
            other => {
                return Err(PathError::NotContainer {
                    at: at(),
                    found: other.kind(),
                })
            }
        };
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let value: serde_yaml::Value = serde_yaml::from_str(
            "rabbitmq:\n  queue:\n    key: orders\n  hosts:\n    - name: a\n    - name: b\nport: 80\n",
        )
        .unwrap();
        crate::tree::normalize_yaml(&value).unwrap()
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("a.b").unwrap(), vec!["a", "b"]);
        assert_eq!(segments(".a.b").unwrap(), vec!["a", "b"]);
        assert!(segments("").unwrap().is_empty());
        assert!(segments("a..b").is_err());
        assert!(segments("a.").is_err());
        assert!(segments(".").is_err());
        assert!(segments("..a").is_err());
    }

    #[test]
    fn test_resolve_map_and_list() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, "rabbitmq.queue.key").unwrap(),
            &Node::String("orders".into())
        );
        assert_eq!(
            resolve(&tree, "rabbitmq.hosts.1.name").unwrap(),
            &Node::String("b".into())
        );
        assert_eq!(resolve(&tree, "").unwrap(), &tree);
        assert_eq!(resolve(&tree, "rabbitmq.hosts").unwrap().kind(), NodeKind::List);
    }

    #[test]
    fn test_leading_dot_matches_plain_path() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, ".rabbitmq.queue.key"),
            resolve(&tree, "rabbitmq.queue.key")
        );
    }

    #[test]
    fn test_interior_empty_segment() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, "rabbitmq..queue").unwrap_err(),
            PathError::InvalidPath {
                path: "rabbitmq..queue".into()
            }
        );
    }

    #[test]
    fn test_resolution_is_associative() {
        let tree = tree();
        let step = resolve(&tree, "rabbitmq").unwrap();
        let step = resolve(step, "hosts").unwrap();
        let step = resolve(step, "0").unwrap();
        let step = resolve(step, "name").unwrap();
        assert_eq!(step, resolve(&tree, "rabbitmq.hosts.0.name").unwrap());
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(
            resolve(&tree(), "rabbitmq.exchange.name").unwrap_err(),
            PathError::MissingKey {
                at: "rabbitmq.exchange".into()
            }
        );
    }

    #[test]
    fn test_index_errors() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, "rabbitmq.hosts.2").unwrap_err(),
            PathError::IndexOutOfRange {
                at: "rabbitmq.hosts.2".into(),
                len: 2
            }
        );
        assert_eq!(
            resolve(&tree, "rabbitmq.hosts.-1").unwrap_err(),
            PathError::IndexOutOfRange {
                at: "rabbitmq.hosts.-1".into(),
                len: 2
            }
        );
        assert_eq!(
            resolve(&tree, "rabbitmq.hosts.first").unwrap_err(),
            PathError::InvalidIndex {
                at: "rabbitmq.hosts.first".into()
            }
        );
    }

    #[test]
    fn test_plus_signed_index() {
        assert_eq!(
            resolve(&tree(), "rabbitmq.hosts.+1.name").unwrap(),
            &Node::String("b".into())
        );
    }

    #[test]
    fn test_descend_through_scalar() {
        let err = resolve(&tree(), "port.number").unwrap_err();
        assert_eq!(
            err,
            PathError::NotContainer {
                at: "port.number".into(),
                found: NodeKind::Number
            }
        );
        assert!(err.to_string().contains("got number"));
    }
}
