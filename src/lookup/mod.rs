//! Path resolution and typed access.
//!
//! # Data Flow
//! ```text
//! (tree, "a.b.0")
//!     → path.rs (walk map keys / list indices)
//!     → &Node
//!     → coerce.rs (FromNode for the requested type)
//!     → T
//! ```
//!
//! # Design Decisions
//! - This layer always propagates errors; the fail-soft tier lives on
//!   `ConfigStore`
//! - Lookups borrow the tree and never mutate it

pub mod coerce;
pub mod path;

use thiserror::Error;

use crate::tree::Node;

pub use coerce::{CoercionError, FromNode};
pub use path::{resolve, PathError};

/// Failure of a single typed lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("at {path:?}: {source}")]
    Coercion {
        path: String,
        source: CoercionError,
    },
}

impl LookupError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Path(_) => "path",
            LookupError::Coercion { .. } => "coercion",
        }
    }
}

/// Resolve `path` in `tree` and coerce the result into `T`.
pub fn lookup<T: FromNode>(tree: &Node, path: &str) -> Result<T, LookupError> {
    let node = resolve(tree, path)?;
    T::from_node(node).map_err(|source| LookupError::Coercion {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let value: serde_yaml::Value =
            serde_yaml::from_str("server:\n  port: \"8080\"\n  debug: yes_please\n").unwrap();
        crate::tree::normalize_yaml(&value).unwrap()
    }

    #[test]
    fn test_lookup_coerces_string_to_int() {
        assert_eq!(lookup::<i64>(&tree(), "server.port"), Ok(8080));
        assert_eq!(lookup::<String>(&tree(), "server.port"), Ok("8080".into()));
    }

    #[test]
    fn test_lookup_errors_are_distinguishable() {
        let err = lookup::<i64>(&tree(), "server.missing").unwrap_err();
        assert_eq!(err.kind(), "path");

        let err = lookup::<bool>(&tree(), "server.debug").unwrap_err();
        assert_eq!(err.kind(), "coercion");
        assert!(err.to_string().contains("server.debug"), "{}", err);
    }
}
