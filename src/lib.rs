//! Hot-reloadable configuration store.
//!
//! Parses YAML, JSON or TOML documents into an immutable [`Node`] tree,
//! resolves dotted paths against it and coerces the result into primitive
//! types. The published tree can be swapped atomically at runtime.

pub mod config;
pub mod global;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod tree;

pub use config::{ConfigStore, Format, LoadError, StoreState};
pub use lookup::{lookup, resolve, CoercionError, FromNode, LookupError, PathError};
pub use tree::{Node, NodeKind, NormalizeError};
