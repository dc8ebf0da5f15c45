//! Normalized value tree.
//!
//! # Data Flow
//! ```text
//! raw document bytes
//!     → serde_yaml / toml (external parser)
//!     → normalize.rs (key and type closure checks)
//!     → Node (immutable, string-keyed at every map level)
//!     → published by config::store
//! ```
//!
//! # Design Decisions
//! - Closed variant: no shape outside `Node` survives normalization
//! - Numbers are stored as `f64` regardless of source representation
//! - Normalization is all-or-nothing for the whole document
//! - Trees are never mutated after they are built

pub mod node;
pub mod normalize;

pub use node::{Node, NodeKind};
pub use normalize::{normalize_toml, normalize_yaml, NormalizeError};
