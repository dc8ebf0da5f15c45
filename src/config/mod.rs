//! Configuration store subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/JSON/TOML)
//!     → loader.rs (read, parse, normalize)
//!     → Node (immutable)
//!     → store.rs (atomic swap of Arc<Node>)
//!     → lookups snapshot the current tree
//!
//! On reload trigger (signal or watcher.rs):
//!     → store.rs re-runs loader.rs against the recorded source
//!     → success: swap; failure: keep current tree, mark stale
//! ```
//!
//! # Design Decisions
//! - Trees are immutable once published; changes require full reload
//! - Two lookup tiers: explicit `Result`s and fail-soft zero values
//! - No schema, no layering, no write-back

pub mod loader;
pub mod store;
pub mod watcher;

pub use loader::{Format, LoadError, Source};
pub use store::{ConfigStore, StoreState};
pub use watcher::ConfigWatcher;
