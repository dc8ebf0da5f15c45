//! The process-local configuration store.
//!
//! # States
//! ```text
//! Uninitialized → Loaded: first successful load or reload
//! Loaded → Loaded: every successful load/reload
//! Loaded → Stale: failed reload, previous tree stays published
//! Stale → Loaded: next successful load/reload
//! ```
//!
//! # Concurrency
//! - The current tree sits behind an `ArcSwap`; readers take a snapshot
//!   and traverse it without holding any lock
//! - Loads are serialised by a writer mutex that readers never touch
//! - The recorded source is also behind an atomic swap, so `source()`
//!   never waits on a reload in progress
//! - Parsing happens before the swap, so a slow reload only affects readers
//!   at the instant of the store

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::{ArcSwap, ArcSwapOption};

use crate::config::loader::{parse_document, Format, LoadError, Source};
use crate::lookup::{lookup, resolve, FromNode, LookupError};
use crate::observability::metrics;
use crate::tree::Node;

/// Lifecycle state of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StoreState {
    Uninitialized = 0,
    Loaded = 1,
    /// The last load attempt failed; the previous tree is still published.
    Stale = 2,
}

impl From<u8> for StoreState {
    fn from(value: u8) -> Self {
        match value {
            1 => StoreState::Loaded,
            2 => StoreState::Stale,
            _ => StoreState::Uninitialized,
        }
    }
}

/// Holder of the current configuration tree.
#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwap<Node>,
    /// Source of the last `load` call, successful or not.
    source: ArcSwapOption<Source>,
    writer: Mutex<()>,
    state: AtomicU8,
    generation: AtomicU64,
}

impl ConfigStore {
    /// Create a store publishing an empty map.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Node::empty_map()),
            source: ArcSwapOption::empty(),
            writer: Mutex::new(()),
            state: AtomicU8::new(StoreState::Uninitialized as u8),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a store and load `path` into it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    fn writer(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so poisoning is harmless.
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load the document at `path` and publish it.
    ///
    /// `path` becomes the reload source even when the load fails, so a
    /// broken file can be fixed and picked up by `reload`. On failure the
    /// previous tree stays published.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let source = Arc::new(Source::new(path.as_ref()));
        let _guard = self.writer();
        self.source.store(Some(source.clone()));
        let tree = self.attempt(source.load(), &source.path)?;
        self.publish(tree);
        Ok(())
    }

    /// Publish an in-memory document without touching the recorded source.
    pub fn load_str(&self, content: &str, format: Format) -> Result<(), LoadError> {
        let _guard = self.writer();
        let tree = self.attempt(parse_document(content, format), Path::new("<memory>"))?;
        self.publish(tree);
        Ok(())
    }

    /// Re-run the last file load against the same source.
    pub fn reload(&self) -> Result<(), LoadError> {
        let _guard = self.writer();
        let Some(source) = self.source.load_full() else {
            tracing::warn!("Reload requested before any document was loaded");
            metrics::record_load("no_source");
            return Err(LoadError::NoSource);
        };
        let tree = self.attempt(source.load(), &source.path)?;
        self.publish(tree);
        tracing::info!(path = %source.path.display(), "Configuration reloaded");
        Ok(())
    }

    fn attempt(&self, result: Result<Node, LoadError>, path: &Path) -> Result<Node, LoadError> {
        result.map_err(|e| {
            if self.state() != StoreState::Uninitialized {
                self.state.store(StoreState::Stale as u8, Ordering::Release);
            }
            metrics::record_load(e.kind());
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Failed to load configuration. Keeping current configuration."
            );
            e
        })
    }

    fn publish(&self, tree: Node) {
        let nodes = tree.node_count();
        self.current.store(Arc::new(tree));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.store(StoreState::Loaded as u8, Ordering::Release);
        metrics::record_load("ok");
        metrics::record_publish(generation, nodes);
        tracing::debug!(generation, nodes, "Configuration published");
    }

    /// The currently published tree.
    pub fn snapshot(&self) -> Arc<Node> {
        self.current.load_full()
    }

    /// Path of the last file passed to `load`, if any.
    pub fn source(&self) -> Option<PathBuf> {
        self.source.load_full().map(|s| s.path.clone())
    }

    pub fn state(&self) -> StoreState {
        StoreState::from(self.state.load(Ordering::Acquire))
    }

    /// Number of successful publishes so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Resolve `path` and return a copy of the node it addresses.
    pub fn get_node(&self, path: &str) -> Result<Node, LookupError> {
        let tree = self.current.load();
        Ok(resolve(&tree, path)?.clone())
    }

    /// Typed lookup that reports every failure.
    pub fn get<T: FromNode>(&self, path: &str) -> Result<T, LookupError> {
        let tree = self.current.load();
        lookup(&tree, path)
    }

    /// Typed lookup that logs failures and falls back to `default`.
    pub fn get_or<T: FromNode>(&self, path: &str, default: T) -> T {
        match self.get(path) {
            Ok(value) => value,
            Err(e) => {
                metrics::record_lookup_failure(e.kind());
                tracing::error!(path, expected = T::EXPECTED, error = %e, "Fetch value failed");
                default
            }
        }
    }

    pub fn get_bool(&self, path: &str) -> bool {
        self.get_or(path, false)
    }

    pub fn get_int(&self, path: &str) -> i64 {
        self.get_or(path, 0)
    }

    pub fn get_float(&self, path: &str) -> f64 {
        self.get_or(path, 0.0)
    }

    pub fn get_string(&self, path: &str) -> String {
        self.get_or(path, String::new())
    }

    pub fn get_string_list(&self, path: &str) -> Vec<String> {
        self.get_or(path, Vec::new())
    }

    pub fn get_list(&self, path: &str) -> Vec<Node> {
        self.get_or(path, Vec::new())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
