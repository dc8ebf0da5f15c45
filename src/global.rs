//! Process-wide store and convenience accessors.
//!
//! Code that cannot have a `ConfigStore` injected reads configuration through
//! these functions. All getters return the type's zero value on failure and
//! log the error.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::config::{ConfigStore, LoadError};
use crate::tree::Node;

static GLOBAL: OnceLock<Arc<ConfigStore>> = OnceLock::new();

/// The process-wide store, created empty on first use.
pub fn global() -> &'static Arc<ConfigStore> {
    GLOBAL.get_or_init(|| Arc::new(ConfigStore::new()))
}

/// Load `path` into the process-wide store.
pub fn load(path: impl AsRef<Path>) -> Result<(), LoadError> {
    global().load(path)
}

/// Reload the process-wide store from its recorded source.
pub fn reload() -> Result<(), LoadError> {
    global().reload()
}

pub fn get_bool(path: &str) -> bool {
    global().get_bool(path)
}

pub fn get_int(path: &str) -> i64 {
    global().get_int(path)
}

pub fn get_float(path: &str) -> f64 {
    global().get_float(path)
}

pub fn get_string(path: &str) -> String {
    global().get_string(path)
}

pub fn get_string_list(path: &str) -> Vec<String> {
    global().get_string_list(path)
}

pub fn get_list(path: &str) -> Vec<Node> {
    global().get_list(path)
}
