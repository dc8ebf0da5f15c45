//! Document loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tree::{normalize_toml, normalize_yaml, Node, NormalizeError};

/// Serialization format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// YAML, which also covers JSON documents.
    #[default]
    Yaml,
    Toml,
}

impl Format {
    /// Pick the format from the file extension; anything but `.toml` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("no source document has been loaded")]
    NoSource,
}

impl LoadError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "io",
            LoadError::Yaml(_) | LoadError::Toml(_) => "parse",
            LoadError::Normalize(_) => "normalize",
            LoadError::NoSource => "no_source",
        }
    }
}

/// Where a published tree came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub format: Format,
}

impl Source {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        Self { path, format }
    }

    /// Read, parse and normalize the document.
    pub fn load(&self) -> Result<Node, LoadError> {
        let content = fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_document(&content, self.format)
    }
}

/// Parse and normalize an in-memory document.
pub fn parse_document(content: &str, format: Format) -> Result<Node, LoadError> {
    let node = match format {
        Format::Yaml if content.trim().is_empty() => Node::Null,
        Format::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(content)?;
            normalize_yaml(&value)?
        }
        Format::Toml => {
            let value: toml::Value = toml::from_str(content)?;
            normalize_toml(&value)?
        }
    };
    Ok(node)
}
