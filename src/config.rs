use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Document extensions indexed when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["pdf", "djvu", "epub"];

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the document tree.
    pub root: PathBuf,
    /// Viewer program used to open documents. `None` uses the platform
    /// default handler.
    pub viewer: Option<String>,
    /// Lowercase extensions (without the dot) that count as documents.
    /// Empty means every regular file.
    pub extensions: Vec<String>,
}

/// On-disk shape of `config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub root: Option<PathBuf>,
    pub viewer: Option<String>,
    pub extensions: Option<Vec<String>>,
}

impl ConfigFile {
    /// Load a config file. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Locate the config file:
    /// 1. The BOOKS_CONFIG environment variable
    /// 2. The XDG config directory (~/.config/books/config.json)
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(val) = std::env::var("BOOKS_CONFIG") {
            return Some(PathBuf::from(val));
        }
        xdg::BaseDirectories::with_prefix("books")
            .get_config_home()
            .map(|dir| dir.join("config.json"))
    }
}

impl Config {
    /// Resolve the configuration from, in order of priority:
    /// 1. Explicit values (from --root / --viewer)
    /// 2. The BOOKS_ROOT / BOOKS_VIEWER environment variables
    /// 3. The config file
    pub fn resolve(
        explicit_root: Option<&Path>,
        explicit_viewer: Option<&str>,
    ) -> Result<Self> {
        let file = match ConfigFile::default_path() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                ConfigFile::load(&path)?
            }
            None => ConfigFile::default(),
        };

        Self::merge(
            explicit_root.map(Path::to_path_buf),
            explicit_viewer.map(str::to_string),
            std::env::var("BOOKS_ROOT").ok().map(PathBuf::from),
            std::env::var("BOOKS_VIEWER").ok(),
            file,
        )
    }

    fn merge(
        explicit_root: Option<PathBuf>,
        explicit_viewer: Option<String>,
        env_root: Option<PathBuf>,
        env_viewer: Option<String>,
        file: ConfigFile,
    ) -> Result<Self> {
        let root = explicit_root.or(env_root).or(file.root).ok_or_else(|| {
            Error::Config(
                "no root directory configured (use --root, BOOKS_ROOT or \
                 the config file)"
                    .into(),
            )
        })?;

        let viewer = explicit_viewer
            .or(env_viewer)
            .or(file.viewer)
            .filter(|v| !v.trim().is_empty());

        let extensions = match file.extensions {
            Some(list) => list
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
            None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        };

        Ok(Self {
            root,
            viewer,
            extensions,
        })
    }

    /// Build a config for `root` with default viewer and extensions.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            viewer: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Whether `path` has one of the configured document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
    }
}
