//! Navigation definition loader
//!
//! Loads and validates a YAML navigation definition from disk.

use crate::definition::NavigationDefinition;
use crate::error::{NavigationError, NavigationResult};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the definition path.
pub const NAVIGATION_PATH_ENV: &str = "SIDEBAR_NAVIGATION_PATH";

const DEFAULT_RELATIVE_PATH: &str = "config/navigation.yaml";

pub struct NavigationLoader {
    path: PathBuf,
}

impl NavigationLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create loader from SIDEBAR_NAVIGATION_PATH or a default location
    ///
    /// Path resolution order:
    /// 1. SIDEBAR_NAVIGATION_PATH environment variable (explicit override)
    /// 2. Relative "config/navigation.yaml" (works when running from the service root)
    /// 3. The definition shipped in this crate (compile-time CARGO_MANIFEST_DIR)
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(NAVIGATION_PATH_ENV).ok())
    }

    /// Resolve a loader from an already-read override value.
    pub fn resolve(override_path: Option<String>) -> Self {
        if let Some(path) = override_path {
            return Self::new(path);
        }

        if Path::new(DEFAULT_RELATIVE_PATH).exists() {
            return Self::new(DEFAULT_RELATIVE_PATH);
        }

        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/config/navigation.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse and validate the definition.
    pub fn load(&self) -> NavigationResult<NavigationDefinition> {
        let source_name = self.path.display().to_string();
        info!("Loading navigation definition from {}", source_name);

        let content = std::fs::read_to_string(&self.path).map_err(|e| NavigationError::Io {
            path: source_name.clone(),
            message: e.to_string(),
        })?;

        let definition = NavigationDefinition::from_yaml_str(&content, &source_name)?;

        info!(
            "Loaded {} main and {} footer sections with {} total items",
            definition.main.len(),
            definition.footer.len(),
            definition.item_count()
        );

        Ok(definition)
    }
}
