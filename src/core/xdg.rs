//! XDG Base Directory Support
//!
//! Resolves where docrag keeps its configuration file and its
//! persisted vector collection on Linux/Unix systems.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for docrag
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl XdgDirs {
    /// Resolve both directories.
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit DOCRAG_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share)
    pub fn new() -> Self {
        Self {
            config_dir: resolve("DOCRAG_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("DOCRAG_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("DOCRAG_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Directory holding the single persisted vector collection
    pub fn index_dir(&self) -> PathBuf {
        self.data_dir.join("vector_db")
    }

    /// Create the config and data directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Data: {:?}", self.data_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
        tracing::debug!("  Index: {:?}", self.index_dir());
    }
}

/// `$override`, else `$xdg_var/docrag`, else `~/<fallback>/docrag`
fn resolve(override_var: &str, xdg_var: &str, fallback: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(override_var) {
        return PathBuf::from(dir);
    }

    let base = match env::var(xdg_var) {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => fallback.iter().fold(
            dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            |path, part| path.join(part),
        ),
    };
    base.join("docrag")
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
