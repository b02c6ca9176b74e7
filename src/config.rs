use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Table of contents options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocConfig {
    /// Deepest heading level listed by `toc` (default: 3)
    #[serde(default = "default_toc_max_level")]
    pub max_level: usize,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            max_level: default_toc_max_level(),
        }
    }
}

fn default_toc_max_level() -> usize {
    3
}

/// Section extraction options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Heading level used by `extract-all` when none is given (default: 2)
    #[serde(default = "default_extract_level")]
    pub level: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            level: default_extract_level(),
        }
    }
}

fn default_extract_level() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Heading list format: "text" or "json"
    #[serde(default = "default_output_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Config {
    /// Get XDG-style config path (~/.config/mdtree/config.toml)
    /// Used on macOS where dirs::config_dir() returns ~/Library/Application Support
    #[cfg(target_os = "macos")]
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("mdtree").join("config.toml"))
    }

    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mdtree").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    /// On macOS, checks ~/.config/mdtree first, then falls back to ~/Library/Application Support
    pub fn load() -> Self {
        #[cfg(target_os = "macos")]
        {
            if let Some(config) = Self::xdg_config_path().and_then(|p| Self::load_from(&p)) {
                return config;
            }
        }

        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Read and parse one config file. `None` when it is missing or malformed.
    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                log::debug!("ignoring malformed config {}: {e}", path.display());
                None
            }
        }
    }

    /// Save config to the platform config path
    pub fn save(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.toc.max_level, 3);
        assert_eq!(config.extract.level, 2);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[toc]\nmax_level = 5\n").unwrap();
        assert_eq!(config.toc.max_level, 5);
        assert_eq!(config.extract.level, 2);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.extract.level = 3;
        config.output.format = "json".to_string();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), Some(config));
    }

    #[test]
    fn test_malformed_or_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load_from(&path), None);

        fs::write(&path, "toc = [not toml").unwrap();
        assert_eq!(Config::load_from(&path), None);
    }
}
