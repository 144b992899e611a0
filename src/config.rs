use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog API, including the `/api` prefix.
    pub api_base_url: String,
    /// Directory where exported PDFs are written. Empty means $HOME.
    #[serde(default)]
    pub download_dir: String,
    /// Default report layout for PDF export (design1 or design2).
    #[serde(default = "default_design")]
    pub export_design: String,
    /// Default report title for PDF export.
    #[serde(default = "default_title")]
    pub export_title: String,
}

fn default_design() -> String {
    "design1".to_string()
}

fn default_title() -> String {
    "Course Catalog".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            download_dir: String::new(),
            export_design: default_design(),
            export_title: default_title(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".catalog-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Effective API base URL; the CATALOG_TUI_API environment variable
    /// overrides the config file.
    pub fn resolved_api_url(&self) -> String {
        env::var("CATALOG_TUI_API").unwrap_or_else(|_| self.api_base_url.clone())
    }

    /// Directory for exported PDFs, falling back to $HOME then the current
    /// directory.
    pub fn resolved_download_dir(&self) -> PathBuf {
        if !self.download_dir.is_empty() {
            return PathBuf::from(&self.download_dir);
        }
        env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.export_design, "design1");
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            api_base_url: "http://example.com/api".to_string(),
            download_dir: "/tmp".to_string(),
            export_design: "design2".to_string(),
            export_title: "Q3 Catalog".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api_base_url, config.api_base_url);
        assert_eq!(parsed.export_design, "design2");
    }

    #[test]
    fn test_explicit_download_dir_wins() {
        let config = Config {
            download_dir: "/tmp/reports".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_download_dir(), PathBuf::from("/tmp/reports"));
    }
}
