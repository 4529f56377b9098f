use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Session token from the last completed sign-in, if still valid
    #[serde(default)]
    pub session_token: Option<String>,
    /// Email of the signed-in user
    #[serde(default)]
    pub user_email: Option<String>,
    /// Optional JSON fixture to load campaign data from
    #[serde(default)]
    pub fixture_path: Option<String>,
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".pixamp-tui"))
    }

    pub fn load_from(dir: &Path) -> Option<Config> {
        let config_path = dir.join("config.json");
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config under `dir`, creating it if needed
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating config dir {}", dir.display()))?;
        }

        let config_path = dir.join("config.json");
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
            .with_context(|| format!("writing config {}", config_path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = std::env::temp_dir().join(format!("pixamp-config-test-{}", std::process::id()));

        let config = Config {
            session_token: Some("sess_0001".to_string()),
            user_email: Some("romain@pixamp.xyz".to_string()),
            fixture_path: None,
        };
        config.save_to(&dir).unwrap();

        let loaded = Config::load_from(&dir).unwrap();
        assert_eq!(loaded.session_token.as_deref(), Some("sess_0001"));
        assert_eq!(loaded.user_email.as_deref(), Some("romain@pixamp.xyz"));
        assert!(loaded.fixture_path.is_none());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_config_loads_as_none() {
        let dir = std::env::temp_dir().join("pixamp-config-test-missing");
        assert!(Config::load_from(&dir).is_none());
    }
}
