//! Client-side settings persistence
//!
//! The marketplace selection survives restarts through two redundant
//! backends written through a single `SettingsStore` interface: a JSON
//! key-value file and a cookie-jar style line file a server could also read.
//! The current selection and the default marketplace live under separate
//! keys so the default can be removed without touching the selection.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Key for the currently selected marketplace
pub const MARKETPLACE_KEY: &str = "marketplace";
/// Key for the default marketplace, independently removable
pub const DEFAULT_MARKETPLACE_KEY: &str = "defaultMarketplace";

/// Minimal key-value persistence surface
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// JSON object persisted to a file, one key per setting
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> Map<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| serde_json::from_str::<Value>(&contents).ok())
            .and_then(|value| value.as_object().cloned())
            .unwrap_or_default()
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating settings dir {}", dir.display()))?;
        }
        let contents = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing settings file {}", self.path.display()))
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map()
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Cookie-jar style file: one `name=value` pair per line
pub struct CookieFileStore {
    path: PathBuf,
}

impl CookieFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_pairs(&self) -> Vec<(String, String)> {
        fs::read_to_string(&self.path)
            .unwrap_or_default()
            .lines()
            .filter_map(|line| {
                line.split_once('=')
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            })
            .collect()
    }

    fn write_pairs(&self, pairs: &[(String, String)]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating settings dir {}", dir.display()))?;
        }
        let contents: String = pairs
            .iter()
            .map(|(k, v)| format!("{}={}\n", k, v))
            .collect();
        fs::write(&self.path, contents)
            .with_context(|| format!("writing cookie file {}", self.path.display()))
    }
}

impl SettingsStore for CookieFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut pairs = self.read_pairs();
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value.to_string(),
            None => pairs.push((key.to_string(), value.to_string())),
        }
        self.write_pairs(&pairs)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut pairs = self.read_pairs();
        let before = pairs.len();
        pairs.retain(|(k, _)| k != key);
        if pairs.len() != before {
            self.write_pairs(&pairs)?;
        }
        Ok(())
    }
}

/// Writes through both backends; reads prefer the primary and fall back to
/// the secondary
pub struct DualStore<P, S> {
    primary: P,
    secondary: S,
}

impl<P: SettingsStore, S: SettingsStore> DualStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: SettingsStore, S: SettingsStore> SettingsStore for DualStore<P, S> {
    fn get(&self, key: &str) -> Option<String> {
        self.primary.get(key).or_else(|| self.secondary.get(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.primary.set(key, value)?;
        self.secondary.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.primary.remove(key)?;
        self.secondary.remove(key)
    }
}

/// The store the app actually uses: JSON settings plus the cookie mirror,
/// both under the config directory
pub fn default_store(config_dir: PathBuf) -> DualStore<JsonFileStore, CookieFileStore> {
    DualStore::new(
        JsonFileStore::new(config_dir.join("settings.json")),
        CookieFileStore::new(config_dir.join("cookies")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        map: HashMap<String, String>,
    }

    impl SettingsStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.map.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.map.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.map.remove(key);
            Ok(())
        }
    }

    #[test]
    fn test_dual_store_writes_through_both_backends() {
        let mut store = DualStore::new(MemoryStore::default(), MemoryStore::default());
        store.set(MARKETPLACE_KEY, "mx").unwrap();

        assert_eq!(store.primary.get(MARKETPLACE_KEY).as_deref(), Some("mx"));
        assert_eq!(store.secondary.get(MARKETPLACE_KEY).as_deref(), Some("mx"));
    }

    #[test]
    fn test_dual_store_reads_fall_back_to_the_secondary() {
        let mut secondary = MemoryStore::default();
        secondary.set(MARKETPLACE_KEY, "uk").unwrap();
        let store = DualStore::new(MemoryStore::default(), secondary);

        assert_eq!(store.get(MARKETPLACE_KEY).as_deref(), Some("uk"));
    }

    #[test]
    fn test_default_key_is_independent_of_the_selection() {
        let mut store = DualStore::new(MemoryStore::default(), MemoryStore::default());
        store.set(MARKETPLACE_KEY, "us").unwrap();
        store.set(DEFAULT_MARKETPLACE_KEY, "us").unwrap();

        store.remove(DEFAULT_MARKETPLACE_KEY).unwrap();
        assert_eq!(store.get(DEFAULT_MARKETPLACE_KEY), None);
        assert_eq!(store.get(MARKETPLACE_KEY).as_deref(), Some("us"));
    }

    #[test]
    fn test_file_backends_round_trip() {
        let dir = std::env::temp_dir().join(format!("pixamp-settings-{}", std::process::id()));
        let mut json = JsonFileStore::new(dir.join("settings.json"));
        let mut cookies = CookieFileStore::new(dir.join("cookies"));

        json.set("marketplace", "ca").unwrap();
        cookies.set("marketplace", "ca").unwrap();
        assert_eq!(json.get("marketplace").as_deref(), Some("ca"));
        assert_eq!(cookies.get("marketplace").as_deref(), Some("ca"));

        json.remove("marketplace").unwrap();
        cookies.remove("marketplace").unwrap();
        assert_eq!(json.get("marketplace"), None);
        assert_eq!(cookies.get("marketplace"), None);

        let _ = std::fs::remove_dir_all(dir);
    }
}
