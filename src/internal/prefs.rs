use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use strum_macros::Display;
use tracing::{info, warn};

const APP_DIR: &str = "tui-wellness-app";

/// Prefix for every preference file name, so the app's keys cannot collide
/// with anything else that ends up in the same directory.
const KEY_PREFIX: &str = "wellness";

/// The durable per-user keys. Each key lives in its own JSON file; writes to
/// different keys are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PrefKey {
    Favorites,
    Theme,
    Category,
    LastFetch,
}

impl PrefKey {
    fn as_file_stem(&self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::Theme => "theme",
            Self::Category => "category",
            Self::LastFetch => "last_fetch",
        }
    }
}

/// Durable key-value store over per-key JSON files in the OS config
/// directory. Reads fall back to a caller-supplied default and writes are
/// best-effort; neither ever surfaces an error to the caller, the fault is
/// only logged. When no config directory can be resolved the store still
/// works, it just keeps nothing across runs.
#[derive(Debug, Clone)]
pub struct PrefStore {
    dir: Option<PathBuf>,
}

impl PrefStore {
    /// Open the store at the OS-specific config location, creating the
    /// directory on first use.
    pub fn open() -> Self {
        match dirs::config_dir() {
            Some(base) => Self::at(base.join(APP_DIR)),
            None => {
                warn!("could not resolve a config directory, preferences will not persist");
                Self { dir: None }
            }
        }
    }

    /// Open the store at an explicit directory. Used by tests and by anyone
    /// who wants preferences somewhere other than the OS default.
    pub fn at(dir: PathBuf) -> Self {
        if !dir.exists()
            && let Err(e) = fs::create_dir_all(&dir)
        {
            warn!(dir = %dir.display(), %e, "failed to create preference directory, preferences will not persist");
            return Self { dir: None };
        }
        info!(dir = %dir.display(), "resolved preference directory");
        Self { dir: Some(dir) }
    }

    fn key_path(&self, key: PrefKey) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{}_{}.json", KEY_PREFIX, key.as_file_stem())))
    }

    /// Read and deserialize the value stored under `key`. Absence, unreadable
    /// files, and parse failures all yield `default`.
    pub fn get<T: DeserializeOwned>(&self, key: PrefKey, default: T) -> T {
        let Some(path) = self.key_path(key) else {
            return default;
        };
        if !path.exists() {
            return default;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key = %key, %e, "stored preference is unreadable, using default");
                    default
                }
            },
            Err(e) => {
                warn!(key = %key, %e, "failed to read preference file, using default");
                default
            }
        }
    }

    /// Serialize and persist `value` under `key`. A failed write is logged
    /// and dropped; the in-memory value stays authoritative for the session.
    pub fn set<T: Serialize>(&self, key: PrefKey, value: &T) {
        let Some(path) = self.key_path(key) else {
            info!(key = %key, "no preference directory, dropping write");
            return;
        };

        match serde_json::to_string_pretty(value) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    warn!(key = %key, %e, "failed to write preference, keeping in-memory value only");
                }
            }
            Err(e) => {
                warn!(key = %key, %e, "failed to serialize preference");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> PrefStore {
        let dir = std::env::temp_dir().join(format!("wellness-prefs-{name}"));
        let _ = fs::remove_dir_all(&dir);
        PrefStore::at(dir)
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let store = scratch_store("roundtrip");
        store.set(PrefKey::Category, &"fitness".to_string());
        let got: String = store.get(PrefKey::Category, "all".to_string());
        assert_eq!(got, "fitness");
    }

    #[test]
    fn test_get_returns_default_when_absent() {
        let store = scratch_store("absent");
        let got: String = store.get(PrefKey::Category, "all".to_string());
        assert_eq!(got, "all");
    }

    #[test]
    fn test_get_returns_default_on_corrupt_content() {
        let store = scratch_store("corrupt");
        let path = store.key_path(PrefKey::Theme).unwrap();
        fs::write(&path, "definitely not json").unwrap();
        let got: String = store.get(PrefKey::Theme, "light".to_string());
        assert_eq!(got, "light");
    }

    #[test]
    fn test_keys_are_independent_files() {
        let store = scratch_store("independent");
        store.set(PrefKey::Category, &"sleep".to_string());
        store.set(PrefKey::LastFetch, &1_700_000_000_i64);

        let category: String = store.get(PrefKey::Category, "all".to_string());
        let last_fetch: i64 = store.get(PrefKey::LastFetch, 0);
        assert_eq!(category, "sleep");
        assert_eq!(last_fetch, 1_700_000_000);
    }

    #[test]
    fn test_store_without_directory_is_inert() {
        let store = PrefStore { dir: None };
        store.set(PrefKey::Category, &"fitness".to_string());
        let got: String = store.get(PrefKey::Category, "all".to_string());
        assert_eq!(got, "all");
    }
}
