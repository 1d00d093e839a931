//! JSON-file implementation of the core's key-value store.
//!
//! One file per key inside the `.tick` directory. Writes go through a
//! temp-file-then-rename so a crash mid-write never leaves a torn file.

use anyhow::Context as _;
use std::fs;
use std::path::PathBuf;
use tick_core::effect::KeyValueStore;

/// Key-value store backed by `<dir>/<key>.json` files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir` (the `.tick` directory).
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(raw))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFileStore;
    use tick_core::effect::KeyValueStore;

    #[test]
    fn get_missing_key_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().to_path_buf());
        assert_eq!(store.get("tasks").expect("reads"), None);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonFileStore::new(dir.path().to_path_buf());
        store.set("tasks", "{\"version\":1,\"tasks\":[]}").expect("writes");
        assert_eq!(
            store.get("tasks").expect("reads").as_deref(),
            Some("{\"version\":1,\"tasks\":[]}")
        );
    }

    #[test]
    fn set_replaces_atomically_leaving_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = JsonFileStore::new(dir.path().to_path_buf());
        store.set("tasks", "one").expect("writes");
        store.set("tasks", "two").expect("overwrites");
        assert_eq!(store.get("tasks").expect("reads").as_deref(), Some("two"));
        assert!(!dir.path().join("tasks.json.tmp").exists());
    }

    #[test]
    fn missing_directory_fails_the_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        let mut store = JsonFileStore::new(missing);
        assert!(store.set("tasks", "x").is_err());
    }
}
