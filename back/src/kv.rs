use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
};

use eyre::WrapErr;

/// String keyed storage that outlives the process.
pub trait KeyValueStore {
    /// Returns `None` when nothing was ever stored under `key`.
    fn get(&self, key: &str) -> eyre::Result<Option<String>>;

    /// Replaces whatever is stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> eyre::Result<()>;
}

/// One file per key inside a data directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> eyre::Result<Option<String>> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).wrap_err_with(|| format!("reading {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> eyre::Result<()> {
        fs::create_dir_all(&self.dir)
            .wrap_err_with(|| format!("creating {}", self.dir.display()))?;

        // write next to the target and rename, so a crash never leaves half a file
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).wrap_err_with(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).wrap_err_with(|| format!("replacing {}", path.display()))?;

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> eyre::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> eyre::Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> eyre::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> eyre::Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("ai-todos").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("ai-todos", "[]").unwrap();
        store.set("ai-todos", "[1]").unwrap();

        assert_eq!(store.get("ai-todos").unwrap().as_deref(), Some("[1]"));
        assert!(!dir.path().join("nested/ai-todos.json.tmp").exists());
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
