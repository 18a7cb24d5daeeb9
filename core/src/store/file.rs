// burgerbox/src/store/file.rs
use super::KeyValueStore;
use crate::error::StoreError;
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader never sees a half-written value.
#[derive(Debug)]
pub struct FileStore {
  dir: PathBuf,
  // Serializes writers within this process.
  write_lock: Mutex<()>,
}

impl FileStore {
  /// Opens (and creates if needed) the data directory.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
      key: dir.display().to_string(),
      source,
    })?;
    Ok(Self {
      dir,
      write_lock: Mutex::new(()),
    })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
      return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(self.dir.join(format!("{}.json", key)))
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let path = self.path_for(key)?;
    match std::fs::read_to_string(&path) {
      Ok(value) => Ok(Some(value)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(source) => Err(StoreError::Io {
        key: key.to_string(),
        source,
      }),
    }
  }

  #[instrument(skip(self, value), fields(bytes = value.len()))]
  fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let path = self.path_for(key)?;
    let tmp = path.with_extension("json.tmp");
    let io_err = |source: std::io::Error| StoreError::Io {
      key: key.to_string(),
      source,
    };
    let _guard = self.write_lock.lock();
    std::fs::write(&tmp, value).map_err(io_err)?;
    std::fs::rename(&tmp, &path).map_err(io_err)?;
    debug!(path = %path.display(), "Value written.");
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    let path = self.path_for(key)?;
    let _guard = self.write_lock.lock();
    match std::fs::remove_file(&path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(source) => Err(StoreError::Io {
        key: key.to_string(),
        source,
      }),
    }
  }
}
