//! Persistence gateway: the durable key-value store behind the library
//! index.

use crate::error::TabError;
use home::home_dir;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// Durable key-value store the index snapshots to.
///
/// Failures are non-fatal for callers: the index logs and carries on,
/// and a failed save is implicitly retried on the next mutation since
/// every mutation re-saves the full state.
pub trait PersistenceGateway {
    /// Loads the blob stored under `key`, `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, TabError>;

    /// Stores `blob` under `key`.
    fn save(&self, key: &str, blob: &str) -> Result<(), TabError>;
}

/// File-backed gateway, one `<key>.json` file per key.
pub struct FileGateway {
    base_path: PathBuf,
}

impl FileGateway {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".tabscribe";

    /// Gateway rooted in the home dot-folder, created on first use.
    pub fn open() -> Result<Self, TabError> {
        let home = home_dir().ok_or_else(|| {
            TabError::PersistenceUnavailable("could not find home directory".to_string())
        })?;
        Self::at(home.join(Self::FOLDER))
    }

    /// Gateway rooted at an explicit directory.
    pub fn at(base_path: PathBuf) -> Result<Self, TabError> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        Ok(FileGateway { base_path })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

impl PersistenceGateway for FileGateway {
    fn load(&self, key: &str) -> Result<Option<String>, TabError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(path)?;
        Ok(Some(blob))
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), TabError> {
        fs::write(self.key_path(key), blob)?;
        Ok(())
    }
}

/// In-memory gateway for tests.
///
/// `RefCell` is enough, the whole model is single-threaded. Clones
/// share the backing map so a library restored from a clone observes
/// what an earlier one saved.
#[derive(Default, Clone)]
pub struct MemoryGateway {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_saves: Rc<RefCell<bool>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail, for error-path tests.
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.borrow_mut() = fail;
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self, key: &str) -> Result<Option<String>, TabError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), TabError> {
        if *self.fail_saves.borrow() {
            return Err(TabError::PersistenceUnavailable(
                "simulated write failure".to_string(),
            ));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
