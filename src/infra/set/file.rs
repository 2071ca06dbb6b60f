//! File-backed id set: one id per line, append-only.

use std::collections::HashSet;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::core::{IdSet, StoreError, TakerId};

/// Id set persisted to `<dir>/<name>.ids`.
pub struct FileIdSet {
    path: PathBuf,
    ids: RwLock<HashSet<TakerId>>,
}

impl FileIdSet {
    /// Open (or create) the set stored under `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created or the file holds a line that
    /// is not an integer id.
    pub fn open(dir: impl AsRef<Path>, name: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        create_dir_all(dir)?;
        let path = dir.join(format!("{name}.ids"));
        let ids = load_from_disk(&path)?;
        debug!(path = %path.display(), ids = ids.len(), "file id set opened");
        Ok(Self {
            path,
            ids: RwLock::new(ids),
        })
    }

    /// Number of recorded ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    /// True when no id was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }
}

fn load_from_disk(path: &Path) -> Result<HashSet<TakerId>, StoreError> {
    let mut ids = HashSet::new();
    if !path.exists() {
        return Ok(ids);
    }
    let reader = BufReader::new(OpenOptions::new().read(true).open(path)?);
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let id = line
            .parse()
            .map_err(|e| StoreError::Backend(format!("bad id line `{line}`: {e}")))?;
        ids.insert(id);
    }
    Ok(ids)
}

#[async_trait]
impl IdSet for FileIdSet {
    async fn add(&self, id: TakerId) -> Result<(), StoreError> {
        let mut ids = self.ids.write();
        if ids.contains(&id) {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{id}")?;
        ids.insert(id);
        Ok(())
    }

    async fn contains(&self, id: TakerId) -> Result<bool, StoreError> {
        Ok(self.ids.read().contains(&id))
    }
}
