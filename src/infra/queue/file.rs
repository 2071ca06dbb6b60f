//! File-backed queue persisting takers as JSON lines.
//!
//! The whole queue is mirrored in memory. Pushes append one line; pops rewrite
//! the file with the remaining entries. Contents are reloaded on open, so a
//! restarted service resumes where it stopped.

use std::collections::VecDeque;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::core::{StoreError, Taker, TakerQueue};

/// File-backed FIFO queue.
pub struct FileQueue {
    path: PathBuf,
    takers: Mutex<VecDeque<Taker>>,
}

impl FileQueue {
    /// Open (or create) the queue stored as `<dir>/<stream>.jsonl`.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created or an existing file holds an
    /// undecodable line.
    pub fn open(dir: impl AsRef<Path>, stream: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        create_dir_all(dir)?;
        let path = dir.join(format!("{stream}.jsonl"));
        let takers = load_from_disk(&path)?;
        debug!(path = %path.display(), queued = takers.len(), "file queue opened");
        Ok(Self {
            path,
            takers: Mutex::new(takers),
        })
    }

    /// Current depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.takers.lock().len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.takers.lock().is_empty()
    }

    fn append_to_disk(&self, taker: &Taker) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(taker)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn rewrite_disk(&self, takers: &VecDeque<Taker>) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        for taker in takers {
            let line = serde_json::to_string(taker)?;
            writeln!(file, "{line}")?;
        }
        Ok(())
    }
}

fn load_from_disk(path: &Path) -> Result<VecDeque<Taker>, StoreError> {
    let mut takers = VecDeque::new();
    if !path.exists() {
        return Ok(takers);
    }
    let reader = BufReader::new(OpenOptions::new().read(true).open(path)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        takers.push_back(serde_json::from_str(&line)?);
    }
    Ok(takers)
}

#[async_trait]
impl TakerQueue for FileQueue {
    async fn push(&self, taker: &Taker) -> Result<(), StoreError> {
        let mut takers = self.takers.lock();
        self.append_to_disk(taker)?;
        takers.push_back(taker.clone());
        debug!(taker_id = taker.id, "push");
        Ok(())
    }

    async fn pop(&self) -> Result<Option<Taker>, StoreError> {
        let mut takers = self.takers.lock();
        let Some(taker) = takers.pop_front() else {
            return Ok(None);
        };
        if let Err(err) = self.rewrite_disk(&takers) {
            takers.push_front(taker);
            return Err(err);
        }
        debug!(taker_id = taker.id, "pop");
        Ok(Some(taker))
    }
}
