//! In-memory id set.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::core::{IdSet, StoreError, TakerId};

/// Simple in-memory id set for development/testing.
#[derive(Default)]
pub struct InMemoryIdSet {
    ids: RwLock<HashSet<TakerId>>,
}

impl InMemoryIdSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

#[async_trait]
impl IdSet for InMemoryIdSet {
    async fn add(&self, id: TakerId) -> Result<(), StoreError> {
        self.ids.write().insert(id);
        Ok(())
    }

    async fn contains(&self, id: TakerId) -> Result<bool, StoreError> {
        Ok(self.ids.read().contains(&id))
    }
}
