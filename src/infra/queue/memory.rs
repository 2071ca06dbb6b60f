//! In-memory FIFO queue for development and tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::core::{StoreError, Taker, TakerQueue};

/// In-memory queue storing takers in insertion order.
#[derive(Default)]
pub struct InMemoryQueue {
    takers: Mutex<VecDeque<Taker>>,
}

impl InMemoryQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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
}

#[async_trait]
impl TakerQueue for InMemoryQueue {
    async fn push(&self, taker: &Taker) -> Result<(), StoreError> {
        debug!(taker_id = taker.id, "push");
        self.takers.lock().push_back(taker.clone());
        Ok(())
    }

    async fn pop(&self) -> Result<Option<Taker>, StoreError> {
        let taker = self.takers.lock().pop_front();
        if let Some(taker) = &taker {
            debug!(taker_id = taker.id, "pop");
        }
        Ok(taker)
    }
}
