//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use thanks_sender::core::{
    AppResult, EmailAddress, EmailMessage, EmailSender, IdSet, StoreError, Taker, TakerApi,
    TakerId, TakerQueue, ThanksService,
};
use thanks_sender::infra::{InMemoryIdSet, InMemoryQueue};

// ============================================================================
// TAKERS
// ============================================================================

pub fn taker(id: TakerId, percent: f64) -> Taker {
    Taker {
        id,
        name: format!("Taker {id}"),
        email: format!("taker{id}@example.com"),
        percent,
        points: percent / 2.0,
        demo: false,
    }
}

pub fn demo_taker(id: TakerId, percent: f64) -> Taker {
    Taker {
        demo: true,
        ..taker(id, percent)
    }
}

// ============================================================================
// API
// ============================================================================

/// Returns a fixed list of takers, or fails every call when `failing` is set.
#[derive(Default)]
pub struct StubApi {
    takers: Mutex<Vec<Taker>>,
    failing: Mutex<bool>,
    pub list_calls: AtomicUsize,
}

impl StubApi {
    pub fn with_takers(takers: Vec<Taker>) -> Self {
        Self {
            takers: Mutex::new(takers),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn set_takers(&self, takers: Vec<Taker>) {
        *self.takers.lock() = takers;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TakerApi for StubApi {
    async fn authenticate(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_takers(&self) -> AppResult<Vec<Taker>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock() {
            return Err(anyhow!("API responded with code 503"));
        }
        Ok(self.takers.lock().clone())
    }
}

// ============================================================================
// STORES
// ============================================================================

/// Which store call a [`FailingQueue`] or [`FailingSet`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Push,
    Pop,
    Add,
    Contains,
}

/// Queue that fails one operation and delegates the other to memory.
pub struct FailingQueue {
    fail_on: FailOn,
    inner: InMemoryQueue,
}

impl FailingQueue {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            fail_on,
            inner: InMemoryQueue::new(),
        }
    }
}

#[async_trait]
impl TakerQueue for FailingQueue {
    async fn push(&self, taker: &Taker) -> Result<(), StoreError> {
        if self.fail_on == FailOn::Push {
            return Err(StoreError::Backend("push rejected".into()));
        }
        self.inner.push(taker).await
    }

    async fn pop(&self) -> Result<Option<Taker>, StoreError> {
        if self.fail_on == FailOn::Pop {
            return Err(StoreError::Backend("pop rejected".into()));
        }
        self.inner.pop().await
    }
}

/// Id set that fails one operation and delegates the other to memory.
pub struct FailingSet {
    fail_on: FailOn,
    inner: InMemoryIdSet,
}

impl FailingSet {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            fail_on,
            inner: InMemoryIdSet::new(),
        }
    }
}

#[async_trait]
impl IdSet for FailingSet {
    async fn add(&self, id: TakerId) -> Result<(), StoreError> {
        if self.fail_on == FailOn::Add {
            return Err(StoreError::Backend("add rejected".into()));
        }
        self.inner.add(id).await
    }

    async fn contains(&self, id: TakerId) -> Result<bool, StoreError> {
        if self.fail_on == FailOn::Contains {
            return Err(StoreError::Backend("contains rejected".into()));
        }
        self.inner.contains(id).await
    }
}

/// Empty queue that counts how often it was polled.
#[derive(Default)]
pub struct CountingQueue {
    pub pops: AtomicUsize,
}

impl CountingQueue {
    pub fn pops(&self) -> usize {
        self.pops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TakerQueue for CountingQueue {
    async fn push(&self, _taker: &Taker) -> Result<(), StoreError> {
        Ok(())
    }

    async fn pop(&self) -> Result<Option<Taker>, StoreError> {
        self.pops.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

// ============================================================================
// EMAIL
// ============================================================================

/// One captured email.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: EmailAddress,
    pub from: EmailAddress,
    pub message: EmailMessage,
}

/// Records every email instead of sending it. Optionally fails every send.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SentEmail>>,
    failing: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .map(|email| email.to.address.clone())
            .collect()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send_email(
        &self,
        to: &EmailAddress,
        from: &EmailAddress,
        message: &EmailMessage,
    ) -> AppResult<()> {
        if self.failing {
            return Err(anyhow!("smtp unavailable"));
        }
        self.sent.lock().push(SentEmail {
            to: to.clone(),
            from: from.clone(),
            message: message.clone(),
        });
        Ok(())
    }
}

// ============================================================================
// WIRING
// ============================================================================

/// A service over in-memory stores, with handles kept for assertions.
pub struct Harness {
    pub api: Arc<StubApi>,
    pub email: Arc<RecordingSender>,
    pub queue: Arc<InMemoryQueue>,
    pub sent: Arc<InMemoryIdSet>,
    pub service: Arc<ThanksService>,
}

impl Harness {
    pub fn new(api: StubApi) -> Self {
        Self::with_sender(api, RecordingSender::default())
    }

    pub fn with_sender(api: StubApi, email: RecordingSender) -> Self {
        let api = Arc::new(api);
        let email = Arc::new(email);
        let queue = Arc::new(InMemoryQueue::new());
        let sent = Arc::new(InMemoryIdSet::new());
        let service = Arc::new(ThanksService::new(
            api.clone(),
            email.clone(),
            queue.clone(),
            sent.clone(),
        ));
        Self {
            api,
            email,
            queue,
            sent,
            service,
        }
    }
}
