//! In-memory Secret Service for tests.
//!
//! [`FakeSecretService`] implements the client traits without a bus. Each
//! collection and item can be told to fail a specific call, and the fake
//! counts session opens, unlocks and secret reads so tests can check the
//! export sequence.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::error::{ServiceError, ServiceResult};
use crate::service::{SecretCollection, SecretItem, SecretServiceClient, SessionHandle};

const COLLECTION_PREFIX: &str = "/org/freedesktop/secrets/collection";
const SESSION_PREFIX: &str = "/org/freedesktop/secrets/session";

/// Default timestamp given to fake items (2023-11-14T22:13:20Z)
pub const DEFAULT_ITEM_TIME: u64 = 1_700_000_000;

fn path_segment(label: &str) -> String {
    if label.is_empty() {
        return "unnamed".to_string();
    }
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn injected(call: &str) -> ServiceError {
    ServiceError::Bus(format!("injected failure: {call}"))
}

/// Fake Secret Service holding a fixed list of collections
#[derive(Clone, Default)]
pub struct FakeSecretService {
    collections: Vec<FakeCollection>,
    unreachable: bool,
    failing_session: bool,
    sessions_opened: Arc<AtomicUsize>,
}

impl FakeSecretService {
    /// Creates a service with no collections
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection
    #[must_use]
    pub fn with_collection(mut self, collection: FakeCollection) -> Self {
        self.collections.push(collection);
        self
    }

    /// Makes listing collections fail as if the bus were down
    #[must_use]
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Makes session negotiation fail
    #[must_use]
    pub fn failing_session(mut self) -> Self {
        self.failing_session = true;
        self
    }

    /// Number of successful `open_session` calls
    #[must_use]
    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretServiceClient for FakeSecretService {
    async fn collections(&self) -> ServiceResult<Vec<Box<dyn SecretCollection>>> {
        if self.unreachable {
            return Err(ServiceError::Bus(
                "org.freedesktop.DBus.Error.ServiceUnknown".to_string(),
            ));
        }
        Ok(self
            .collections
            .iter()
            .cloned()
            .map(|c| Box::new(c) as Box<dyn SecretCollection>)
            .collect())
    }

    async fn open_session(&self) -> ServiceResult<SessionHandle> {
        if self.failing_session {
            return Err(injected("OpenSession"));
        }
        let n = self.sessions_opened.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SessionHandle::new(format!("{SESSION_PREFIX}/{n}")))
    }
}

/// Fake collection
#[derive(Clone)]
pub struct FakeCollection {
    path: String,
    label: String,
    items: Vec<FakeItem>,
    failing_label: bool,
    failing_items: bool,
}

impl FakeCollection {
    /// Creates an empty collection with the given label
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            path: format!("{COLLECTION_PREFIX}/{}", path_segment(label)),
            label: label.to_string(),
            items: Vec::new(),
            failing_label: false,
            failing_items: false,
        }
    }

    /// Adds an item; its path is placed under this collection
    #[must_use]
    pub fn with_item(mut self, mut item: FakeItem) -> Self {
        item.path = format!("{}/{}", self.path, self.items.len() + 1);
        self.items.push(item);
        self
    }

    /// Makes label reads fail
    #[must_use]
    pub fn failing_label(mut self) -> Self {
        self.failing_label = true;
        self
    }

    /// Makes item listing fail
    #[must_use]
    pub fn failing_items(mut self) -> Self {
        self.failing_items = true;
        self
    }
}

#[async_trait]
impl SecretCollection for FakeCollection {
    fn path(&self) -> &str {
        &self.path
    }

    async fn label(&self) -> ServiceResult<String> {
        if self.failing_label {
            return Err(injected("Label"));
        }
        Ok(self.label.clone())
    }

    async fn items(&self) -> ServiceResult<Vec<Box<dyn SecretItem>>> {
        if self.failing_items {
            return Err(injected("Items"));
        }
        Ok(self
            .items
            .iter()
            .cloned()
            .map(|i| Box::new(i) as Box<dyn SecretItem>)
            .collect())
    }
}

/// Fake item.
///
/// Clones share their call counters, so a test can keep a clone of an item
/// it hands to a collection and inspect it afterwards.
#[derive(Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct FakeItem {
    path: String,
    label: String,
    secret: Vec<u8>,
    created: u64,
    modified: u64,
    failing_unlock: bool,
    failing_label: bool,
    failing_secret: bool,
    failing_created: bool,
    failing_modified: bool,
    unlock_calls: Arc<AtomicUsize>,
    secret_reads: Arc<AtomicUsize>,
}

impl FakeItem {
    /// Creates an item with the given label and secret text
    #[must_use]
    pub fn new(label: &str, secret: &str) -> Self {
        Self::with_secret_bytes(label, secret.as_bytes())
    }

    /// Creates an item with a raw secret value
    #[must_use]
    pub fn with_secret_bytes(label: &str, secret: &[u8]) -> Self {
        Self {
            path: format!("{COLLECTION_PREFIX}/detached/{}", path_segment(label)),
            label: label.to_string(),
            secret: secret.to_vec(),
            created: DEFAULT_ITEM_TIME,
            modified: DEFAULT_ITEM_TIME,
            failing_unlock: false,
            failing_label: false,
            failing_secret: false,
            failing_created: false,
            failing_modified: false,
            unlock_calls: Arc::new(AtomicUsize::new(0)),
            secret_reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets creation and modification times (seconds since the epoch)
    #[must_use]
    pub const fn with_times(mut self, created: u64, modified: u64) -> Self {
        self.created = created;
        self.modified = modified;
        self
    }

    /// Makes unlocking fail as if the prompt were dismissed
    #[must_use]
    pub fn failing_unlock(mut self) -> Self {
        self.failing_unlock = true;
        self
    }

    /// Makes label reads fail
    #[must_use]
    pub fn failing_label(mut self) -> Self {
        self.failing_label = true;
        self
    }

    /// Makes secret reads fail
    #[must_use]
    pub fn failing_secret(mut self) -> Self {
        self.failing_secret = true;
        self
    }

    /// Makes creation time reads fail
    #[must_use]
    pub fn failing_created(mut self) -> Self {
        self.failing_created = true;
        self
    }

    /// Makes modification time reads fail
    #[must_use]
    pub fn failing_modified(mut self) -> Self {
        self.failing_modified = true;
        self
    }

    /// Number of `unlock` calls so far
    #[must_use]
    pub fn unlock_calls(&self) -> usize {
        self.unlock_calls.load(Ordering::SeqCst)
    }

    /// Number of `secret` calls so far
    #[must_use]
    pub fn secret_reads(&self) -> usize {
        self.secret_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretItem for FakeItem {
    fn path(&self) -> &str {
        &self.path
    }

    async fn unlock(&self) -> ServiceResult<()> {
        self.unlock_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_unlock {
            return Err(ServiceError::PromptDismissed);
        }
        Ok(())
    }

    async fn label(&self) -> ServiceResult<String> {
        if self.failing_label {
            return Err(injected("Label"));
        }
        Ok(self.label.clone())
    }

    async fn secret(&self, session: &SessionHandle) -> ServiceResult<Zeroizing<Vec<u8>>> {
        self.secret_reads.fetch_add(1, Ordering::SeqCst);
        if self.failing_secret {
            return Err(injected("GetSecret"));
        }
        if !session.path().starts_with(SESSION_PREFIX) {
            return Err(ServiceError::Bus(format!(
                "org.freedesktop.Secret.Error.NoSession: {}",
                session.path()
            )));
        }
        Ok(Zeroizing::new(self.secret.clone()))
    }

    async fn created(&self) -> ServiceResult<u64> {
        if self.failing_created {
            return Err(injected("Created"));
        }
        Ok(self.created)
    }

    async fn modified(&self) -> ServiceResult<u64> {
        if self.failing_modified {
            return Err(injected("Modified"));
        }
        Ok(self.modified)
    }
}
