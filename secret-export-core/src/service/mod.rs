//! Secret Service client seam
//!
//! The export pipeline only talks to the secret store through the traits in
//! this module. [`DbusSecretService`] implements them over the
//! freedesktop.org Secret Service D-Bus API; [`crate::testing`] provides an
//! in-memory implementation for tests.

mod dbus;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::error::ServiceResult;

pub use dbus::DbusSecretService;

/// Handle of an open secret retrieval session.
///
/// Wraps the session object path returned by `OpenSession`. Secrets can only
/// be read through an item by passing the handle of a session that is still
/// open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    path: String,
}

impl SessionHandle {
    /// Creates a handle for the given session object path
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Object path of the session
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Entry point to the secret store
#[async_trait]
pub trait SecretServiceClient: Send + Sync {
    /// Returns every collection, in the order reported by the service.
    async fn collections(&self) -> ServiceResult<Vec<Box<dyn SecretCollection>>>;

    /// Negotiates a new secret retrieval session.
    async fn open_session(&self) -> ServiceResult<SessionHandle>;
}

/// A named container of secret items
#[async_trait]
pub trait SecretCollection: Send + Sync {
    /// Stable identifier used in diagnostics (the D-Bus object path)
    fn path(&self) -> &str;

    /// Reads the collection label
    async fn label(&self) -> ServiceResult<String>;

    /// Returns every item of the collection
    async fn items(&self) -> ServiceResult<Vec<Box<dyn SecretItem>>>;
}

/// One stored secret.
///
/// [`unlock`](Self::unlock) must succeed before [`secret`](Self::secret) can
/// be read. Unlocking an already unlocked item is a no-op; unlocking a
/// locked one may block until the user answers a prompt shown by the
/// service.
#[async_trait]
pub trait SecretItem: Send + Sync {
    /// Stable identifier used in diagnostics (the D-Bus object path)
    fn path(&self) -> &str;

    /// Unlocks the item, waiting for any prompt to complete
    async fn unlock(&self) -> ServiceResult<()>;

    /// Reads the item label
    async fn label(&self) -> ServiceResult<String>;

    /// Reads the secret value through the given session
    async fn secret(&self, session: &SessionHandle) -> ServiceResult<Zeroizing<Vec<u8>>>;

    /// Creation time in seconds since the Unix epoch (0 when unknown)
    async fn created(&self) -> ServiceResult<u64>;

    /// Modification time in seconds since the Unix epoch (0 when unknown)
    async fn modified(&self) -> ServiceResult<u64>;
}
