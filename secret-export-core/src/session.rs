//! Secret retrieval session

use crate::error::{ExportError, ExportResult};
use crate::service::{SecretServiceClient, SessionHandle};

/// An open secret retrieval session.
///
/// One session is opened per export run, after the items are listed and
/// before the first secret is read. It is valid until the bus connection
/// closes at process exit.
#[derive(Debug, Clone)]
pub struct SecretSession {
    handle: SessionHandle,
}

impl SecretSession {
    /// Negotiates a session with the service.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Session` if negotiation fails. No secret can be
    /// read without a session, so callers must abort the export.
    pub async fn open(client: &dyn SecretServiceClient) -> ExportResult<Self> {
        let handle = client
            .open_session()
            .await
            .map_err(|e| ExportError::Session(e.to_string()))?;
        tracing::debug!(session = %handle.path(), "Secret session ready");
        Ok(Self { handle })
    }

    /// Handle passed to item secret reads
    #[must_use]
    pub const fn handle(&self) -> &SessionHandle {
        &self.handle
    }
}
