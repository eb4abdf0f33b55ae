//! Secret Service client over D-Bus
//!
//! Talks to `org.freedesktop.secrets` on the session bus (GNOME Keyring,
//! KWallet, KeePassXC, ...). Sessions are opened with the `plain` algorithm:
//! secret values travel unencrypted over the local session bus.

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use zbus::proxy::CacheProperties;
use zbus::{Connection, proxy};
use zeroize::Zeroizing;
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Type, Value};

use crate::error::{ServiceError, ServiceResult};

use super::{SecretCollection, SecretItem, SecretServiceClient, SessionHandle};

/// Session algorithm requesting no transport encryption
const PLAIN_ALGORITHM: &str = "plain";

/// Object path returned in place of a prompt when none is needed
const NO_PROMPT: &str = "/";

#[proxy(
    interface = "org.freedesktop.Secret.Service",
    default_service = "org.freedesktop.secrets",
    default_path = "/org/freedesktop/secrets",
    gen_blocking = false
)]
trait Service {
    fn open_session(
        &self,
        algorithm: &str,
        input: &Value<'_>,
    ) -> zbus::Result<(OwnedValue, OwnedObjectPath)>;

    fn unlock(
        &self,
        objects: &[ObjectPath<'_>],
    ) -> zbus::Result<(Vec<OwnedObjectPath>, OwnedObjectPath)>;

    #[zbus(property)]
    fn collections(&self) -> zbus::Result<Vec<OwnedObjectPath>>;
}

#[proxy(
    interface = "org.freedesktop.Secret.Collection",
    default_service = "org.freedesktop.secrets",
    gen_blocking = false
)]
trait Collection {
    #[zbus(property)]
    fn items(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    #[zbus(property)]
    fn label(&self) -> zbus::Result<String>;
}

/// Wire form of a secret: `(oayays)`.
///
/// D-Bus structs are decoded by position; only `value` is used.
#[derive(Serialize, Deserialize, Type)]
struct Secret {
    _session: OwnedObjectPath,
    _parameters: Vec<u8>,
    value: Vec<u8>,
    _content_type: String,
}

#[proxy(
    interface = "org.freedesktop.Secret.Item",
    default_service = "org.freedesktop.secrets",
    gen_blocking = false
)]
trait Item {
    fn get_secret(&self, session: &ObjectPath<'_>) -> zbus::Result<Secret>;

    #[zbus(property)]
    fn label(&self) -> zbus::Result<String>;

    #[zbus(property)]
    fn locked(&self) -> zbus::Result<bool>;

    #[zbus(property)]
    fn created(&self) -> zbus::Result<u64>;

    #[zbus(property)]
    fn modified(&self) -> zbus::Result<u64>;
}

#[proxy(
    interface = "org.freedesktop.Secret.Prompt",
    default_service = "org.freedesktop.secrets",
    gen_blocking = false
)]
trait Prompt {
    fn prompt(&self, window_id: &str) -> zbus::Result<()>;

    #[zbus(signal)]
    fn completed(&self, dismissed: bool, result: Value<'_>) -> zbus::Result<()>;
}

/// Secret Service client bound to a D-Bus connection
pub struct DbusSecretService {
    connection: Connection,
    service: ServiceProxy<'static>,
}

impl DbusSecretService {
    /// Connects to the Secret Service on the user's session bus.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Bus` if the session bus cannot be reached.
    pub async fn connect() -> ServiceResult<Self> {
        let connection = Connection::session().await?;
        Self::with_connection(connection).await
    }

    /// Builds a client on top of an existing bus connection.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Bus` if the service proxy cannot be created.
    pub async fn with_connection(connection: Connection) -> ServiceResult<Self> {
        let service = ServiceProxy::builder(&connection)
            .cache_properties(CacheProperties::No)
            .build()
            .await?;
        Ok(Self {
            connection,
            service,
        })
    }
}

#[async_trait]
impl SecretServiceClient for DbusSecretService {
    async fn collections(&self) -> ServiceResult<Vec<Box<dyn SecretCollection>>> {
        let paths = self.service.collections().await?;
        tracing::debug!(count = paths.len(), "Secret Service reported collections");

        let mut collections: Vec<Box<dyn SecretCollection>> = Vec::with_capacity(paths.len());
        for path in paths {
            let proxy = CollectionProxy::builder(&self.connection)
                .path(path.as_str().to_owned())?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;
            collections.push(Box::new(DbusCollection {
                path: path.as_str().to_owned(),
                connection: self.connection.clone(),
                service: self.service.clone(),
                proxy,
            }));
        }
        Ok(collections)
    }

    async fn open_session(&self) -> ServiceResult<SessionHandle> {
        let (_, path) = self
            .service
            .open_session(PLAIN_ALGORITHM, &Value::from(""))
            .await?;
        tracing::debug!(session = %path.as_str(), "Opened plain secret session");
        Ok(SessionHandle::new(path.as_str()))
    }
}

struct DbusCollection {
    path: String,
    connection: Connection,
    service: ServiceProxy<'static>,
    proxy: CollectionProxy<'static>,
}

#[async_trait]
impl SecretCollection for DbusCollection {
    fn path(&self) -> &str {
        &self.path
    }

    async fn label(&self) -> ServiceResult<String> {
        Ok(self.proxy.label().await?)
    }

    async fn items(&self) -> ServiceResult<Vec<Box<dyn SecretItem>>> {
        let paths = self.proxy.items().await?;

        let mut items: Vec<Box<dyn SecretItem>> = Vec::with_capacity(paths.len());
        for path in paths {
            let proxy = ItemProxy::builder(&self.connection)
                .path(path.as_str().to_owned())?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;
            items.push(Box::new(DbusItem {
                path: path.as_str().to_owned(),
                connection: self.connection.clone(),
                service: self.service.clone(),
                proxy,
            }));
        }
        Ok(items)
    }
}

struct DbusItem {
    path: String,
    connection: Connection,
    service: ServiceProxy<'static>,
    proxy: ItemProxy<'static>,
}

#[async_trait]
impl SecretItem for DbusItem {
    fn path(&self) -> &str {
        &self.path
    }

    async fn unlock(&self) -> ServiceResult<()> {
        if !self.proxy.locked().await? {
            return Ok(());
        }

        let target = ObjectPath::try_from(self.path.as_str())?;
        let (_, prompt) = self.service.unlock(&[target]).await?;
        if prompt.as_str() == NO_PROMPT {
            return Ok(());
        }

        tracing::debug!(item = %self.path, prompt = %prompt.as_str(), "Waiting for unlock prompt");
        run_prompt(&self.connection, &prompt).await
    }

    async fn label(&self) -> ServiceResult<String> {
        Ok(self.proxy.label().await?)
    }

    async fn secret(&self, session: &SessionHandle) -> ServiceResult<Zeroizing<Vec<u8>>> {
        let session = ObjectPath::try_from(session.path())?;
        let secret = self.proxy.get_secret(&session).await?;
        Ok(Zeroizing::new(secret.value))
    }

    async fn created(&self) -> ServiceResult<u64> {
        Ok(self.proxy.created().await?)
    }

    async fn modified(&self) -> ServiceResult<u64> {
        Ok(self.proxy.modified().await?)
    }
}

/// Shows a prompt and waits for its `Completed` signal.
///
/// The signal subscription is set up before calling `Prompt` so a fast
/// completion cannot be missed. There is no timeout: the call returns once
/// the user answers or the service gives up.
async fn run_prompt(connection: &Connection, path: &OwnedObjectPath) -> ServiceResult<()> {
    let prompt = PromptProxy::builder(connection)
        .path(path.as_str().to_owned())?
        .cache_properties(CacheProperties::No)
        .build()
        .await?;

    let mut completed = prompt.receive_completed().await?;
    prompt.prompt("").await?;

    let signal = completed.next().await.ok_or(ServiceError::PromptAborted)?;
    let args = signal.args()?;
    if *args.dismissed() {
        return Err(ServiceError::PromptDismissed);
    }
    Ok(())
}
