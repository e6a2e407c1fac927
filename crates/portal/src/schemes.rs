//! Scheme service: the benefit catalogue and role-matched suggestions.

use domain::{Scheme, Session, reference_schemes};
use local_store::{LocalStore, keys};

use crate::remote::RemoteClient;

#[derive(Debug, Clone)]
pub struct SchemeService {
    remote: RemoteClient,
    store: LocalStore,
}

impl SchemeService {
    pub(crate) fn new(remote: RemoteClient, store: LocalStore) -> Self {
        Self { remote, store }
    }

    /// Lists the scheme catalogue.
    ///
    /// Served remotely when possible; an unavailable remote or an empty
    /// remote list falls back to the built-in reference data, so the
    /// catalogue is never blank.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Vec<Scheme> {
        match self.remote.schemes().await {
            Ok(schemes) if !schemes.is_empty() => schemes,
            Ok(_) => {
                tracing::info!("remote scheme list empty, serving reference data");
                reference_schemes()
            }
            Err(_) => reference_schemes(),
        }
    }

    /// Schemes suggested for the active session's role.
    ///
    /// `None` without a session. With one, the recommendation service
    /// answers when reachable; otherwise the catalogue is filtered by role
    /// tag locally.
    #[tracing::instrument(skip(self))]
    pub async fn suggestions(&self) -> Option<Vec<Scheme>> {
        let session: Session = self.store.get::<Option<Session>>(keys::SESSION_USER).await?;
        let role = session.role.to_lowercase();

        match self.remote.recommendations(&role).await {
            Ok(schemes) if !schemes.is_empty() => return Some(schemes),
            Ok(_) | Err(_) => {}
        }

        tracing::info!(%role, "recommendation service unavailable, matching locally");
        Some(
            self.list()
                .await
                .into_iter()
                .filter(|scheme| scheme.matches_role(&role))
                .collect(),
        )
    }
}
