//! Account service: signup, login, and the cached session.
//!
//! Remote-first with a local fallback. A successful remote call yields the
//! authoritative session; when the remote is unavailable the locally
//! registered user list stands in. Either way the resulting session is cached
//! under [`keys::SESSION_USER`] so it survives restarts.

use domain::validation::{require, validate_email};
use domain::{DEFAULT_ROLE, Session, User};
use local_store::{LocalStore, keys};

use crate::error::{PortalError, Result};
use crate::remote::{LoginRequest, RemoteClient, SignupRequest};

#[derive(Debug, Clone)]
pub struct AuthService {
    remote: RemoteClient,
    store: LocalStore,
}

impl AuthService {
    pub(crate) fn new(remote: RemoteClient, store: LocalStore) -> Self {
        Self { remote, store }
    }

    /// Registers an account and starts a session.
    ///
    /// An omitted or blank role defaults to the standard one. Duplicate
    /// emails are rejected whichever side answers.
    #[tracing::instrument(skip(self, password))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Session> {
        let name = require(name)?;
        let email = require(email)?;
        validate_email(email)?;
        let password = require(password)?;
        let role = role
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .unwrap_or(DEFAULT_ROLE);

        let request = SignupRequest {
            name,
            email,
            password,
            role,
        };
        if let Ok(session) = self.remote.signup(&request).await {
            self.store.put(keys::SESSION_USER, &session).await?;
            metrics::counter!("portal_signups_total", "path" => "remote").increment(1);
            return Ok(session);
        }

        tracing::info!(%email, "remote unavailable, registering locally");
        let users: Vec<User> = self.store.get(keys::USERS).await;
        if users.iter().any(|user| user.email == email) {
            return Err(PortalError::DuplicateEmail);
        }
        let user = User {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        };
        let session = user.to_session();
        self.store
            .update(keys::USERS, |users: &mut Vec<User>| users.push(user))
            .await?;
        self.store.put(keys::SESSION_USER, &session).await?;
        metrics::counter!("portal_signups_total", "path" => "fallback").increment(1);
        Ok(session)
    }

    /// Authenticates and starts a session.
    ///
    /// The fallback match is exact and case-sensitive on both email and
    /// password.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = require(email)?;
        validate_email(email)?;
        let password = require(password)?;

        let request = LoginRequest { email, password };
        if let Ok(session) = self.remote.login(&request).await {
            self.store.put(keys::SESSION_USER, &session).await?;
            metrics::counter!("portal_logins_total", "path" => "remote").increment(1);
            return Ok(session);
        }

        tracing::info!(%email, "remote unavailable, checking local users");
        let users: Vec<User> = self.store.get(keys::USERS).await;
        let session = users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .map(User::to_session)
            .ok_or(PortalError::InvalidCredentials)?;
        self.store.put(keys::SESSION_USER, &session).await?;
        metrics::counter!("portal_logins_total", "path" => "fallback").increment(1);
        Ok(session)
    }

    /// Returns the cached session, if one is active.
    pub async fn session(&self) -> Option<Session> {
        self.store.get(keys::SESSION_USER).await
    }

    /// Ends the session. Registered users and tickets stay put.
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(keys::SESSION_USER).await?;
        Ok(())
    }
}
