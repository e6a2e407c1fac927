//! Typed HTTP client for the remote service.
//!
//! Every call collapses failure into [`Unavailable`]: transport errors,
//! non-success statuses, and malformed bodies are logged and counted, then
//! handed to the caller as the single signal "use the fallback". The cause is
//! never surfaced past this module.

use std::time::Duration;

use domain::{Scheme, Session, Ticket};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// The remote service could not produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unavailable;

/// Outcome of a remote call: the payload, or the fallback signal.
pub type RemoteResult<T> = Result<T, Unavailable>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the account/grievance/scheme API and the recommendation
/// service, which live behind separate base URLs.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    api_base: String,
    recommendations_base: String,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GrievanceRequest<'a> {
    pub subject: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub description: &'a str,
    pub owner: &'a str,
}

impl RemoteClient {
    /// Creates a client with a per-request timeout against the two bases.
    ///
    /// Trailing slashes on the bases are tolerated.
    pub fn new(api_base: impl Into<String>, recommendations_base: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "HTTP client build failed, using default client");
                reqwest::Client::new()
            });
        Self {
            http,
            api_base: trim_base(api_base.into()),
            recommendations_base: trim_base(recommendations_base.into()),
        }
    }

    pub async fn signup(&self, request: &SignupRequest<'_>) -> RemoteResult<Session> {
        let url = format!("{}/api/auth/signup", self.api_base);
        self.send("signup", self.http.post(url).json(request)).await
    }

    pub async fn login(&self, request: &LoginRequest<'_>) -> RemoteResult<Session> {
        let url = format!("{}/api/auth/login", self.api_base);
        self.send("login", self.http.post(url).json(request)).await
    }

    pub async fn create_grievance(&self, request: &GrievanceRequest<'_>) -> RemoteResult<Ticket> {
        let url = format!("{}/api/grievances", self.api_base);
        self.send("create_grievance", self.http.post(url).json(request))
            .await
    }

    /// Lists tickets, filtered server-side by owner when given.
    pub async fn grievances(&self, owner: Option<&str>) -> RemoteResult<Vec<Ticket>> {
        let url = format!("{}/api/grievances", self.api_base);
        let mut request = self.http.get(url);
        if let Some(owner) = owner {
            request = request.query(&[("email", owner)]);
        }
        self.send("grievances", request).await
    }

    pub async fn schemes(&self) -> RemoteResult<Vec<Scheme>> {
        let url = format!("{}/api/schemes", self.api_base);
        self.send("schemes", self.http.get(url)).await
    }

    /// Fetches schemes recommended for `role` from the recommendation service.
    pub async fn recommendations(&self, role: &str) -> RemoteResult<Vec<Scheme>> {
        let url = format!("{}/api/recommendations", self.recommendations_base);
        self.send("recommendations", self.http.get(url).query(&[("role", role)]))
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> RemoteResult<T> {
        let response = request.send().await.map_err(|error| {
            tracing::warn!(endpoint, %error, "remote request failed");
            mark_unavailable(endpoint)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, %status, "remote returned error status");
            return Err(mark_unavailable(endpoint));
        }

        response.json().await.map_err(|error| {
            tracing::warn!(endpoint, %error, "remote response malformed");
            mark_unavailable(endpoint)
        })
    }
}

fn mark_unavailable(endpoint: &'static str) -> Unavailable {
    metrics::counter!("remote_unavailable_total", "endpoint" => endpoint).increment(1);
    Unavailable
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bases_lose_trailing_slashes() {
        let client = RemoteClient::new("http://localhost:4000/", "http://localhost:5001///");
        assert_eq!(client.api_base, "http://localhost:4000");
        assert_eq!(client.recommendations_base, "http://localhost:5001");
    }

    #[tokio::test]
    async fn unreachable_host_is_unavailable() {
        // Reserved TEST-NET address, nothing listens there.
        let client = RemoteClient::new("http://192.0.2.1:9", "http://192.0.2.1:9");
        let result = client.schemes().await;
        assert_eq!(result, Err(Unavailable));
    }
}
