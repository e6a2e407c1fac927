//! Grievance service: submit tickets and keep the local list fresh.
//!
//! The local store is the read model; the remote is the write target when
//! reachable. Background refreshes carry a generation stamp so a fetch that
//! raced with a local submission is discarded instead of clobbering it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use domain::validation::require;
use domain::{GUEST_OWNER, Session, Ticket};
use local_store::{LocalStore, keys};

use crate::error::Result;
use crate::remote::{GrievanceRequest, RemoteClient};

#[derive(Debug, Clone)]
pub struct GrievanceService {
    remote: RemoteClient,
    store: LocalStore,
    /// Bumped on every local mutation; refreshes that started before the bump
    /// are stale.
    generation: Arc<AtomicU64>,
}

impl GrievanceService {
    pub(crate) fn new(remote: RemoteClient, store: LocalStore) -> Self {
        Self {
            remote,
            store,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submits a ticket, owned by the active session or filed as a guest.
    ///
    /// The created ticket is prepended to the local list either way, so the
    /// listing reflects it immediately.
    #[tracing::instrument(skip(self, description))]
    pub async fn submit(
        &self,
        subject: &str,
        category: &str,
        priority: &str,
        description: &str,
    ) -> Result<Ticket> {
        let subject = require(subject)?;
        let category = require(category)?;
        let priority = require(priority)?;
        let description = require(description)?;

        let owner = match self.session().await {
            Some(session) => session.email,
            None => GUEST_OWNER.to_string(),
        };

        let request = GrievanceRequest {
            subject,
            category,
            priority,
            description,
            owner: &owner,
        };
        let ticket = match self.remote.create_grievance(&request).await {
            Ok(ticket) => ticket,
            Err(_) => {
                tracing::info!(%owner, "remote unavailable, filing ticket locally");
                Ticket::open(subject, category, priority, description, owner, Utc::now())
            }
        };

        self.store
            .update(keys::TICKETS, |tickets: &mut Vec<Ticket>| {
                tickets.insert(0, ticket.clone());
            })
            .await?;
        self.generation.fetch_add(1, Ordering::SeqCst);
        metrics::counter!("portal_tickets_submitted_total").increment(1);
        Ok(ticket)
    }

    /// Lists the active session's tickets, newest first.
    ///
    /// Without a session the listing is empty; guest tickets are not shown.
    pub async fn list(&self) -> Vec<Ticket> {
        let Some(session) = self.session().await else {
            return Vec::new();
        };
        let tickets: Vec<Ticket> = self.store.get(keys::TICKETS).await;
        tickets
            .into_iter()
            .filter(|ticket| ticket.owner == session.email)
            .collect()
    }

    /// Pulls the session's tickets from the remote into the local list.
    ///
    /// Returns the fresh owner-scoped list, or `None` when there is no
    /// session, the remote is unavailable, or a local submission landed while
    /// the fetch was in flight (the fetched list is then stale and dropped).
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Option<Vec<Ticket>>> {
        let Some(session) = self.session().await else {
            return Ok(None);
        };
        let owner = session.email;

        let started_at = self.generation.load(Ordering::SeqCst);
        let Ok(fetched) = self.remote.grievances(Some(&owner)).await else {
            return Ok(None);
        };
        if self.generation.load(Ordering::SeqCst) != started_at {
            tracing::debug!(%owner, "discarding stale refresh");
            return Ok(None);
        }

        // Replace this owner's entries; tickets filed by other accounts on
        // this device stay cached.
        self.store
            .update(keys::TICKETS, |tickets: &mut Vec<Ticket>| {
                tickets.retain(|ticket| ticket.owner != owner);
                for ticket in fetched.iter().rev() {
                    tickets.insert(0, ticket.clone());
                }
            })
            .await?;
        Ok(Some(fetched))
    }

    async fn session(&self) -> Option<Session> {
        self.store.get(keys::SESSION_USER).await
    }
}
