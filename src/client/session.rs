//! Session tracking and account actions.

use super::coordinator::MutationCoordinator;
use super::error::ClientResult;
use crate::auth::{
    domain::{Credentials, Session},
    ports::AuthProvider,
};
use crate::calendar::ports::EventStore;
use crate::task::ports::TaskStore;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Keeps the client state in step with the authentication provider.
pub struct SessionSync<A, T, E, C>
where
    A: AuthProvider,
    T: TaskStore + 'static,
    E: EventStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    auth: Arc<A>,
    coordinator: MutationCoordinator<T, E, C>,
}

impl<A, T, E, C> SessionSync<A, T, E, C>
where
    A: AuthProvider,
    T: TaskStore + 'static,
    E: EventStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a synchroniser driving `coordinator`.
    #[must_use]
    pub const fn new(auth: Arc<A>, coordinator: MutationCoordinator<T, E, C>) -> Self {
        Self { auth, coordinator }
    }

    /// Returns the coordinator whose state this synchroniser maintains.
    #[must_use]
    pub const fn coordinator(&self) -> &MutationCoordinator<T, E, C> {
        &self.coordinator
    }

    /// Follows session changes until the provider goes away.
    ///
    /// The session current at subscription time is handled first. Load
    /// failures are shown in the error banner and do not stop the loop.
    pub async fn run(&self) {
        let mut sessions = self.auth.subscribe();
        loop {
            let current = sessions.borrow_and_update().clone();
            if let Err(err) = self.apply_session(current).await {
                debug!(error = %err, "load after session change failed");
            }
            if sessions.changed().await.is_err() {
                debug!("session stream closed");
                return;
            }
        }
    }

    /// Applies one session notification: a session starts and loads, no
    /// session clears.
    ///
    /// # Errors
    ///
    /// Returns the load failure, already shown in the error banner.
    pub async fn apply_session(&self, session: Option<Session>) -> ClientResult<()> {
        match session {
            Some(session) => {
                self.coordinator.start_session(session);
                self.coordinator.load().await
            }
            None => {
                self.coordinator.clear();
                Ok(())
            }
        }
    }

    /// Signs in and loads the user's data.
    ///
    /// # Errors
    ///
    /// Returns [`super::ClientError::Auth`] when the provider rejects the
    /// credentials and [`super::ClientError::Fetch`] when the first load
    /// fails.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn sign_in(&self, credentials: &Credentials) -> ClientResult<Session> {
        let session = self
            .auth
            .sign_in(credentials)
            .await
            .map_err(|err| self.coordinator.report_error(err))?;
        self.apply_session(Some(session.clone())).await?;
        Ok(session)
    }

    /// Registers a new account without signing in.
    ///
    /// # Errors
    ///
    /// Returns [`super::ClientError::Auth`] when registration fails.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn sign_up(&self, credentials: &Credentials) -> ClientResult<()> {
        self.auth
            .sign_up(credentials)
            .await
            .map_err(|err| self.coordinator.report_error(err))?;
        debug!("account registered");
        Ok(())
    }

    /// Signs out and clears the client state once the provider confirms.
    ///
    /// # Errors
    ///
    /// Returns [`super::ClientError::Auth`] when the provider fails; the
    /// state is kept in that case.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> ClientResult<()> {
        self.auth
            .sign_out()
            .await
            .map_err(|err| self.coordinator.report_error(err))?;
        self.coordinator.clear();
        Ok(())
    }
}
