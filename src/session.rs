//! Identity-provider boundary
//!
//! Authentication is an external collaborator: this module only defines the
//! session shape and the trait a host wires its provider through. No
//! authorization logic lives client-side; mutating backend calls are
//! capability-checked server-side and surface [`crate::AtlasError::Permission`]
//! when they fail.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Capability level attached to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Member,
    Admin,
}

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

impl Session {
    /// Whether this session carries administrative capability
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// The opaque identity provider the host application supplies.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently authenticated session, if any
    async fn current_session(&self) -> Option<Session>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Register a new account
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Session>;

    /// End the current session
    async fn sign_out(&self) -> Result<()>;

    /// Subscribe to session changes (sign-in, sign-out, expiry)
    fn watch_session(&self) -> watch::Receiver<Option<Session>>;
}

/// Session channel helper for provider implementations.
///
/// Wraps the watch channel so providers only publish and consumers only
/// subscribe.
pub struct SessionChannel {
    sender: watch::Sender<Option<Session>>,
}

impl SessionChannel {
    pub fn new(initial: Option<Session>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Publish a new session state to every subscriber.
    pub fn publish(&self, session: Option<Session>) {
        // send_replace never fails even with no subscribers
        self.sender.send_replace(session);
    }

    /// Current session state
    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sender.subscribe()
    }
}

impl Default for SessionChannel {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Session {
        Session {
            user_id: "u1".into(),
            email: "u1@example.org".into(),
            role: UserRole::Member,
        }
    }

    #[test]
    fn role_gates_admin_capability() {
        assert!(!member().is_admin());
        let admin = Session { role: UserRole::Admin, ..member() };
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn channel_notifies_subscribers() {
        let channel = SessionChannel::default();
        let mut receiver = channel.subscribe();
        assert!(receiver.borrow().is_none());

        channel.publish(Some(member()));
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().as_ref().map(|s| s.user_id.clone()), Some("u1".into()));

        channel.publish(None);
        receiver.changed().await.unwrap();
        assert!(receiver.borrow().is_none());
    }
}
