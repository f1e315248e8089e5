//! Identity provider seam

use crate::core::identity::Identity;
use parking_lot::RwLock;

/// Source of the identity acting in the current context
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Current identity, `None` when nobody is signed in
    fn current_identity(&self) -> Option<Identity>;
}

/// Provider holding a single replaceable identity
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    identity: RwLock<Option<Identity>>,
}

impl StaticIdentityProvider {
    /// Provider with nobody signed in
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
        }
    }

    /// Replace the current identity
    pub fn set(&self, identity: Identity) {
        *self.identity.write() = Some(identity);
    }

    pub fn clear(&self) {
        *self.identity.write() = None;
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.read().clone()
    }
}
