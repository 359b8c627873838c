//! Nullable authorizer — controllable role answers for testing.

use ballot_types::{Authorizer, Identity, Voter};
use std::collections::HashSet;
use std::sync::Mutex;

/// A test authorizer with a fixed administrator.
///
/// Voter checks follow the engine's roll, adjusted by two controllable sets:
/// identities vouched for externally (treated as registered even without a
/// record) and revoked identities (denied even with a record).
pub struct NullAuthorizer {
    administrator: Option<Identity>,
    external_voters: Mutex<HashSet<Identity>>,
    revoked: Mutex<HashSet<Identity>>,
}

impl NullAuthorizer {
    pub fn new(administrator: Identity) -> Self {
        Self {
            administrator: Some(administrator),
            external_voters: Mutex::new(HashSet::new()),
            revoked: Mutex::new(HashSet::new()),
        }
    }

    /// An authorizer for which nobody is the administrator.
    pub fn without_administrator() -> Self {
        Self {
            administrator: None,
            external_voters: Mutex::new(HashSet::new()),
            revoked: Mutex::new(HashSet::new()),
        }
    }

    /// Treat `voters` as registered regardless of the engine's roll.
    pub fn with_external_voters(self, voters: impl IntoIterator<Item = Identity>) -> Self {
        self.external_voters.lock().unwrap().extend(voters);
        self
    }

    /// Deny voter access to `identity` from now on.
    pub fn revoke(&self, identity: &Identity) {
        self.revoked.lock().unwrap().insert(identity.clone());
    }

    /// Undo a previous [`revoke`](Self::revoke).
    pub fn reinstate(&self, identity: &Identity) {
        self.revoked.lock().unwrap().remove(identity);
    }
}

impl Authorizer for NullAuthorizer {
    fn is_administrator(&self, caller: &Identity) -> bool {
        self.administrator.as_ref() == Some(caller)
    }

    fn is_registered_voter(&self, caller: &Identity, record: Option<&Voter>) -> bool {
        if self.revoked.lock().unwrap().contains(caller) {
            return false;
        }
        record.is_some_and(|v| v.is_registered)
            || self.external_voters.lock().unwrap().contains(caller)
    }
}
