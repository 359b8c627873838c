//! Caller authorization.
//!
//! The engine never decides who the administrator is; it asks an [`Authorizer`].
//! Voter checks default to the engine's own roll but can be overridden, e.g. to
//! consult an external membership service.

use crate::identity::Identity;
use crate::voter::Voter;

/// Answers role questions about the calling identity.
pub trait Authorizer {
    /// Whether `caller` is the election administrator.
    fn is_administrator(&self, caller: &Identity) -> bool;

    /// Whether `caller` is a registered voter. `record` is the engine's entry for
    /// `caller`, if any.
    fn is_registered_voter(&self, _caller: &Identity, record: Option<&Voter>) -> bool {
        record.is_some_and(|v| v.is_registered)
    }
}

impl<A: Authorizer + ?Sized> Authorizer for &A {
    fn is_administrator(&self, caller: &Identity) -> bool {
        (**self).is_administrator(caller)
    }

    fn is_registered_voter(&self, caller: &Identity, record: Option<&Voter>) -> bool {
        (**self).is_registered_voter(caller, record)
    }
}

/// Single fixed administrator; voters come from the engine's roll.
#[derive(Clone, Debug)]
pub struct AdminAuthorizer {
    administrator: Identity,
}

impl AdminAuthorizer {
    pub fn new(administrator: Identity) -> Self {
        Self { administrator }
    }
}

impl Authorizer for AdminAuthorizer {
    fn is_administrator(&self, caller: &Identity) -> bool {
        *caller == self.administrator
    }
}
