//! Grant source: the authorization session seen from the status report
//!
//! The report never authenticates anyone or expands roles itself. It asks a
//! [`GrantSource`] who is authenticated and what each of them was granted.

use super::{Privilege, RoleName, UserName};
use crate::error::Result;

/// Read-only view of an authorization session
///
/// Implementations must be `Send + Sync`: one session snapshot may serve
/// several concurrent status requests.
pub trait GrantSource: Send + Sync {
    /// Users currently authenticated on the session, in session order
    fn authenticated_principals(&self) -> Vec<UserName>;

    /// Roles held by the authenticated users, reported as-is
    fn authenticated_roles(&self) -> Vec<RoleName>;

    /// Already-expanded privileges of `user`, in grant order
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::InconsistentSessionState`](crate::StatusError::InconsistentSessionState)
    /// if `user` is not authenticated on this session.
    fn grants_for(&self, user: &UserName) -> Result<Vec<Privilege>>;
}

impl<T: GrantSource + ?Sized> GrantSource for &T {
    fn authenticated_principals(&self) -> Vec<UserName> {
        (**self).authenticated_principals()
    }

    fn authenticated_roles(&self) -> Vec<RoleName> {
        (**self).authenticated_roles()
    }

    fn grants_for(&self, user: &UserName) -> Result<Vec<Privilege>> {
        (**self).grants_for(user)
    }
}

impl<T: GrantSource + ?Sized> GrantSource for std::sync::Arc<T> {
    fn authenticated_principals(&self) -> Vec<UserName> {
        (**self).authenticated_principals()
    }

    fn authenticated_roles(&self) -> Vec<RoleName> {
        (**self).authenticated_roles()
    }

    fn grants_for(&self, user: &UserName) -> Result<Vec<Privilege>> {
        (**self).grants_for(user)
    }
}
