//! In-memory authorization session
//!
//! [`AuthorizationSession`] holds the users authenticated on one connection,
//! each with its roles and already-expanded privileges. It is immutable while
//! shared, so concurrent status requests can read it through an `Arc` without
//! locking.
//!
//! Sessions can be loaded from a TOML fixture:
//!
//! ```toml
//! [[users]]
//! user = "alice"
//! db = "admin"
//! roles = [{ role = "readWrite", db = "test" }]
//!
//! [[users.privileges]]
//! resource = { db = "test", collection = "" }
//! actions = ["find", "insert"]
//! ```

use super::{GrantSource, Privilege, RoleName, UserName};
use crate::error::{Result, StatusError};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// A user authenticated on a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    name: UserName,
    roles: Vec<RoleName>,
    privileges: Vec<Privilege>,
}

impl AuthenticatedUser {
    pub fn new(name: UserName) -> Self {
        AuthenticatedUser {
            name,
            roles: Vec::new(),
            privileges: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: RoleName) -> Self {
        self.roles.push(role);
        self
    }

    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.privileges.push(privilege);
        self
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn roles(&self) -> &[RoleName] {
        &self.roles
    }

    pub fn privileges(&self) -> &[Privilege] {
        &self.privileges
    }
}

/// Users authenticated on one connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationSession {
    users: Vec<AuthenticatedUser>,
}

impl AuthorizationSession {
    /// Create a session with nobody authenticated
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`authenticate`](Self::authenticate)
    pub fn with_user(mut self, user: AuthenticatedUser) -> Self {
        self.authenticate(user);
        self
    }

    /// Add a user to the session
    ///
    /// Re-authenticating an already present user replaces its roles and
    /// privileges but keeps its position.
    pub fn authenticate(&mut self, user: AuthenticatedUser) {
        match self.users.iter_mut().find(|u| u.name == user.name) {
            Some(existing) => {
                debug!("Re-authenticating {}", user.name);
                *existing = user;
            }
            None => {
                debug!("Authenticating {}", user.name);
                self.users.push(user);
            }
        }
    }

    pub fn users(&self) -> &[AuthenticatedUser] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Parse a session fixture
    ///
    /// # Examples
    ///
    /// ```
    /// use connection_status::auth::{AuthorizationSession, GrantSource};
    ///
    /// let session = AuthorizationSession::from_toml_str(r#"
    ///     [[users]]
    ///     user = "alice"
    ///     db = "admin"
    ///
    ///     [[users.privileges]]
    ///     resource = { cluster = true }
    ///     actions = ["serverStatus"]
    /// "#).unwrap();
    ///
    /// assert_eq!(session.authenticated_principals().len(), 1);
    /// ```
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let fixture: SessionFixture = toml::from_str(toml)?;
        let mut session = AuthorizationSession::new();
        for doc in fixture.users {
            let name = UserName::new(doc.user, doc.db)?;
            session.authenticate(AuthenticatedUser {
                name,
                roles: doc.roles,
                privileges: doc.privileges,
            });
        }
        Ok(session)
    }

    /// Load a session fixture from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading session fixture from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let session = Self::from_toml_str(&contents)?;
        info!("Loaded {} authenticated user(s)", session.users.len());
        Ok(session)
    }
}

impl GrantSource for AuthorizationSession {
    fn authenticated_principals(&self) -> Vec<UserName> {
        self.users.iter().map(|u| u.name.clone()).collect()
    }

    fn authenticated_roles(&self) -> Vec<RoleName> {
        self.users
            .iter()
            .flat_map(|u| u.roles.iter().cloned())
            .collect()
    }

    fn grants_for(&self, user: &UserName) -> Result<Vec<Privilege>> {
        self.users
            .iter()
            .find(|u| &u.name == user)
            .map(|u| u.privileges.clone())
            .ok_or_else(|| StatusError::InconsistentSessionState { user: user.clone() })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionFixture {
    #[serde(default)]
    users: Vec<UserFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserFixture {
    user: String,
    db: String,
    #[serde(default)]
    roles: Vec<RoleName>,
    #[serde(default)]
    privileges: Vec<Privilege>,
}
