//! Principal names
//!
//! Users and roles are both scoped to the database they are defined in and
//! are displayed as `name@db`.

use crate::error::{Result, StatusError};
use crate::validation::{validate_database_name, validate_principal_name};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "UserDocument")]
pub struct UserName {
    user: String,
    db: String,
}

impl UserName {
    /// Create a validated user name
    ///
    /// # Examples
    ///
    /// ```
    /// use connection_status::auth::UserName;
    ///
    /// let alice = UserName::new("alice", "admin").unwrap();
    /// assert_eq!(alice.to_string(), "alice@admin");
    ///
    /// assert!(UserName::new("", "admin").is_err());
    /// assert!(UserName::new("alice", "a.b").is_err());
    /// ```
    pub fn new(user: impl Into<String>, db: impl Into<String>) -> Result<Self> {
        let user = user.into();
        let db = db.into();
        validate_principal_name("user", &user)?;
        validate_database_name(&db)?;
        Ok(UserName { user, db })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn db(&self) -> &str {
        &self.db
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.db)
    }
}

impl FromStr for UserName {
    type Err = StatusError;

    /// Parse `user@db`, splitting on the last `@`
    fn from_str(s: &str) -> Result<Self> {
        let (user, db) = split_qualified(s)?;
        UserName::new(user, db)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UserDocument {
    user: String,
    db: String,
}

impl TryFrom<UserDocument> for UserName {
    type Error = StatusError;

    fn try_from(doc: UserDocument) -> Result<Self> {
        UserName::new(doc.user, doc.db)
    }
}

/// Name of a role held by an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RoleDocument")]
pub struct RoleName {
    role: String,
    db: String,
}

impl RoleName {
    pub fn new(role: impl Into<String>, db: impl Into<String>) -> Result<Self> {
        let role = role.into();
        let db = db.into();
        validate_principal_name("role", &role)?;
        validate_database_name(&db)?;
        Ok(RoleName { role, db })
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn db(&self) -> &str {
        &self.db
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.role, self.db)
    }
}

impl FromStr for RoleName {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self> {
        let (role, db) = split_qualified(s)?;
        RoleName::new(role, db)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RoleDocument {
    role: String,
    db: String,
}

impl TryFrom<RoleDocument> for RoleName {
    type Error = StatusError;

    fn try_from(doc: RoleDocument) -> Result<Self> {
        RoleName::new(doc.role, doc.db)
    }
}

fn split_qualified(s: &str) -> Result<(&str, &str)> {
    s.rsplit_once('@')
        .ok_or_else(|| StatusError::InvalidName(format!("'{}' is not of the form name@db", s)))
}
