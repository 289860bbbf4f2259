//! Privilege consolidation
//!
//! Merges the privileges of every authenticated user into one entry per
//! distinct resource. Action sets of repeated resources are unioned, so no
//! granted action is lost and none is invented. Entries keep the order in
//! which their resource was first seen.

use crate::auth::{ActionSet, GrantSource, Privilege, ResourcePattern, UserName};
use crate::error::Result;
use ahash::AHashMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Privileges with each resource appearing at most once
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedPrivileges {
    entries: Vec<Privilege>,
    index: AHashMap<ResourcePattern, usize>,
}

impl ConsolidatedPrivileges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one privilege in
    ///
    /// A new resource is appended; a known resource gets `privilege`'s
    /// actions added to its existing set.
    pub fn insert(&mut self, privilege: Privilege) {
        let (resource, actions) = privilege.into_parts();
        match self.index.get(&resource) {
            Some(&pos) => {
                let existing = &self.entries[pos];
                if !existing.actions().contains_all(&actions) {
                    let merged = existing.actions().union(&actions);
                    self.entries[pos] = Privilege::new(resource, merged);
                }
            }
            None => {
                self.index.insert(resource.clone(), self.entries.len());
                self.entries.push(Privilege::new(resource, actions));
            }
        }
    }

    /// Actions granted on `resource`, if any privilege names it
    pub fn get(&self, resource: &ResourcePattern) -> Option<&ActionSet> {
        self.index
            .get(resource)
            .map(|&pos| self.entries[pos].actions())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Privilege> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Privilege] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Privilege> {
        self.entries
    }
}

impl PartialEq for ConsolidatedPrivileges {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ConsolidatedPrivileges {}

impl Extend<Privilege> for ConsolidatedPrivileges {
    fn extend<I: IntoIterator<Item = Privilege>>(&mut self, iter: I) {
        for privilege in iter {
            self.insert(privilege);
        }
    }
}

impl FromIterator<Privilege> for ConsolidatedPrivileges {
    fn from_iter<I: IntoIterator<Item = Privilege>>(iter: I) -> Self {
        let mut consolidated = ConsolidatedPrivileges::new();
        consolidated.extend(iter);
        consolidated
    }
}

impl IntoIterator for ConsolidatedPrivileges {
    type Item = Privilege;
    type IntoIter = std::vec::IntoIter<Privilege>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConsolidatedPrivileges {
    type Item = &'a Privilege;
    type IntoIter = std::slice::Iter<'a, Privilege>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ConsolidatedPrivileges {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

/// Builds the consolidated privilege view of a session
pub struct PrivilegeConsolidator;

impl PrivilegeConsolidator {
    /// Consolidate the privileges of every user authenticated on `source`
    ///
    /// # Errors
    ///
    /// Fails with `InconsistentSessionState` if an authenticated user's grants
    /// cannot be retrieved. No partial result is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use connection_status::auth::{
    ///     ActionSet, AuthenticatedUser, AuthorizationSession, Privilege, ResourcePattern, UserName,
    /// };
    /// use connection_status::PrivilegeConsolidator;
    ///
    /// let orders = ResourcePattern::namespace("shop", "orders").unwrap();
    /// let session = AuthorizationSession::new()
    ///     .with_user(
    ///         AuthenticatedUser::new(UserName::new("alice", "admin").unwrap())
    ///             .with_privilege(Privilege::new(orders.clone(), ActionSet::parse(&["find"]).unwrap())),
    ///     )
    ///     .with_user(
    ///         AuthenticatedUser::new(UserName::new("bob", "admin").unwrap())
    ///             .with_privilege(Privilege::new(orders.clone(), ActionSet::parse(&["insert"]).unwrap())),
    ///     );
    ///
    /// let consolidated = PrivilegeConsolidator::consolidate(&session).unwrap();
    /// assert_eq!(consolidated.len(), 1);
    /// assert_eq!(consolidated.get(&orders).unwrap().len(), 2);
    /// ```
    pub fn consolidate<S: GrantSource + ?Sized>(source: &S) -> Result<ConsolidatedPrivileges> {
        let principals = source.authenticated_principals();
        Self::consolidate_principals(source, &principals)
    }

    /// Consolidate the privileges of `principals`, in the given order
    pub fn consolidate_principals<S: GrantSource + ?Sized>(
        source: &S,
        principals: &[UserName],
    ) -> Result<ConsolidatedPrivileges> {
        let mut consolidated = ConsolidatedPrivileges::new();
        let mut grant_count = 0usize;

        for principal in principals {
            let grants = source.grants_for(principal)?;
            grant_count += grants.len();
            consolidated.extend(grants);
        }

        debug!(
            "Consolidated {} grant(s) from {} principal(s) into {} resource(s)",
            grant_count,
            principals.len(),
            consolidated.len()
        );

        Ok(consolidated)
    }

    /// Merge an already collected sequence of privileges
    pub fn merge<I: IntoIterator<Item = Privilege>>(privileges: I) -> ConsolidatedPrivileges {
        privileges.into_iter().collect()
    }
}
