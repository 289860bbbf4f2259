//! Action types and action sets
//!
//! An [`ActionSet`] names the operations a privilege allows on its resource.
//! Sets are ordered by action name so reply documents are deterministic.

use crate::error::{Result, StatusError};
use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Operations that can be granted on a resource
///
/// Variants are declared in alphabetical order of their wire names, which is
/// also the iteration order of an [`ActionSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    AnyAction,
    ChangeStream,
    CollStats,
    ConnPoolStats,
    CreateCollection,
    CreateIndex,
    CreateRole,
    CreateUser,
    DbStats,
    DropCollection,
    DropDatabase,
    DropIndex,
    DropRole,
    DropUser,
    Find,
    GrantRole,
    Insert,
    KillCursors,
    ListCollections,
    ListDatabases,
    ListIndexes,
    Remove,
    RevokeRole,
    ServerStatus,
    Shutdown,
    Update,
    ViewRole,
    ViewUser,
}

impl ActionType {
    /// Every action type, in iteration order
    pub const ALL: [ActionType; 28] = [
        ActionType::AnyAction,
        ActionType::ChangeStream,
        ActionType::CollStats,
        ActionType::ConnPoolStats,
        ActionType::CreateCollection,
        ActionType::CreateIndex,
        ActionType::CreateRole,
        ActionType::CreateUser,
        ActionType::DbStats,
        ActionType::DropCollection,
        ActionType::DropDatabase,
        ActionType::DropIndex,
        ActionType::DropRole,
        ActionType::DropUser,
        ActionType::Find,
        ActionType::GrantRole,
        ActionType::Insert,
        ActionType::KillCursors,
        ActionType::ListCollections,
        ActionType::ListDatabases,
        ActionType::ListIndexes,
        ActionType::Remove,
        ActionType::RevokeRole,
        ActionType::ServerStatus,
        ActionType::Shutdown,
        ActionType::Update,
        ActionType::ViewRole,
        ActionType::ViewUser,
    ];

    /// Wire name of this action
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::AnyAction => "anyAction",
            ActionType::ChangeStream => "changeStream",
            ActionType::CollStats => "collStats",
            ActionType::ConnPoolStats => "connPoolStats",
            ActionType::CreateCollection => "createCollection",
            ActionType::CreateIndex => "createIndex",
            ActionType::CreateRole => "createRole",
            ActionType::CreateUser => "createUser",
            ActionType::DbStats => "dbStats",
            ActionType::DropCollection => "dropCollection",
            ActionType::DropDatabase => "dropDatabase",
            ActionType::DropIndex => "dropIndex",
            ActionType::DropRole => "dropRole",
            ActionType::DropUser => "dropUser",
            ActionType::Find => "find",
            ActionType::GrantRole => "grantRole",
            ActionType::Insert => "insert",
            ActionType::KillCursors => "killCursors",
            ActionType::ListCollections => "listCollections",
            ActionType::ListDatabases => "listDatabases",
            ActionType::ListIndexes => "listIndexes",
            ActionType::Remove => "remove",
            ActionType::RevokeRole => "revokeRole",
            ActionType::ServerStatus => "serverStatus",
            ActionType::Shutdown => "shutdown",
            ActionType::Update => "update",
            ActionType::ViewRole => "viewRole",
            ActionType::ViewUser => "viewUser",
        }
    }
}

impl FromStr for ActionType {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self> {
        ActionType::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| StatusError::InvalidAction(s.to_string()))
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of actions, serialized as a sorted array of action names
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet {
    actions: BTreeSet<ActionType>,
}

impl ActionSet {
    /// Create an empty action set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of action names
    ///
    /// # Examples
    ///
    /// ```
    /// use connection_status::auth::{ActionSet, ActionType};
    ///
    /// let set = ActionSet::parse(&["find", "insert", "find"]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(ActionType::Insert));
    ///
    /// assert!(ActionSet::parse(&["fly"]).is_err());
    /// ```
    pub fn parse(names: &[&str]) -> Result<Self> {
        names.iter().map(|name| name.parse::<ActionType>()).collect()
    }

    pub fn add_action(&mut self, action: ActionType) {
        self.actions.insert(action);
    }

    /// Add every action of `other` to this set
    pub fn add_actions(&mut self, other: &ActionSet) {
        self.actions.extend(other.actions.iter().copied());
    }

    /// Union of two sets, leaving both inputs untouched
    pub fn union(&self, other: &ActionSet) -> ActionSet {
        ActionSet {
            actions: self.actions.union(&other.actions).copied().collect(),
        }
    }

    pub fn contains(&self, action: ActionType) -> bool {
        self.actions.contains(&action)
    }

    /// Check if every action of `other` is in this set
    pub fn contains_all(&self, other: &ActionSet) -> bool {
        self.actions.is_superset(&other.actions)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionType> + '_ {
        self.actions.iter().copied()
    }
}

impl FromIterator<ActionType> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionType>>(iter: I) -> Self {
        ActionSet {
            actions: iter.into_iter().collect(),
        }
    }
}

impl Extend<ActionType> for ActionSet {
    fn extend<I: IntoIterator<Item = ActionType>>(&mut self, iter: I) {
        self.actions.extend(iter);
    }
}

impl IntoIterator for ActionSet {
    type Item = ActionType;
    type IntoIter = btree_set::IntoIter<ActionType>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|a| a.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
