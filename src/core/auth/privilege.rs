//! Privilege: a resource together with the actions allowed on it

use super::{ActionSet, ActionType, ResourcePattern};
use serde::{Deserialize, Serialize};
use std::fmt;

/// "This resource may be acted on in these ways"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Privilege {
    resource: ResourcePattern,
    actions: ActionSet,
}

impl Privilege {
    pub fn new(resource: ResourcePattern, actions: ActionSet) -> Self {
        Privilege { resource, actions }
    }

    /// Privilege granting a single action
    pub fn single(resource: ResourcePattern, action: ActionType) -> Self {
        Privilege {
            resource,
            actions: std::iter::once(action).collect(),
        }
    }

    pub fn resource(&self) -> &ResourcePattern {
        &self.resource
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Split into resource and actions
    pub fn into_parts(self) -> (ResourcePattern, ActionSet) {
        (self.resource, self.actions)
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.resource, self.actions)
    }
}
