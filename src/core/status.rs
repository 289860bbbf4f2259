//! Connection status report
//!
//! Builds the reply to a connection status request: the authenticated users
//! and their roles, passed through as the session reports them, and, only
//! when explicitly requested, the consolidated privileges of those users.

use crate::auth::{GrantSource, RoleName, UserName};
use crate::consolidate::{ConsolidatedPrivileges, PrivilegeConsolidator};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Connection status request
///
/// Privileges are only expanded when `showPrivileges` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatusRequest {
    #[serde(default)]
    pub show_privileges: bool,
}

impl ConnectionStatusRequest {
    pub fn new(show_privileges: bool) -> Self {
        ConnectionStatusRequest { show_privileges }
    }

    /// Parse a request document, e.g. `{"showPrivileges": true}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Authentication section of the reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    pub authenticated_users: Vec<UserName>,
    pub authenticated_user_roles: Vec<RoleName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated_user_privileges: Option<ConsolidatedPrivileges>,
}

/// Connection status reply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatusReply {
    pub auth_info: AuthInfo,
    pub ok: f64,
}

impl ConnectionStatusReply {
    /// Serialize the reply to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Build the connection status reply for the session behind `source`
///
/// # Errors
///
/// Consolidation failures propagate unchanged; there is no degraded reply.
pub fn connection_status<S: GrantSource + ?Sized>(
    source: &S,
    request: &ConnectionStatusRequest,
) -> Result<ConnectionStatusReply> {
    let authenticated_users = source.authenticated_principals();
    let authenticated_user_roles = source.authenticated_roles();

    let authenticated_user_privileges = if request.show_privileges {
        Some(PrivilegeConsolidator::consolidate_principals(
            source,
            &authenticated_users,
        )?)
    } else {
        None
    };

    debug!(
        "Connection status: {} user(s), {} role(s), privileges {}",
        authenticated_users.len(),
        authenticated_user_roles.len(),
        if request.show_privileges { "shown" } else { "omitted" }
    );

    Ok(ConnectionStatusReply {
        auth_info: AuthInfo {
            authenticated_users,
            authenticated_user_roles,
            authenticated_user_privileges,
        },
        ok: 1.0,
    })
}
