//! # Connection Status - Authenticated Principals and Their Privileges
//!
//! `connection-status` answers "who is authenticated on this connection, and
//! what may they do?". The authorization session itself is an external
//! collaborator behind the [`GrantSource`](auth::GrantSource) trait; this crate
//! turns what it reports into a reply document.
//!
//! - **Pass-through** of authenticated users and their roles
//! - **Privilege consolidation**: one entry per resource, action sets unioned
//! - **Opt-in** privilege expansion via `showPrivileges`
//! - **TOML fixtures** for in-memory sessions and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use connection_status::auth::{
//!     ActionSet, AuthenticatedUser, AuthorizationSession, Privilege, ResourcePattern, UserName,
//! };
//! use connection_status::{connection_status, ConnectionStatusRequest, Result};
//!
//! # fn main() -> Result<()> {
//! let session = AuthorizationSession::new().with_user(
//!     AuthenticatedUser::new(UserName::new("alice", "admin")?).with_privilege(Privilege::new(
//!         ResourcePattern::database("test")?,
//!         ActionSet::parse(&["find", "insert"])?,
//!     )),
//! );
//!
//! let reply = connection_status(&session, &ConnectionStatusRequest::new(true))?;
//! println!("{}", reply.to_json(true)?);
//! # Ok(())
//! # }
//! ```

pub mod core;

// Re-export core modules so crate:: paths in core resolve
pub use self::core::{auth, config, consolidate, error, status, validation};

pub use crate::core::{
    config::StatusConfig,
    consolidate::{ConsolidatedPrivileges, PrivilegeConsolidator},
    error::{Result, StatusError},
    status::{connection_status, AuthInfo, ConnectionStatusReply, ConnectionStatusRequest},
};
