//! Authorization model for connection status reports
//!
//! Provides the value types a status report is built from:
//! - Resource patterns naming the target of a privilege
//! - Action sets with union semantics
//! - User and role names
//! - The [`GrantSource`] seam to the authorization session, with an
//!   in-memory [`AuthorizationSession`] implementation

mod action;
mod principal;
mod privilege;
mod resource;
mod session;
mod source;

pub use action::{ActionSet, ActionType};
pub use principal::{RoleName, UserName};
pub use privilege::Privilege;
pub use resource::{CollectionName, DatabaseName, ResourcePattern};
pub use session::{AuthenticatedUser, AuthorizationSession};
pub use source::GrantSource;
