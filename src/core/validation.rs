//! Validation for database and principal names
//!
//! Names arrive from session fixtures and reply documents, so they are checked
//! once at construction time and trusted afterwards.

use crate::error::{Result, StatusError};
use regex::Regex;
use std::sync::OnceLock;

/// Pattern for valid database names
///
/// # Rules
/// - None of `/ \ . " $ * < > : | ?` and no spaces
/// - Length: 1-64 bytes
const DATABASE_NAME_PATTERN: &str = r#"^[^/\\. "$*<>:|?]+$"#;

/// Maximum database name length in bytes
pub const MAX_DATABASE_NAME_LENGTH: usize = 64;

fn database_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATABASE_NAME_PATTERN).expect("database name pattern is valid"))
}

/// Validates a database name
///
/// # Examples
///
/// ```
/// use connection_status::validation::validate_database_name;
///
/// assert!(validate_database_name("admin").is_ok());
/// assert!(validate_database_name("test_db-1").is_ok());
///
/// assert!(validate_database_name("").is_err());
/// assert!(validate_database_name("a.b").is_err());
/// assert!(validate_database_name("my db").is_err());
/// ```
pub fn validate_database_name(db: &str) -> Result<()> {
    if db.is_empty() {
        return Err(StatusError::InvalidName(
            "database name cannot be empty".to_string(),
        ));
    }

    if db.len() > MAX_DATABASE_NAME_LENGTH {
        return Err(StatusError::InvalidName(format!(
            "database name too long (max {} bytes)",
            MAX_DATABASE_NAME_LENGTH
        )));
    }

    if !database_name_regex().is_match(db) {
        return Err(StatusError::InvalidName(format!(
            "database name '{}' contains a forbidden character",
            db
        )));
    }

    Ok(())
}

/// Validates the name half of a `name@db` principal
pub fn validate_principal_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StatusError::InvalidName(format!("{} name cannot be empty", kind)));
    }
    if name.contains('\0') {
        return Err(StatusError::InvalidName(format!(
            "{} name '{}' contains a NUL byte",
            kind,
            name.escape_default()
        )));
    }
    Ok(())
}
