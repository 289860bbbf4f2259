//! Core implementation
//!
//! - [`auth`] - authorization model and the grant source seam
//! - [`consolidate`] - per-resource privilege consolidation
//! - [`status`] - connection status reply
//! - [`config`] - report and logging configuration
//! - [`validation`] - name validation
//! - [`error`] - error types

pub mod auth;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod status;
pub mod validation;
