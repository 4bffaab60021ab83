//! Error types for the Onoma plugin
//!
//! Every fallible operation in this crate returns [`OnomaResult`]. Errors fall
//! into three groups:
//! - configuration errors, fatal at registration time
//! - transport errors (HTTP status, network, decoding), caught at each call site
//! - validation errors, reported before any request is made

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{OnomaError, OnomaResult, UnifiedError};
