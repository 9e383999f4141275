//! Transport contract constants.
//!
//! String constants for the server routes this client talks to. Keep these
//! string-only with no framework-specific types.

pub mod http;
