//! HTTP route constants.

pub mod proxy;
