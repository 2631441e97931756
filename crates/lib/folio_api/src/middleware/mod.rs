//! Request middleware: the authorization gate and the cross-origin filter.

pub mod auth;
pub mod cors;
