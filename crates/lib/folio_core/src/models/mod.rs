//! Domain models shared by the API and the operator CLI.

pub mod auth;
pub mod content;
