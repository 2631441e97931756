//! # folio_core
//!
//! Core domain logic for Folio: accounts and session tokens, content models,
//! request schemas, and PostgreSQL persistence.

pub mod auth;
pub mod content;
pub mod migrate;
pub mod models;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
