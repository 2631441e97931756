use thiserror::Error;
use validator::ValidationErrors;

use folio_core::auth::AuthError;
use folio_core::validation::field_issues;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("invalid input: {}", .0)]
    Invalid(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("{}", .0)]
    Auth(#[from] AuthError),

    #[error("database: {}", .0)]
    Db(#[from] sqlx::Error),

    #[error("migration: {}", .0)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl From<ValidationErrors> for Error {
    fn from(e: ValidationErrors) -> Self {
        let issues: Vec<String> = field_issues(&e)
            .into_iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        Error::Invalid(issues.join("; "))
    }
}
