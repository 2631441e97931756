//! Portfolio content persistence.
//!
//! Public readers only ever see published rows; admin queries see all rows.
//! Updates are built from validated [`Patch`] fields so untouched columns
//! never appear in the UPDATE statement.

pub mod about;
pub mod certifications;
pub mod messages;
pub mod projects;

use sqlx::Postgres;
use sqlx::query_builder::Separated;
use thiserror::Error;

use crate::validation::Patch;

/// Content persistence errors.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Append `column = $n` to an UPDATE's SET list for `Clear` and `Set` patches.
pub(crate) fn push_patch<'args, T>(
    set: &mut Separated<'_, 'args, Postgres, &'static str>,
    column: &str,
    patch: &Patch<T>,
) where
    T: Clone + Send + 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres>,
{
    match patch {
        Patch::Untouched => {}
        Patch::Clear => {
            set.push(format!("{column} = "));
            set.push_bind_unseparated(None::<T>);
        }
        Patch::Set(value) => {
            set.push(format!("{column} = "));
            set.push_bind_unseparated(value.clone());
        }
    }
}

/// Map a unique violation on insert/update to `DuplicateSlug`.
pub(crate) fn slug_conflict(e: sqlx::Error, slug: Option<&str>) -> ContentError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ContentError::DuplicateSlug(slug.unwrap_or_default().to_string())
        }
        _ => ContentError::DbError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::QueryBuilder;

    #[test]
    fn untouched_columns_are_left_out() {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE t SET ");
        {
            let mut set = qb.separated(", ");
            push_patch(&mut set, "a", &Patch::<String>::Untouched);
            push_patch(&mut set, "b", &Patch::<String>::Clear);
            push_patch(&mut set, "c", &Patch::Set(5_i32));
            set.push("updated_at = now()");
        }
        qb.push(" WHERE id = ").push_bind(1_i32);
        assert_eq!(
            qb.sql(),
            "UPDATE t SET b = $1, c = $2, updated_at = now() WHERE id = $3"
        );
    }
}
