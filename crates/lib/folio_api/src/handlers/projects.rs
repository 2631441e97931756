//! Public project reads. Only published projects are visible.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use folio_core::content::projects;
use folio_core::models::content::Project;

use super::{ApiResult, ok};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub featured: Option<String>,
}

impl ListProjectsQuery {
    fn featured_only(&self) -> bool {
        matches!(self.featured.as_deref(), Some("true" | "1"))
    }
}

/// `GET /projects[?featured=true]`
pub async fn list_projects_handler(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Vec<Project>> {
    ok(projects::list_published(&state.pool, query.featured_only()).await?)
}

/// `GET /projects/{slug}`
pub async fn get_project_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Project> {
    ok(projects::find_published_by_slug(&state.pool, &slug).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_flag_parsing() {
        let q = |v: Option<&str>| ListProjectsQuery {
            featured: v.map(str::to_string),
        };
        assert!(q(Some("true")).featured_only());
        assert!(q(Some("1")).featured_only());
        assert!(!q(Some("false")).featured_only());
        assert!(!q(Some("yes")).featured_only());
        assert!(!q(None).featured_only());
    }
}
