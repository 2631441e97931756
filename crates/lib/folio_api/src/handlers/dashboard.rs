//! `GET /dashboard`: a minimal server-rendered overview.

use axum::extract::State;
use axum::response::Html;

use folio_core::content::{certifications, messages, projects};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub async fn dashboard_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Html<String>> {
    let project_count = projects::count(&state.pool).await?;
    let certification_count = certifications::count(&state.pool).await?;
    let unread = messages::unread_count(&state.pool).await?;
    Ok(Html(render(
        &user.0.email,
        project_count,
        certification_count,
        unread,
    )))
}

fn render(email: &str, projects: i64, certifications: i64, unread: i64) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Folio dashboard</title></head>\n<body>\n\
         <h1>Folio dashboard</h1>\n<p>Signed in as {}</p>\n<ul>\n\
         <li>Projects: {projects}</li>\n<li>Certifications: {certifications}</li>\n<li>Unread messages: {unread}</li>\n\
         </ul>\n</body>\n</html>\n",
        escape_html(email)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_escapes_the_email() {
        let html = render("<b>@x.io", 3, 2, 1);
        assert!(html.contains("&lt;b&gt;@x.io"));
        assert!(html.contains("Projects: 3"));
        assert!(html.contains("Unread messages: 1"));
    }
}
