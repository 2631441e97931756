//! Project create/update schemas.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::patch::{Patch, blank_as_clear, blank_as_none, trimmed};
use super::Checker;
use crate::models::content::LocalizedText;

const MAX_TITLE: usize = 200;
const MAX_SUMMARY: usize = 500;
const MAX_DESCRIPTION: usize = 20_000;
const MAX_TECH_ITEMS: usize = 30;
const MAX_TECH_LEN: usize = 40;
const MAX_SORT_ORDER: i64 = 10_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default, deserialize_with = "trimmed")]
    pub slug: String,
    #[serde(default)]
    pub title: Option<LocalizedText>,
    #[serde(default)]
    pub summary: Option<LocalizedText>,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub github_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub live_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl Validate for CreateProjectRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        c.slug("slug", &self.slug);
        match &self.title {
            Some(t) => c.localized("title.en", "title.fr", t, MAX_TITLE),
            None => c.fail("title", "required", "title is required"),
        }
        match &self.summary {
            Some(s) => c.localized("summary.en", "summary.fr", s, MAX_SUMMARY),
            None => c.fail("summary", "required", "summary is required"),
        }
        if let Some(d) = &self.description {
            c.localized("description.en", "description.fr", d, MAX_DESCRIPTION);
        }
        check_tech_stack(&mut c, &self.tech_stack);
        if let Some(u) = &self.github_url {
            c.url("githubUrl", u);
        }
        if let Some(u) = &self.live_url {
            c.url("liveUrl", u);
        }
        if let Some(u) = &self.image_url {
            c.url("imageUrl", u);
        }
        c.range("sortOrder", self.sort_order.into(), 0, MAX_SORT_ORDER);
        c.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub slug: Patch<String>,
    #[serde(default)]
    pub title: Patch<LocalizedText>,
    #[serde(default)]
    pub summary: Patch<LocalizedText>,
    #[serde(default)]
    pub description: Patch<LocalizedText>,
    #[serde(default)]
    pub tech_stack: Patch<Vec<String>>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub github_url: Patch<String>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub live_url: Patch<String>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub image_url: Patch<String>,
    #[serde(default)]
    pub published: Patch<bool>,
    #[serde(default)]
    pub featured: Patch<bool>,
    #[serde(default)]
    pub sort_order: Patch<i32>,
}

impl Validate for UpdateProjectRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        c.not_cleared("slug", &self.slug);
        if let Patch::Set(slug) = &self.slug {
            c.slug("slug", slug);
        }
        c.not_cleared("title", &self.title);
        if let Patch::Set(t) = &self.title {
            c.localized("title.en", "title.fr", t, MAX_TITLE);
        }
        c.not_cleared("summary", &self.summary);
        if let Patch::Set(s) = &self.summary {
            c.localized("summary.en", "summary.fr", s, MAX_SUMMARY);
        }
        if let Patch::Set(d) = &self.description {
            c.localized("description.en", "description.fr", d, MAX_DESCRIPTION);
        }
        c.not_cleared("techStack", &self.tech_stack);
        if let Patch::Set(stack) = &self.tech_stack {
            check_tech_stack(&mut c, stack);
        }
        if let Patch::Set(u) = &self.github_url {
            c.url("githubUrl", u);
        }
        if let Patch::Set(u) = &self.live_url {
            c.url("liveUrl", u);
        }
        if let Patch::Set(u) = &self.image_url {
            c.url("imageUrl", u);
        }
        c.not_cleared("published", &self.published);
        c.not_cleared("featured", &self.featured);
        c.not_cleared("sortOrder", &self.sort_order);
        if let Patch::Set(order) = self.sort_order {
            c.range("sortOrder", order.into(), 0, MAX_SORT_ORDER);
        }
        c.finish()
    }
}

impl UpdateProjectRequest {
    /// True when the body names no column at all.
    pub fn is_empty(&self) -> bool {
        self.slug.is_untouched()
            && self.title.is_untouched()
            && self.summary.is_untouched()
            && self.description.is_untouched()
            && self.tech_stack.is_untouched()
            && self.github_url.is_untouched()
            && self.live_url.is_untouched()
            && self.image_url.is_untouched()
            && self.published.is_untouched()
            && self.featured.is_untouched()
            && self.sort_order.is_untouched()
    }
}

fn check_tech_stack(c: &mut Checker, stack: &[String]) {
    if stack.len() > MAX_TECH_ITEMS {
        c.fail(
            "techStack",
            "length",
            format!("techStack may list at most {MAX_TECH_ITEMS} entries"),
        );
    }
    if stack
        .iter()
        .any(|t| t.trim().is_empty() || t.chars().count() > MAX_TECH_LEN)
    {
        c.fail(
            "techStack",
            "item",
            format!("techStack entries must be between 1 and {MAX_TECH_LEN} characters"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{SLUG_MESSAGE, field_issues};

    fn create(json: serde_json::Value) -> CreateProjectRequest {
        serde_json::from_value(json).unwrap()
    }

    fn update(json: serde_json::Value) -> UpdateProjectRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn minimal_create_gets_defaults() {
        let req = create(serde_json::json!({
            "slug": "folio",
            "title": {"en": "Folio"},
            "summary": {"en": "Portfolio site", "fr": "Site portfolio"},
            "unknownField": "dropped"
        }));
        assert!(req.validate().is_ok());
        assert!(!req.published);
        assert!(!req.featured);
        assert_eq!(req.sort_order, 0);
        assert!(req.tech_stack.is_empty());
    }

    #[test]
    fn create_reports_all_failures() {
        let req = create(serde_json::json!({
            "slug": "Not Valid",
            "title": {"en": ""},
            "githubUrl": "github.com/no-scheme",
            "sortOrder": -1
        }));
        let issues = field_issues(&req.validate().unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["githubUrl", "slug", "sortOrder", "summary", "title.en"]
        );
    }

    #[test]
    fn create_blank_url_is_absent() {
        let req = create(serde_json::json!({
            "slug": "folio",
            "title": {"en": "Folio"},
            "summary": {"en": "Site"},
            "githubUrl": "",
            "liveUrl": "  "
        }));
        assert!(req.validate().is_ok());
        assert_eq!(req.github_url, None);
        assert_eq!(req.live_url, None);
    }

    #[test]
    fn update_empty_github_url_clears() {
        let req = update(serde_json::json!({"githubUrl": ""}));
        assert!(req.validate().is_ok());
        assert_eq!(req.github_url, Patch::Clear);
        assert_eq!(req.live_url, Patch::Untouched);
    }

    #[test]
    fn update_bad_slug_message() {
        let req = update(serde_json::json!({"slug": "UPPERCASE NOT VALID"}));
        let issues = field_issues(&req.validate().unwrap_err());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "slug");
        assert_eq!(issues[0].message, SLUG_MESSAGE);
    }

    #[test]
    fn update_cannot_clear_required_columns() {
        let req = update(serde_json::json!({"title": null, "published": null, "slug": ""}));
        let issues = field_issues(&req.validate().unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["published", "slug", "title"]);
    }

    #[test]
    fn update_description_null_clears() {
        let req = update(serde_json::json!({"description": null}));
        assert!(req.validate().is_ok());
        assert_eq!(req.description, Patch::Clear);
        assert!(!req.is_empty());
    }

    #[test]
    fn empty_update_detected() {
        assert!(update(serde_json::json!({"whatever": 1})).is_empty());
    }

    #[test]
    fn tech_stack_limits() {
        let req = update(serde_json::json!({"techStack": ["rust", ""]}));
        let issues = field_issues(&req.validate().unwrap_err());
        assert_eq!(issues[0].field, "techStack");
    }

    #[test]
    fn blank_french_variants_fail() {
        let req = create(serde_json::json!({
            "slug": "folio",
            "title": {"en": "t", "fr": ""},
            "summary": {"en": "s", "fr": "   "}
        }));
        let issues = field_issues(&req.validate().unwrap_err());
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["summary.fr", "title.fr"]);
    }
}
