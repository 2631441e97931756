//! Certification create/update schemas.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::patch::{Patch, blank_as_clear, blank_as_none, trimmed};
use super::Checker;
use crate::models::content::LocalizedText;

const MAX_TITLE: usize = 200;
const MAX_ISSUER: usize = 200;
const MAX_CREDENTIAL_ID: usize = 200;
const MAX_SORT_ORDER: i64 = 10_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificationRequest {
    #[serde(default)]
    pub title: Option<LocalizedText>,
    #[serde(default, deserialize_with = "trimmed")]
    pub issuer: String,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub credential_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub credential_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl Validate for CreateCertificationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        match &self.title {
            Some(t) => c.localized("title.en", "title.fr", t, MAX_TITLE),
            None => c.fail("title", "required", "title is required"),
        }
        c.length("issuer", &self.issuer, 1, MAX_ISSUER);
        match self.issued_on {
            Some(date) => check_issued_on(&mut c, date),
            None => c.fail("issuedOn", "required", "issuedOn is required"),
        }
        if let Some(id) = &self.credential_id {
            c.length("credentialId", id, 1, MAX_CREDENTIAL_ID);
        }
        if let Some(u) = &self.credential_url {
            c.url("credentialUrl", u);
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
pub struct UpdateCertificationRequest {
    #[serde(default)]
    pub title: Patch<LocalizedText>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub issuer: Patch<String>,
    #[serde(default)]
    pub issued_on: Patch<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub credential_id: Patch<String>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub credential_url: Patch<String>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub image_url: Patch<String>,
    #[serde(default)]
    pub published: Patch<bool>,
    #[serde(default)]
    pub sort_order: Patch<i32>,
}

impl Validate for UpdateCertificationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        c.not_cleared("title", &self.title);
        if let Patch::Set(t) = &self.title {
            c.localized("title.en", "title.fr", t, MAX_TITLE);
        }
        c.not_cleared("issuer", &self.issuer);
        if let Patch::Set(issuer) = &self.issuer {
            c.length("issuer", issuer, 1, MAX_ISSUER);
        }
        c.not_cleared("issuedOn", &self.issued_on);
        if let Patch::Set(date) = self.issued_on {
            check_issued_on(&mut c, date);
        }
        if let Patch::Set(id) = &self.credential_id {
            c.length("credentialId", id, 1, MAX_CREDENTIAL_ID);
        }
        if let Patch::Set(u) = &self.credential_url {
            c.url("credentialUrl", u);
        }
        if let Patch::Set(u) = &self.image_url {
            c.url("imageUrl", u);
        }
        c.not_cleared("published", &self.published);
        c.not_cleared("sortOrder", &self.sort_order);
        if let Patch::Set(order) = self.sort_order {
            c.range("sortOrder", order.into(), 0, MAX_SORT_ORDER);
        }
        c.finish()
    }
}

impl UpdateCertificationRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_untouched()
            && self.issuer.is_untouched()
            && self.issued_on.is_untouched()
            && self.credential_id.is_untouched()
            && self.credential_url.is_untouched()
            && self.image_url.is_untouched()
            && self.published.is_untouched()
            && self.sort_order.is_untouched()
    }
}

fn check_issued_on(c: &mut Checker, date: NaiveDate) {
    if date > Utc::now().date_naive() {
        c.fail("issuedOn", "future", "issuedOn cannot be in the future");
    }
}
