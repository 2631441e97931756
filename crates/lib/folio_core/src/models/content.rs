//! Portfolio content domain models.
//!
//! Row structs mirror the tables one-to-one (JSON columns wrapped in
//! `sqlx::types::Json`); the plain structs are what the API serializes.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

// =============================================================================
// Value types
// =============================================================================

/// Bilingual text stored in a JSON column. English is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
}

impl LocalizedText {
    pub fn en(text: impl Into<String>) -> Self {
        Self {
            en: text.into(),
            fr: None,
        }
    }
}

/// Social links keyed by network name (e.g. `github` → URL).
pub type SocialLinks = BTreeMap<String, String>;

// =============================================================================
// DB row structs
// =============================================================================

/// Database row for `projects`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub slug: String,
    pub title: Json<LocalizedText>,
    pub summary: Json<LocalizedText>,
    pub description: Option<Json<LocalizedText>>,
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for `certifications`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CertificationRow {
    pub id: Uuid,
    pub title: Json<LocalizedText>,
    pub issuer: String,
    pub issued_on: NaiveDate,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for the singleton `about` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AboutRow {
    pub headline: Json<LocalizedText>,
    pub bio: Json<LocalizedText>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub resume_url: Option<String>,
    pub avatar_url: Option<String>,
    pub socials: Option<Json<SocialLinks>>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for `contact_messages`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactMessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// API views
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub slug: String,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    pub description: Option<LocalizedText>,
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title.0,
            summary: row.summary.0,
            description: row.description.map(|d| d.0),
            tech_stack: row.tech_stack,
            github_url: row.github_url,
            live_url: row.live_url,
            image_url: row.image_url,
            published: row.published,
            featured: row.featured,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub title: LocalizedText,
    pub issuer: String,
    pub issued_on: NaiveDate,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CertificationRow> for Certification {
    fn from(row: CertificationRow) -> Self {
        Self {
            id: row.id,
            title: row.title.0,
            issuer: row.issuer,
            issued_on: row.issued_on,
            credential_id: row.credential_id,
            credential_url: row.credential_url,
            image_url: row.image_url,
            published: row.published,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub headline: LocalizedText,
    pub bio: LocalizedText,
    pub location: Option<String>,
    pub email: Option<String>,
    pub resume_url: Option<String>,
    pub avatar_url: Option<String>,
    pub socials: Option<SocialLinks>,
    pub updated_at: DateTime<Utc>,
}

impl From<AboutRow> for About {
    fn from(row: AboutRow) -> Self {
        Self {
            headline: row.headline.0,
            bio: row.bio.0,
            location: row.location,
            email: row.email,
            resume_url: row.resume_url,
            avatar_url: row.avatar_url,
            socials: row.socials.map(|s| s.0),
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessageRow> for ContactMessage {
    fn from(row: ContactMessageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}
