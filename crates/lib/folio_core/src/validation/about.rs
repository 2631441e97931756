//! About-page update schema.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::patch::{Patch, blank_as_clear};
use super::{Checker, is_http_url};
use crate::models::content::{LocalizedText, SocialLinks};

const MAX_HEADLINE: usize = 200;
const MAX_BIO: usize = 10_000;
const MAX_LOCATION: usize = 100;
const MAX_SOCIALS: usize = 20;
const MAX_SOCIAL_NAME: usize = 30;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAboutRequest {
    #[serde(default)]
    pub headline: Patch<LocalizedText>,
    #[serde(default)]
    pub bio: Patch<LocalizedText>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub location: Patch<String>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub email: Patch<String>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub resume_url: Patch<String>,
    #[serde(default, deserialize_with = "blank_as_clear")]
    pub avatar_url: Patch<String>,
    #[serde(default)]
    pub socials: Patch<SocialLinks>,
}

impl Validate for UpdateAboutRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::new();
        c.not_cleared("headline", &self.headline);
        if let Patch::Set(h) = &self.headline {
            c.localized("headline.en", "headline.fr", h, MAX_HEADLINE);
        }
        c.not_cleared("bio", &self.bio);
        if let Patch::Set(b) = &self.bio {
            c.localized("bio.en", "bio.fr", b, MAX_BIO);
        }
        if let Patch::Set(loc) = &self.location {
            c.length("location", loc, 1, MAX_LOCATION);
        }
        if let Patch::Set(email) = &self.email {
            c.email("email", email);
        }
        if let Patch::Set(u) = &self.resume_url {
            c.url("resumeUrl", u);
        }
        if let Patch::Set(u) = &self.avatar_url {
            c.url("avatarUrl", u);
        }
        if let Patch::Set(socials) = &self.socials {
            check_socials(&mut c, socials);
        }
        c.finish()
    }
}

impl UpdateAboutRequest {
    pub fn is_empty(&self) -> bool {
        self.headline.is_untouched()
            && self.bio.is_untouched()
            && self.location.is_untouched()
            && self.email.is_untouched()
            && self.resume_url.is_untouched()
            && self.avatar_url.is_untouched()
            && self.socials.is_untouched()
    }
}

fn check_socials(c: &mut Checker, socials: &SocialLinks) {
    if socials.len() > MAX_SOCIALS {
        c.fail(
            "socials",
            "length",
            format!("socials may list at most {MAX_SOCIALS} links"),
        );
    }
    let bad_name = socials.keys().any(|k| {
        k.is_empty()
            || k.len() > MAX_SOCIAL_NAME
            || !k.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
    });
    if bad_name {
        c.fail(
            "socials",
            "name",
            "socials names must be lowercase letters and digits",
        );
    }
    if socials.values().any(|u| !is_http_url(u)) {
        c.fail("socials", "url", "socials links must be valid http(s) URLs");
    }
}
