//! Three-state field updates and blank-string normalization.
//!
//! A JSON update body distinguishes a missing key (leave the column alone),
//! an explicit `null` (clear the column), and a value (write it). `Option`
//! conflates the first two, so update schemas use [`Patch`] instead. Fields
//! must carry `#[serde(default)]` so a missing key becomes `Untouched`.

use serde::{Deserialize, Deserializer};

/// Update intent for a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key absent: the column is left out of the UPDATE.
    Untouched,
    /// Explicit `null`: the column is set to NULL.
    Clear,
    /// A value: the column is set to it.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Untouched
    }
}

impl<T> Patch<T> {
    pub fn is_untouched(&self) -> bool {
        matches!(self, Patch::Untouched)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Untouched => Patch::Untouched,
            Patch::Clear => Patch::Clear,
            Patch::Set(v) => Patch::Set(f(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}

/// Deserialize an optional string, trimming it and mapping blank to `Clear`.
pub fn blank_as_clear<'de, D>(deserializer: D) -> Result<Patch<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => Patch::Set(s.trim().to_string()),
        _ => Patch::Clear,
    })
}

/// Deserialize an optional string, trimming it and mapping blank to `None`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Deserialize a string (or `null`) and trim it.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        count: Patch<i32>,
        #[serde(default, deserialize_with = "blank_as_clear")]
        url: Patch<String>,
        #[serde(default, deserialize_with = "blank_as_none")]
        note: Option<String>,
    }

    fn parse(json: &str) -> Body {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_key_is_untouched() {
        let body = parse("{}");
        assert_eq!(body.count, Patch::Untouched);
        assert_eq!(body.url, Patch::Untouched);
        assert_eq!(body.note, None);
    }

    #[test]
    fn explicit_null_is_clear() {
        let body = parse(r#"{"count": null, "url": null}"#);
        assert_eq!(body.count, Patch::Clear);
        assert_eq!(body.url, Patch::Clear);
    }

    #[test]
    fn value_is_set() {
        let body = parse(r#"{"count": 3, "url": " https://x.io "}"#);
        assert_eq!(body.count, Patch::Set(3));
        assert_eq!(body.url, Patch::Set("https://x.io".into()));
    }

    #[test]
    fn blank_string_clears() {
        let body = parse(r#"{"url": "", "note": "   "}"#);
        assert_eq!(body.url, Patch::Clear);
        assert_eq!(body.note, None);
    }
}
