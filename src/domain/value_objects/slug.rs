//! Department slugs.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SLUG_MIN_LEN: usize = 2;
pub const SLUG_MAX_LEN: usize = 100;

/// Lowercase `[a-z0-9-]` identifier with no leading, trailing or doubled dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

/// Why a string is not a valid slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug must be {SLUG_MIN_LEN}-{SLUG_MAX_LEN} characters")]
    Length,
    #[error("slug may only contain lowercase letters, digits and single dashes")]
    Charset,
}

impl Slug {
    /// Validate an explicit slug.
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        if raw.len() < SLUG_MIN_LEN || raw.len() > SLUG_MAX_LEN {
            return Err(SlugError::Length);
        }
        let valid_chars = raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid_chars || raw.starts_with('-') || raw.ends_with('-') || raw.contains("--") {
            return Err(SlugError::Charset);
        }
        Ok(Self(raw.to_string()))
    }

    /// Derive a slug from a display name.
    ///
    /// ASCII letters and digits are lowercased; every other run of characters
    /// collapses into one dash.
    pub fn from_name(name: &str) -> Result<Self, SlugError> {
        let mut out = String::with_capacity(name.len());
        let mut pending_dash = false;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(c.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }
        out.truncate(SLUG_MAX_LEN);
        while out.ends_with('-') {
            out.pop();
        }
        Self::parse(&out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
