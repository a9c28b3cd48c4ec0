//! Links carried by `@iot.selfLink` and `@iot.nextLink`.
//!
//! Servers usually send absolute URLs, but any URI reference is valid,
//! including relative ones such as `Observations?$skip=100`. A [`Link`]
//! keeps the reference as received; [`Link::resolve`] turns it into a URL
//! against a base, typically the service root.

use oxiri::IriRef;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A syntactically valid URI reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link(String);

impl Link {
    /// Parse a URI reference, absolute or relative.
    ///
    /// # Errors
    ///
    /// Returns error if `reference` is not a valid URI reference (for
    /// example, it contains spaces).
    pub fn parse(reference: &str) -> Result<Self, LinkError> {
        IriRef::parse(reference).map_err(|e| LinkError {
            reference: reference.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self(reference.to_string()))
    }

    /// The reference as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The link as a URL, if it is absolute.
    #[must_use]
    pub fn to_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }

    /// Whether the link carries a scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.to_url().is_some()
    }

    /// Resolve the link against `base`. Absolute links ignore the base.
    ///
    /// # Errors
    ///
    /// Returns error if the joined URL is invalid.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.0)
    }
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        Self(url.into())
    }
}

impl FromStr for Link {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A string that is not a URI reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid link {reference:?}: {message}")]
pub struct LinkError {
    /// The rejected text
    pub reference: String,
    /// Parser message
    pub message: String,
}
