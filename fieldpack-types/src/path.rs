//! Dotted property paths.
//!
//! A field named `author.name` reads from and writes to `record.author.name`,
//! which lets a flat field list address nested structure.

use crate::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A parsed, non-empty dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<String>,
}

impl PropertyPath {
    /// Parses a dotted path.
    ///
    /// Rejects empty paths and paths with empty segments (`a..b`, `.a`, `a.`).
    pub fn parse(raw: &str) -> crate::Result<Self> {
        if raw.is_empty() {
            return Err(Error::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty",
            });
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::InvalidPath {
                path: raw.to_string(),
                reason: "path contains an empty segment",
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when the path has more than one segment.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Splits into the final segment and its parents.
    pub(crate) fn split_last(&self) -> (&str, &[String]) {
        match self.segments.split_last() {
            Some((last, parents)) => (last.as_str(), parents),
            // parse() guarantees at least one segment
            None => (self.raw.as_str(), &[]),
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PropertyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_last_single_segment() {
        let p = PropertyPath::parse("title").unwrap();
        let (last, parents) = p.split_last();
        assert_eq!(last, "title");
        assert!(parents.is_empty());
    }

    #[test]
    fn split_last_nested() {
        let p = PropertyPath::parse("meta.author.name").unwrap();
        let (last, parents) = p.split_last();
        assert_eq!(last, "name");
        assert_eq!(parents, ["meta", "author"]);
    }
}
