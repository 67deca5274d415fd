//! Maven-style `group:artifact:version` coordinates for kjars.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one deployable kjar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReleaseId {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("invalid kjar coordinate `{input}`: expected group:artifact:version, got {segments} segment(s)")]
    Invalid { input: String, segments: usize },
    #[error("invalid kjar coordinate `{input}`: {part} segment is empty")]
    EmptySegment { input: String, part: &'static str },
}

impl ReleaseId {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Parse `group:artifact:version`. Exactly three non-empty segments.
    pub fn parse(gav: &str) -> Result<Self, CoordinateError> {
        let parts: Vec<&str> = gav.split(':').collect();
        let [group, artifact, version] = parts.as_slice() else {
            return Err(CoordinateError::Invalid {
                input: gav.to_string(),
                segments: parts.len(),
            });
        };
        for (part, value) in [("group", group), ("artifact", artifact), ("version", version)] {
            if value.trim().is_empty() {
                return Err(CoordinateError::EmptySegment {
                    input: gav.to_string(),
                    part,
                });
            }
        }
        Ok(Self::new(*group, *artifact, *version))
    }
}

impl FromStr for ReleaseId {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_gav() {
        let id = ReleaseId::parse("org.acme:rules-a:1.0").unwrap();
        assert_eq!(id.group_id, "org.acme");
        assert_eq!(id.artifact_id, "rules-a");
        assert_eq!(id.version, "1.0");
        assert_eq!(id.to_string(), "org.acme:rules-a:1.0");
    }

    #[test]
    fn parse_two_segments_fails() {
        let err = ReleaseId::parse("org.acme:rules-a").unwrap_err();
        assert_eq!(
            err,
            CoordinateError::Invalid {
                input: "org.acme:rules-a".to_string(),
                segments: 2
            }
        );
        assert!(err.to_string().contains("org.acme:rules-a"));
    }

    #[test]
    fn parse_four_segments_fails() {
        assert!(matches!(
            ReleaseId::parse("a:b:c:d"),
            Err(CoordinateError::Invalid { segments: 4, .. })
        ));
    }

    #[test]
    fn parse_empty_segment_fails() {
        assert!(matches!(
            ReleaseId::parse("org.acme::1.0"),
            Err(CoordinateError::EmptySegment { part: "artifact", .. })
        ));
        assert!(matches!(
            ReleaseId::parse(":rules-a:1.0"),
            Err(CoordinateError::EmptySegment { part: "group", .. })
        ));
        assert!(ReleaseId::parse("").is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let id: ReleaseId = "g:a:v".parse().unwrap();
        assert_eq!(id, ReleaseId::new("g", "a", "v"));
    }
}
