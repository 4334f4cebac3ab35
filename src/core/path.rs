/*!
 * Document Paths
 * Segment-list representation of hierarchical content-tree paths
 */

use crate::core::errors::PermissionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delimiter joining path segments in the wire form ("Documents > Team A")
pub const PATH_DELIMITER: &str = " > ";

/// A document path as an ordered, non-empty list of segments.
///
/// Paths are parsed from the delimiter-joined string at the boundary and
/// handled segment-wise internally, so ancestor checks can never split a
/// segment mid-token ("Team A" is not an ancestor of "Team AB > Notes").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath {
    segments: Vec<String>,
}

impl DocPath {
    /// Parse the delimiter-joined wire form.
    ///
    /// Rejects empty or whitespace-only input and empty segments; surrounding
    /// whitespace on each segment is trimmed.
    pub fn parse(raw: &str) -> Result<Self, PermissionError> {
        if raw.trim().is_empty() {
            return Err(PermissionError::InvalidPath {
                reason: "path is empty or whitespace-only".into(),
            });
        }

        let segments: Vec<String> = raw
            .split(PATH_DELIMITER)
            .map(|s| s.trim().to_string())
            .collect();

        if segments.iter().any(|s| s.is_empty()) {
            return Err(PermissionError::InvalidPath {
                reason: format!("path '{raw}' contains an empty segment"),
            });
        }

        Ok(Self { segments })
    }

    /// Path segments in root-to-leaf order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segment count; ancestor chains have strictly increasing depth
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// True iff `self` is an ancestor of `other` or equal to it
    /// (segment-wise prefix)
    pub fn is_ancestor_or_self(&self, other: &DocPath) -> bool {
        self.depth() <= other.depth() && other.segments[..self.depth()] == self.segments[..]
    }

    /// True iff `self` is a strict ancestor of `other` (prefix, shallower)
    pub fn is_strict_ancestor_of(&self, other: &DocPath) -> bool {
        self.depth() < other.depth() && self.is_ancestor_or_self(other)
    }

    /// Child path with one more segment appended
    pub fn child(&self, segment: &str) -> Result<Self, PermissionError> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(PermissionError::InvalidPath {
                reason: "child segment is empty".into(),
            });
        }
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(PATH_DELIMITER))
    }
}

impl FromStr for DocPath {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocPath {
    type Error = PermissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocPath> for String {
    fn from(path: DocPath) -> Self {
        path.to_string()
    }
}
