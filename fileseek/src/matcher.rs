//! Literal term matching against file names and extracted content.
//!
//! Matching is deliberately narrow: case-sensitive substring, prefix, or
//! suffix on the base name, or substring on extracted content. There is no
//! regex, wildcard, or fuzzy expansion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The string relation used to test a candidate file against the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Term appears anywhere in the file's base name.
    #[serde(rename = "contains")]
    NameContains,
    /// Base name starts with the term.
    #[serde(rename = "starts-with")]
    NameStartsWith,
    /// Base name ends with the term.
    #[serde(rename = "ends-with")]
    NameEndsWith,
    /// Term appears anywhere in the file's extracted content.
    #[serde(rename = "content")]
    ContentContains,
}

impl MatchMode {
    /// Whether this mode requires reading file content.
    pub fn needs_content(self) -> bool {
        matches!(self, MatchMode::ContentContains)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::NameContains => "contains",
            MatchMode::NameStartsWith => "starts-with",
            MatchMode::NameEndsWith => "ends-with",
            MatchMode::ContentContains => "content",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(MatchMode::NameContains),
            "starts-with" | "startswith" => Ok(MatchMode::NameStartsWith),
            "ends-with" | "endswith" => Ok(MatchMode::NameEndsWith),
            "content" | "content-contains" => Ok(MatchMode::ContentContains),
            _ => Err(format!(
                "unknown match mode '{s}' (expected contains|starts-with|ends-with|content)"
            )),
        }
    }
}

/// A search term bound to a match mode.
///
/// Pure predicate; callers reject the empty term before a matcher is built.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    mode: MatchMode,
}

impl TermMatcher {
    pub fn new(term: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            term: term.into(),
            mode,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Tests a file's base name under the name modes.
    ///
    /// Always false for `ContentContains`; content is tested separately.
    pub fn matches_name(&self, name: &str) -> bool {
        match self.mode {
            MatchMode::NameContains => name.contains(&self.term),
            MatchMode::NameStartsWith => name.starts_with(&self.term),
            MatchMode::NameEndsWith => name.ends_with(&self.term),
            MatchMode::ContentContains => false,
        }
    }

    /// Tests extracted content. Empty content never matches a non-empty term.
    pub fn matches_content(&self, content: &str) -> bool {
        content.contains(&self.term)
    }
}
