//! Dimension-value pattern matching.
//!
//! A mapping rule constrains each source dimension with a pattern:
//!
//! | pattern        | meaning                                            |
//! |----------------|----------------------------------------------------|
//! | `*`            | any value, including an absent dimension           |
//! | `+`            | any non-empty value; the dimension must be present |
//! | absent or `""` | the dimension must be absent or empty              |
//! | anything else  | full-string regex match                            |
//!
//! Literal patterns compile once, at rule construction. Inside a literal,
//! `*` widens to `.*`; `+` is matched as the plain character, never as
//! "one or more". Other characters pass into the regex untouched, so
//! literals may use ordinary regex syntax (alternation, character classes).

use regex::Regex;

use crate::error::PatternError;

const ANYTHING_OR_EMPTY: &str = "*";
const ANYTHING_NOT_EMPTY: &str = "+";

/// A compiled pattern for one source dimension.
#[derive(Debug, Clone)]
pub enum DimPattern {
    /// `*`: accepts any value, present or not.
    Any,
    /// `+`: accepts any present, non-empty value.
    NonEmpty,
    /// Absent or empty pattern: the dimension must be absent or empty.
    Empty,
    /// Anything else: the anchored regex must match the whole value.
    Literal { raw: String, regex: Regex },
}

impl DimPattern {
    /// Compiles raw pattern text. `None` and `""` both mean
    /// [`DimPattern::Empty`].
    pub fn parse(raw: Option<&str>) -> Result<Self, PatternError> {
        match raw {
            None | Some("") => Ok(Self::Empty),
            Some(ANYTHING_OR_EMPTY) => Ok(Self::Any),
            Some(ANYTHING_NOT_EMPTY) => Ok(Self::NonEmpty),
            Some(text) => {
                let regex =
                    Regex::new(&format!("^(?:{})$", to_regex(text))).map_err(|source| {
                        PatternError {
                            pattern: text.to_string(),
                            source,
                        }
                    })?;
                Ok(Self::Literal {
                    raw: text.to_string(),
                    regex,
                })
            }
        }
    }

    /// The pattern as authored, when there is one ([`DimPattern::Empty`] has
    /// none).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Any => Some(ANYTHING_OR_EMPTY),
            Self::NonEmpty => Some(ANYTHING_NOT_EMPTY),
            Self::Empty => None,
            Self::Literal { raw, .. } => Some(raw),
        }
    }

    /// True for the `*` and `+` patterns.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any | Self::NonEmpty)
    }

    /// Matches the pattern against a concrete dimension value, absent
    /// dimensions included.
    #[must_use]
    pub fn matches_value(&self, candidate: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::NonEmpty => candidate.is_some_and(|value| !value.is_empty()),
            Self::Empty => candidate.is_none_or(str::is_empty),
            Self::Literal { regex, .. } => regex.is_match(candidate.unwrap_or("")),
        }
    }

    /// Matches the pattern against one dimension of a partial rule query.
    ///
    /// Both sides may carry wildcards: `*` on either side accepts, `+` on
    /// either side requires both sides non-empty. The query side is never
    /// compiled: a query value that is neither `*` nor `+` is matched as
    /// plain text against this pattern's regex, even if it contains
    /// wildcard characters.
    #[must_use]
    pub fn matches_request(&self, request: Option<&str>) -> bool {
        let request_empty = request.is_none_or(str::is_empty);
        match self {
            Self::Any => true,
            _ if request == Some(ANYTHING_OR_EMPTY) => true,
            Self::NonEmpty => !request_empty,
            _ if request == Some(ANYTHING_NOT_EMPTY) => !matches!(self, Self::Empty),
            Self::Empty => request_empty,
            Self::Literal { regex, .. } => regex.is_match(request.unwrap_or("")),
        }
    }
}

fn to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    for ch in pattern.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '+' => out.push_str("\\+"),
            _ => out.push(ch),
        }
    }
    out
}
