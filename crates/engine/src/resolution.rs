//! Result types for title resolution.
//!
//! Resolution failures are expected and frequent (typos, ambiguous titles),
//! so they are modeled as a tagged result value rather than an error type:
//! callers must handle `Unresolved` the same way they handle success.

use catalog::RowId;
use serde::Serialize;
use std::fmt;

/// Message sent back when the query string is empty
pub const NO_TITLE_MESSAGE: &str = "Please provide a movie title";

/// Message for a unique title queried with the wrong year
pub const YEAR_MISMATCH_MESSAGE: &str =
    "No exact match found for that title and year. Check the year and try again.";

/// Message for zero or multiple remaining candidates
pub const AMBIGUOUS_MESSAGE: &str = "Please be more specific. Did you mean one of these?";

/// A `(standardized_title, year)` suggestion pair.
///
/// Serializes as a two-element array, which is how the API has always
/// reported suggestions.
pub type TitleYear = (String, u16);

/// Discriminant for the two non-success resolution outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisambiguationKind {
    #[serde(rename = "No movie title provided")]
    NoTitleProvided,
    #[serde(rename = "Ambiguous or no match found")]
    AmbiguousOrNotFound,
}

impl fmt::Display for DisambiguationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisambiguationKind::NoTitleProvided => write!(f, "No movie title provided"),
            DisambiguationKind::AmbiguousOrNotFound => write!(f, "Ambiguous or no match found"),
        }
    }
}

/// Structured non-error result returned when a title query cannot be
/// resolved to exactly one row.
///
/// `possible_matches` is `None` for the no-title case and `Some` (possibly
/// empty) for the ambiguous case, so the two are distinguishable both by
/// `kind` and by payload shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disambiguation {
    #[serde(rename = "error")]
    pub kind: DisambiguationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_matches: Option<Vec<TitleYear>>,
}

impl Disambiguation {
    pub fn no_title() -> Self {
        Self {
            kind: DisambiguationKind::NoTitleProvided,
            message: NO_TITLE_MESSAGE.to_string(),
            possible_matches: None,
        }
    }

    pub fn ambiguous(message: &str, possible_matches: Vec<TitleYear>) -> Self {
        Self {
            kind: DisambiguationKind::AmbiguousOrNotFound,
            message: message.to_string(),
            possible_matches: Some(possible_matches),
        }
    }
}

/// Outcome of the title resolution cascade.
///
/// `Resolved` carries positional row ids into the catalog; normally a
/// singleton, but duplicate year-variants under one standardized title can
/// legitimately produce more than one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Vec<RowId>),
    Unresolved(Disambiguation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_title_serializes_without_matches() {
        let value = serde_json::to_value(Disambiguation::no_title()).unwrap();
        assert_eq!(value["error"], "No movie title provided");
        assert_eq!(value["message"], NO_TITLE_MESSAGE);
        assert!(value.get("possible_matches").is_none());
    }

    #[test]
    fn test_ambiguous_serializes_matches_as_pairs() {
        let d = Disambiguation::ambiguous(
            AMBIGUOUS_MESSAGE,
            vec![("The Matrix".to_string(), 1999), ("The Matrix".to_string(), 2021)],
        );
        let value = serde_json::to_value(d).unwrap();
        assert_eq!(value["error"], "Ambiguous or no match found");
        assert_eq!(value["possible_matches"][0][0], "The Matrix");
        assert_eq!(value["possible_matches"][1][1], 2021);
    }

    #[test]
    fn test_empty_match_list_is_preserved() {
        let d = Disambiguation::ambiguous(AMBIGUOUS_MESSAGE, vec![]);
        let value = serde_json::to_value(d).unwrap();
        assert!(value["possible_matches"].as_array().unwrap().is_empty());
    }
}
