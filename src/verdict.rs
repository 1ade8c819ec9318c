//! The closed table of homework review statuses and their display texts.
//!
//! [`HomeworkStatus`] is the single source of truth for which statuses the
//! API is documented to return. Anything outside the table parses to
//! [`UnknownStatus`], which carries the offending value for diagnostics.

use std::fmt;

use thiserror::Error;

/// A review status the API is documented to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

/// The API returned a status outside the documented table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("undocumented homework status: {0:?}")]
pub struct UnknownStatus(pub String);

impl HomeworkStatus {
    /// Parse a raw status identifier from the API.
    pub fn parse(raw: &str) -> Result<Self, UnknownStatus> {
        match raw {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }

    /// Whether a raw status identifier is in the documented table.
    #[allow(dead_code)]
    pub fn is_known(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// The fixed human-readable verdict for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_documented_status_parses() {
        assert_eq!(
            HomeworkStatus::parse("approved").unwrap(),
            HomeworkStatus::Approved
        );
        assert_eq!(
            HomeworkStatus::parse("reviewing").unwrap(),
            HomeworkStatus::Reviewing
        );
        assert_eq!(
            HomeworkStatus::parse("rejected").unwrap(),
            HomeworkStatus::Rejected
        );
    }

    #[test]
    fn verdict_table_round_trips() {
        for raw in ["approved", "reviewing", "rejected"] {
            let status = HomeworkStatus::parse(raw).unwrap();
            assert_eq!(status.to_string(), raw);
            assert!(!status.verdict().is_empty());
        }
    }

    #[test]
    fn verdict_texts_are_fixed() {
        assert_eq!(
            HomeworkStatus::Approved.verdict(),
            "Работа проверена: ревьюеру всё понравилось. Ура!"
        );
        assert_eq!(
            HomeworkStatus::Reviewing.verdict(),
            "Работа взята на проверку ревьюером."
        );
        assert_eq!(
            HomeworkStatus::Rejected.verdict(),
            "Работа проверена: у ревьюера есть замечания."
        );
    }

    #[test]
    fn unknown_status_carries_offending_value() {
        let err = HomeworkStatus::parse("banned").unwrap_err();
        assert_eq!(err, UnknownStatus("banned".to_string()));
        assert!(err.to_string().contains("banned"));
    }

    #[test]
    fn is_known_matches_the_table() {
        assert!(HomeworkStatus::is_known("approved"));
        assert!(HomeworkStatus::is_known("reviewing"));
        assert!(HomeworkStatus::is_known("rejected"));
        assert!(!HomeworkStatus::is_known(""));
        assert!(!HomeworkStatus::is_known("Approved"));
    }
}
