//! Challenge read models and small validated value types.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Backend identifier for one challenge.
pub type ChallengeId = i64;

static PROVE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("valid prove time regex"));

/// Challenge list/detail projection returned by challenge use cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeSummary {
    pub id: ChallengeId,
    pub title: String,
    /// Whether the signed-in user already participates.
    pub joined: bool,
}

/// Daily time of day at which participants upload their proof photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProveTime {
    pub hour: u8,
    pub minute: u8,
}

impl ProveTime {
    /// Parses `HH:MM` (24h clock).
    pub fn parse(value: &str) -> Result<Self, ProveTimeError> {
        let trimmed = value.trim();
        let captures = PROVE_TIME_RE
            .captures(trimmed)
            .ok_or_else(|| ProveTimeError(trimmed.to_string()))?;
        let hour = captures[1]
            .parse::<u8>()
            .map_err(|_| ProveTimeError(trimmed.to_string()))?;
        let minute = captures[2]
            .parse::<u8>()
            .map_err(|_| ProveTimeError(trimmed.to_string()))?;
        Ok(Self { hour, minute })
    }
}

impl Display for ProveTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Prove time input did not match `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProveTimeError(pub String);

impl Display for ProveTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "prove time must be HH:MM, got `{}`", self.0)
    }
}

impl Error for ProveTimeError {}

/// What a report is filed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ReportTarget {
    Challenge(ChallengeId),
    User(i64),
    Proof(i64),
}

/// Report reason offered by the report screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Spam,
    Abuse,
    FakeProof,
    Other,
}
