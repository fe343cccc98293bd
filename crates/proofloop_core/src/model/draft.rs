//! Organize/modify challenge wizard accumulator.
//!
//! # Responsibility
//! - Collect the partial results of each wizard step into one value.
//! - Produce the aggregate request only when every required field is set.
//!
//! # Invariants
//! - Required fields: name, goal, prove time, end date, cover image.
//! - `rules` and `hashtags` are optional; empty lists never block readiness.
//! - Writes are last-write-wins; steps may complete in any order.
//! - A completed step rewrites only the fields it owns.
//! - Readiness is computed from current values on demand, never cached.

use crate::model::challenge::ProveTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wizard step that owns one slice of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStep {
    Name,
    Goal,
    Cover,
    Rules,
    Hashtags,
}

impl DraftStep {
    /// Steps in create-mode order.
    pub const ORDER: [DraftStep; 5] = [
        DraftStep::Name,
        DraftStep::Goal,
        DraftStep::Cover,
        DraftStep::Rules,
        DraftStep::Hashtags,
    ];

    /// Next step in create-mode order, `None` after the last one.
    pub fn next(self) -> Option<Self> {
        let index = Self::ORDER.iter().position(|step| *step == self)?;
        Self::ORDER.get(index + 1).copied()
    }

    pub fn first() -> Self {
        Self::ORDER[0]
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Goal => "goal",
            Self::Cover => "cover",
            Self::Rules => "rules",
            Self::Hashtags => "hashtags",
        }
    }
}

/// Required draft field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Goal,
    ProveTime,
    EndDate,
    CoverImage,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Goal => "goal",
            Self::ProveTime => "prove_time",
            Self::EndDate => "end_date",
            Self::CoverImage => "cover_image",
        }
    }
}

/// Aggregate organize/modify payload handed to the organize use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeChallengeRequest {
    pub name: String,
    pub goal: String,
    pub prove_time: ProveTime,
    /// Unix epoch milliseconds of the last proof day.
    pub end_date_epoch_ms: i64,
    /// Opaque image reference produced by the image picker.
    pub cover_image: String,
    pub rules: Vec<String>,
    pub hashtags: Vec<String>,
}

/// Builder value threaded through each wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeDraft {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub prove_time: Option<ProveTime>,
    pub end_date_epoch_ms: Option<i64>,
    pub cover_image: Option<String>,
    pub rules: Vec<String>,
    pub hashtags: Vec<String>,
}

impl ChallengeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a draft from an existing challenge for modify mode.
    pub fn from_request(request: &OrganizeChallengeRequest) -> Self {
        Self {
            name: Some(request.name.clone()),
            goal: Some(request.goal.clone()),
            prove_time: Some(request.prove_time),
            end_date_epoch_ms: Some(request.end_date_epoch_ms),
            cover_image: Some(request.cover_image.clone()),
            rules: request.rules.clone(),
            hashtags: request.hashtags.clone(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn with_prove_time(mut self, prove_time: ProveTime) -> Self {
        self.prove_time = Some(prove_time);
        self
    }

    pub fn with_end_date(mut self, end_date_epoch_ms: i64) -> Self {
        self.end_date_epoch_ms = Some(end_date_epoch_ms);
        self
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    pub fn with_rules(mut self, rules: Vec<String>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    /// Copies the fields owned by `step` from `from`; every other field keeps
    /// its current value.
    pub fn merge_step(&mut self, step: DraftStep, from: &ChallengeDraft) {
        match step {
            DraftStep::Name => self.name = from.name.clone(),
            DraftStep::Goal => {
                self.goal = from.goal.clone();
                self.prove_time = from.prove_time;
                self.end_date_epoch_ms = from.end_date_epoch_ms;
            }
            DraftStep::Cover => self.cover_image = from.cover_image.clone(),
            DraftStep::Rules => self.rules = from.rules.clone(),
            DraftStep::Hashtags => self.hashtags = from.hashtags.clone(),
        }
    }

    /// Required fields still absent (blank strings count as absent).
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push(DraftField::Name);
        }
        if is_blank(&self.goal) {
            missing.push(DraftField::Goal);
        }
        if self.prove_time.is_none() {
            missing.push(DraftField::ProveTime);
        }
        if self.end_date_epoch_ms.is_none() {
            missing.push(DraftField::EndDate);
        }
        if is_blank(&self.cover_image) {
            missing.push(DraftField::CoverImage);
        }
        missing
    }

    pub fn is_ready(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Builds the aggregate request.
    ///
    /// # Errors
    /// - `DraftIncomplete` listing every absent required field.
    pub fn build(&self) -> Result<OrganizeChallengeRequest, DraftIncomplete> {
        match (
            &self.name,
            &self.goal,
            self.prove_time,
            self.end_date_epoch_ms,
            &self.cover_image,
        ) {
            (Some(name), Some(goal), Some(prove_time), Some(end_date_epoch_ms), Some(cover))
                if self.is_ready() =>
            {
                Ok(OrganizeChallengeRequest {
                    name: name.trim().to_string(),
                    goal: goal.trim().to_string(),
                    prove_time,
                    end_date_epoch_ms,
                    cover_image: cover.trim().to_string(),
                    rules: self.rules.clone(),
                    hashtags: self.hashtags.clone(),
                })
            }
            _ => Err(DraftIncomplete {
                missing: self.missing_fields(),
            }),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |raw| raw.trim().is_empty())
}

/// Draft could not be turned into a request yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIncomplete {
    pub missing: Vec<DraftField>,
}

impl Display for DraftIncomplete {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = self
            .missing
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "challenge draft incomplete: missing {names}")
    }
}

impl Error for DraftIncomplete {}
