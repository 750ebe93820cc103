use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::entity::{Player, Team};
use super::pitch::Location;

/// Phase of the match a shot was taken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    FirstHalf,
    SecondHalf,
    FirstExtra,
    SecondExtra,
    PenaltyShootout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotPattern {
    OpenPlay,
    Freekick,
    Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    RightFoot,
    LeftFoot,
    Head,
    Other,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotResult {
    Goal,
    Saved,
    Missed,
    Blocked,
    OwnGoal,
}

impl ShotResult {
    pub fn is_goal(&self) -> bool {
        matches!(self, ShotResult::Goal | ShotResult::OwnGoal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Shot,
}

/// Where a shot's `end_location` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndLocationSource {
    /// Point where the ball crossed the goal line, as reported by the provider
    GoalCrossing,
    /// Provider gave no end point; the pitch origin stands in for it
    Sentinel,
}

/// A canonical shot event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub period: Period,
    /// Whole minutes converted to seconds; sub-minute precision is not available
    pub seconds: u32,
    pub team: Arc<Team>,
    pub player: Arc<Player>,
    pub location: Location,
    pub end_location: Location,
    pub end_location_source: EndLocationSource,
    pub pattern: ShotPattern,
    pub body_part: BodyPart,
    pub result: ShotResult,
}
