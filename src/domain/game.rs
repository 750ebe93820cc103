use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::entity::{Competition, Player, Side, Team};
use super::shot::Shot;

/// A shot left out of the event list under the skip policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedShot {
    pub shot_id: String,
    pub reason: String,
}

/// One normalized match: teams, rosters and the chronological shot list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub datetime: DateTime<Utc>,
    pub home_team: Arc<Team>,
    pub away_team: Arc<Team>,
    pub home_players: Vec<Arc<Player>>,
    pub away_players: Vec<Arc<Player>>,
    pub competition: Competition,
    pub events: Vec<Shot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedShot>,
}

impl Game {
    pub fn team(&self, side: Side) -> &Arc<Team> {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn players(&self, side: Side) -> &[Arc<Player>] {
        match side {
            Side::Home => &self.home_players,
            Side::Away => &self.away_players,
        }
    }

    /// Side of `team`, by identity with one of the two match teams
    pub fn side_of(&self, team: &Arc<Team>) -> Option<Side> {
        if Arc::ptr_eq(team, &self.home_team) {
            Some(Side::Home)
        } else if Arc::ptr_eq(team, &self.away_team) {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn shots_for(&self, side: Side) -> impl Iterator<Item = &Shot> {
        let team = self.team(side);
        self.events.iter().filter(move |s| Arc::ptr_eq(&s.team, team))
    }

    /// Goals credited to `side`, own goals included
    pub fn score(&self, side: Side) -> usize {
        self.shots_for(side).filter(|s| s.result.is_goal()).count()
    }

    pub fn is_chronological(&self) -> bool {
        self.events.windows(2).all(|w| w[0].seconds <= w[1].seconds)
    }
}
