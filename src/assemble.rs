//! Composing normalized parts into a [`Game`].

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::{Competition, Game, Shot, Side, SkippedShot};
use crate::error::{PitchsideError, Result};
use crate::normalize::{Roster, ShotErrorPolicy, Teams};

/// Match-level facts known before any shot is processed
#[derive(Debug, Clone)]
pub struct GameHeader {
    pub id: String,
    pub datetime: DateTime<Utc>,
    pub competition: Competition,
}

/// Collects shot outcomes for one match and builds the final [`Game`]
#[derive(Debug)]
pub struct GameAssembler {
    match_id: String,
    policy: ShotErrorPolicy,
    raw_count: usize,
    events: Vec<Shot>,
    skipped: Vec<SkippedShot>,
}

impl GameAssembler {
    pub fn new(match_id: impl Into<String>, policy: ShotErrorPolicy) -> Self {
        Self {
            match_id: match_id.into(),
            policy,
            raw_count: 0,
            events: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Record the outcome of normalizing one raw shot record.
    ///
    /// Errors scoped to the shot are absorbed under [`ShotErrorPolicy::Skip`];
    /// everything else propagates.
    pub fn record(&mut self, shot_id: &str, outcome: Result<Shot>) -> Result<()> {
        self.raw_count += 1;
        match outcome {
            Ok(shot) => {
                self.events.push(shot);
                Ok(())
            }
            Err(e) if e.is_shot_scoped() && self.policy == ShotErrorPolicy::Skip => {
                warn!(match_id = %self.match_id, shot_id, error = %e, "skipping shot");
                self.skipped.push(SkippedShot {
                    shot_id: shot_id.to_string(),
                    reason: e.to_string(),
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn finish(mut self, header: GameHeader, teams: &Teams, roster: &Roster) -> Result<Game> {
        // stable: shots in the same minute keep source order
        self.events.sort_by_key(|shot| shot.seconds);
        self.check(teams, roster)?;

        debug!(
            match_id = %self.match_id,
            events = self.events.len(),
            skipped = self.skipped.len(),
            "assembled game"
        );

        Ok(Game {
            id: header.id,
            datetime: header.datetime,
            home_team: teams.get(Side::Home).clone(),
            away_team: teams.get(Side::Away).clone(),
            home_players: roster.players(Side::Home),
            away_players: roster.players(Side::Away),
            competition: header.competition,
            events: self.events,
            skipped: self.skipped,
        })
    }

    fn check(&self, teams: &Teams, roster: &Roster) -> Result<()> {
        let invariant = |reason: String| PitchsideError::Invariant {
            match_id: self.match_id.clone(),
            reason,
        };

        if self.events.len() + self.skipped.len() != self.raw_count {
            return Err(invariant(format!(
                "{} shots recorded but {} accounted for",
                self.raw_count,
                self.events.len() + self.skipped.len()
            )));
        }
        for shot in &self.events {
            if !teams.contains(&shot.team) {
                return Err(invariant(format!(
                    "shot {} credited to foreign team {}",
                    shot.id, shot.team.id
                )));
            }
            if !roster.contains(&shot.player) {
                return Err(invariant(format!(
                    "shot {} taken by unlisted player {}",
                    shot.id, shot.player.id
                )));
            }
        }
        Ok(())
    }
}
