//! Lookup tables for the two teams and their rosters of one match.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::domain::{Player, Side, Team};
use crate::error::{PitchsideError, Result};

/// The two teams of a match in their fixed roles
#[derive(Debug, Clone)]
pub struct Teams {
    home: Arc<Team>,
    away: Arc<Team>,
}

impl Teams {
    pub fn new(home: Team, away: Team) -> Self {
        Self {
            home: Arc::new(home),
            away: Arc::new(away),
        }
    }

    pub fn get(&self, side: Side) -> &Arc<Team> {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn home(&self) -> &Arc<Team> {
        &self.home
    }

    pub fn away(&self) -> &Arc<Team> {
        &self.away
    }

    /// Team whose id equals `id`; exactly one of the two must match.
    pub fn resolve(&self, id: &str, match_id: &str) -> Result<&Arc<Team>> {
        match (self.home.id == id, self.away.id == id) {
            (true, false) => Ok(&self.home),
            (false, true) => Ok(&self.away),
            (true, true) => Err(PitchsideError::Invariant {
                match_id: match_id.to_string(),
                reason: format!("both teams share id `{id}`"),
            }),
            (false, false) => Err(PitchsideError::Reference {
                match_id: match_id.to_string(),
                kind: "team",
                id: id.to_string(),
            }),
        }
    }

    /// Whether `team` is one of the two match teams by identity
    pub fn contains(&self, team: &Arc<Team>) -> bool {
        Arc::ptr_eq(team, &self.home) || Arc::ptr_eq(team, &self.away)
    }
}

/// Per-side id -> player mappings, in the order players were first listed
#[derive(Debug, Clone, Default)]
pub struct Roster {
    home: IndexMap<String, Arc<Player>>,
    away: IndexMap<String, Arc<Player>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    fn side_mut(&mut self, side: Side) -> &mut IndexMap<String, Arc<Player>> {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Add a player to `side`; a repeated id replaces the earlier entry but
    /// keeps its original slot.
    pub fn insert(&mut self, side: Side, player: Player) {
        self.side_mut(side)
            .insert(player.id.clone(), Arc::new(player));
    }

    pub fn players(&self, side: Side) -> Vec<Arc<Player>> {
        let map = match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        };
        map.values().cloned().collect()
    }

    /// Find a player by id, home side first.
    ///
    /// Ids are only unique per side; if both sides list the same id the home
    /// player wins.
    pub fn find(&self, id: &str, match_id: &str) -> Result<&Arc<Player>> {
        self.home
            .get(id)
            .or_else(|| self.away.get(id))
            .ok_or_else(|| PitchsideError::Reference {
                match_id: match_id.to_string(),
                kind: "player",
                id: id.to_string(),
            })
    }

    /// Whether `player` is listed on either side, by identity
    pub fn contains(&self, player: &Arc<Player>) -> bool {
        [&self.home, &self.away].iter().any(|map| {
            map.get(&player.id)
                .is_some_and(|listed| Arc::ptr_eq(listed, player))
        })
    }
}
