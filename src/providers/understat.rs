//! Understat match pages.
//!
//! The page embeds three JSON blocks as escaped string literals inside inline
//! scripts: match metadata, both rosters and both teams' shots. Coordinates
//! are fractions of the pitch; each side attacks its own unit square, with the
//! away square mirrored along the length.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

use super::{de, join_url, Provider, ProviderKind, ProviderRequest};
use crate::assemble::{GameAssembler, GameHeader};
use crate::domain::{
    BodyPart, Competition, Direction, EventType, Game, Pitch, Player, Shot, ShotPattern,
    ShotResult, Side, Team,
};
use crate::error::{PitchsideError, Result};
use crate::extract::{body_text, ScriptBlocks};
use crate::normalize::{coordinates, period, NormalizeOptions, Roster, Teams, VocabTable};

pub const BASE_URL: &str = "https://understat.com";

const MATCH_INFO: &str = "match_info";
const ROSTERS: &str = "rostersData";
const SHOTS: &str = "shotsData";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub static SHOT_RESULTS: VocabTable<ShotResult> = VocabTable::strict(
    "shot result",
    &[
        ("OwnGoal", ShotResult::OwnGoal),
        ("Goal", ShotResult::Goal),
        ("SavedShot", ShotResult::Saved),
        ("MissedShots", ShotResult::Missed),
        ("ShotOnPost", ShotResult::Missed),
        ("BlockedShot", ShotResult::Blocked),
    ],
);

pub static SHOT_PATTERNS: VocabTable<ShotPattern> = VocabTable::with_default(
    "shot pattern",
    &[
        ("DirectFreekick", ShotPattern::Freekick),
        ("OpenPlay", ShotPattern::OpenPlay),
        ("Penalty", ShotPattern::Penalty),
    ],
    ShotPattern::OpenPlay,
);

pub static BODY_PARTS: VocabTable<BodyPart> = VocabTable::with_default(
    "body part",
    &[
        ("RightFoot", BodyPart::RightFoot),
        ("LeftFoot", BodyPart::LeftFoot),
        ("Head", BodyPart::Head),
        ("OtherBodyPart", BodyPart::Other),
    ],
    BodyPart::Other,
);

// ── Understat JSON deserialization structs ───────────────────────

#[derive(Debug, Deserialize)]
struct RawMatchInfo {
    #[serde(deserialize_with = "de::id_string")]
    id: String,
    #[serde(rename = "h", deserialize_with = "de::id_string")]
    home_id: String,
    #[serde(rename = "a", deserialize_with = "de::id_string")]
    away_id: String,
    team_h: String,
    team_a: String,
    #[serde(deserialize_with = "de::id_string")]
    league_id: String,
    league: String,
    date: String,
}

/// Keyed by roster row id; rows are read in page order.
#[derive(Debug, Deserialize)]
struct RawRosters {
    #[serde(default)]
    h: IndexMap<String, RawRosterEntry>,
    #[serde(default)]
    a: IndexMap<String, RawRosterEntry>,
}

#[derive(Debug, Deserialize)]
struct RawRosterEntry {
    #[serde(deserialize_with = "de::id_string")]
    player_id: String,
    player: String,
    #[serde(default)]
    position: String,
}

#[derive(Debug, Deserialize)]
struct RawShots {
    #[serde(default)]
    h: Vec<RawShot>,
    #[serde(default)]
    a: Vec<RawShot>,
}

#[derive(Debug, Deserialize)]
struct RawShot {
    #[serde(deserialize_with = "de::id_string")]
    id: String,
    #[serde(deserialize_with = "de::minute")]
    minute: u32,
    result: String,
    #[serde(rename = "X", deserialize_with = "de::number")]
    x: f64,
    #[serde(rename = "Y", deserialize_with = "de::number")]
    y: f64,
    #[serde(deserialize_with = "de::id_string")]
    player_id: String,
    #[serde(default)]
    situation: Option<String>,
    #[serde(rename = "shotType", default)]
    shot_type: Option<String>,
    #[serde(default)]
    h_a: Option<String>,
}

// ── Provider ─────────────────────────────────────────────────────

/// Understat match page pipeline
#[derive(Debug, Clone)]
pub struct Understat {
    match_id: String,
    base_url: String,
    options: NormalizeOptions,
}

impl Understat {
    pub fn new(match_id: impl Into<String>, options: NormalizeOptions) -> Self {
        Self {
            match_id: match_id.into(),
            base_url: BASE_URL.to_string(),
            options,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Provider for Understat {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Understat
    }

    fn match_id(&self) -> &str {
        &self.match_id
    }

    fn request(&self) -> Result<ProviderRequest> {
        let url = join_url(&self.base_url, &format!("match/{}", self.match_id))
            .map_err(|e| PitchsideError::Validation(format!("bad understat url: {e}")))?;
        Ok(ProviderRequest {
            kind: self.kind(),
            match_id: self.match_id.clone(),
            url,
        })
    }

    fn parse(&self, body: &[u8]) -> Result<Game> {
        let html = body_text(body, &self.match_id);
        let scripts = ScriptBlocks::parse(&html, &self.match_id)?;

        let info: RawMatchInfo = scripts.decode(MATCH_INFO)?;
        let rosters: RawRosters = scripts.decode(ROSTERS)?;
        let shots: RawShots = scripts.decode(SHOTS)?;

        Loader::new(&self.match_id, self.options, info, rosters)?.game(shots)
    }
}

// ── Loader ───────────────────────────────────────────────────────

struct Loader {
    match_id: String,
    options: NormalizeOptions,
    header: GameHeader,
    teams: Teams,
    roster: Roster,
    home_pitch: Arc<Pitch>,
    away_pitch: Arc<Pitch>,
}

impl Loader {
    fn new(
        match_id: &str,
        options: NormalizeOptions,
        info: RawMatchInfo,
        rosters: RawRosters,
    ) -> Result<Self> {
        let datetime = parse_date(&info.date)
            .ok_or_else(|| PitchsideError::format(match_id, "match_info.date", &info.date))?;

        let teams = Teams::new(
            Team::new(info.home_id, info.team_h),
            Team::new(info.away_id, info.team_a),
        );

        let mut roster = Roster::new();
        for (side, entries) in [(Side::Home, rosters.h), (Side::Away, rosters.a)] {
            for entry in entries.into_values() {
                roster.insert(
                    side,
                    Player::new(entry.player_id, entry.player, entry.position),
                );
            }
        }

        Ok(Self {
            match_id: match_id.to_string(),
            options,
            header: GameHeader {
                id: info.id,
                datetime,
                competition: Competition::new(info.league_id, info.league),
            },
            teams,
            roster,
            home_pitch: Arc::new(Pitch::unit()),
            away_pitch: Arc::new(Pitch::unit().with_length_direction(Direction::Left)),
        })
    }

    fn pitch(&self, side: Side) -> &Arc<Pitch> {
        match side {
            Side::Home => &self.home_pitch,
            Side::Away => &self.away_pitch,
        }
    }

    fn game(self, shots: RawShots) -> Result<Game> {
        let mut assembler = GameAssembler::new(&self.match_id, self.options.shot_error_policy);
        for (listed_side, raw_shots) in [(Side::Home, &shots.h), (Side::Away, &shots.a)] {
            for raw in raw_shots {
                assembler.record(&raw.id, self.shot(listed_side, raw))?;
            }
        }

        debug!(
            match_id = %self.match_id,
            home_shots = shots.h.len(),
            away_shots = shots.a.len(),
            "understat shots normalized"
        );
        assembler.finish(self.header, &self.teams, &self.roster)
    }

    fn shot(&self, listed_side: Side, raw: &RawShot) -> Result<Shot> {
        let side = match raw.h_a.as_deref() {
            None => listed_side,
            Some("h") => Side::Home,
            Some("a") => Side::Away,
            Some(other) => {
                return Err(PitchsideError::Reference {
                    match_id: self.match_id.clone(),
                    kind: "team side",
                    id: other.to_string(),
                })
            }
        };
        let pitch = self.pitch(side);
        let seconds = period::seconds_from_minute(raw.minute);
        let (end_location, end_location_source) = coordinates::sentinel(pitch);

        Ok(Shot {
            id: raw.id.clone(),
            event_type: EventType::Shot,
            period: period::infer_period(seconds, self.options.half_length_minutes),
            seconds,
            team: Arc::clone(self.teams.get(side)),
            player: Arc::clone(self.roster.find(&raw.player_id, &self.match_id)?),
            location: coordinates::normalize(raw.x, raw.y, None, pitch),
            end_location,
            end_location_source,
            pattern: SHOT_PATTERNS.translate(raw.situation.as_deref(), &self.match_id)?,
            body_part: BODY_PARTS.translate(raw.shot_type.as_deref(), &self.match_id)?,
            result: SHOT_RESULTS.translate(Some(&raw.result), &self.match_id)?,
        })
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
