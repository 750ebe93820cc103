//! FotMob match-details API.
//!
//! One JSON document per match. Coordinates are metres on a 105 x 68 pitch
//! whose width axis runs downwards; shots carry the point where the ball
//! crossed the goal line when it got that far.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::{de, join_url, Provider, ProviderKind, ProviderRequest};
use crate::assemble::{GameAssembler, GameHeader};
use crate::domain::{
    BodyPart, Competition, Direction, EventType, Game, Period, Pitch, Player, Shot, ShotPattern,
    ShotResult, Side, Team,
};
use crate::error::{PitchsideError, Result};
use crate::extract::decode_json;
use crate::normalize::{coordinates, period, NormalizeOptions, Roster, Teams, VocabTable};

pub const BASE_URL: &str = "https://www.fotmob.com/api";

const PITCH_LENGTH: f64 = 105.0;
const PITCH_WIDTH: f64 = 68.0;

pub static PERIODS: VocabTable<Period> = VocabTable::strict(
    "period",
    &[
        ("FirstHalf", Period::FirstHalf),
        ("SecondHalf", Period::SecondHalf),
        ("FirstExtraHalf", Period::FirstExtra),
        ("SecondExtraHalf", Period::SecondExtra),
        ("PenaltyShootout", Period::PenaltyShootout),
    ],
);

pub static SHOT_PATTERNS: VocabTable<ShotPattern> = VocabTable::with_default(
    "shot pattern",
    &[
        ("RegularPlay", ShotPattern::OpenPlay),
        ("FreeKick", ShotPattern::Freekick),
        ("Penalty", ShotPattern::Penalty),
    ],
    ShotPattern::OpenPlay,
);

pub static SHOT_RESULTS: VocabTable<ShotResult> = VocabTable::strict(
    "shot result",
    &[
        ("Miss", ShotResult::Missed),
        ("Post", ShotResult::Missed),
        ("AttemptSaved", ShotResult::Saved),
        ("Goal", ShotResult::Goal),
    ],
);

pub static BODY_PARTS: VocabTable<BodyPart> = VocabTable::with_default(
    "body part",
    &[
        ("RightFoot", BodyPart::RightFoot),
        ("Header", BodyPart::Head),
        ("LeftFoot", BodyPart::LeftFoot),
        ("OtherBodyPart", BodyPart::Other),
    ],
    BodyPart::Unknown,
);

// ── FotMob JSON deserialization structs ──────────────────────────

#[derive(Debug, Deserialize)]
struct RawMatchDetails {
    general: RawGeneral,
    lineup: RawLineupSection,
    content: RawContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeneral {
    #[serde(deserialize_with = "de::id_string")]
    match_id: String,
    #[serde(rename = "matchTimeUTCDate")]
    match_time_utc_date: String,
    #[serde(deserialize_with = "de::id_string")]
    league_id: String,
    league_name: String,
    home_team: RawTeam,
    away_team: RawTeam,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    #[serde(deserialize_with = "de::id_string")]
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawLineupSection {
    lineup: Vec<RawLineup>,
}

#[derive(Debug, Deserialize)]
struct RawLineup {
    /// Starters grouped by formation line
    #[serde(default)]
    players: Vec<Vec<RawPlayer>>,
    #[serde(default)]
    bench: Vec<RawPlayer>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(deserialize_with = "de::id_string")]
    id: String,
    name: RawPlayerName,
    #[serde(default, deserialize_with = "de::opt_string")]
    position: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayerName {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    shotmap: RawShotmap,
}

#[derive(Debug, Deserialize)]
struct RawShotmap {
    #[serde(default)]
    shots: Vec<RawShot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShot {
    #[serde(deserialize_with = "de::id_string")]
    id: String,
    event_type: String,
    #[serde(deserialize_with = "de::id_string")]
    team_id: String,
    #[serde(deserialize_with = "de::id_string")]
    player_id: String,
    x: f64,
    y: f64,
    #[serde(deserialize_with = "de::minute")]
    min: u32,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    situation: Option<String>,
    #[serde(default)]
    shot_type: Option<String>,
    #[serde(default)]
    goal_crossed_y: Option<f64>,
    #[serde(default)]
    goal_crossed_z: Option<f64>,
    #[serde(default)]
    is_blocked: bool,
    #[serde(default)]
    is_own_goal: bool,
}

// ── Provider ─────────────────────────────────────────────────────

/// FotMob match-details pipeline
#[derive(Debug, Clone)]
pub struct Fotmob {
    match_id: String,
    base_url: String,
    options: NormalizeOptions,
}

impl Fotmob {
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

impl Provider for Fotmob {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Fotmob
    }

    fn match_id(&self) -> &str {
        &self.match_id
    }

    fn request(&self) -> Result<ProviderRequest> {
        let mut url = join_url(&self.base_url, "matchDetails")
            .map_err(|e| PitchsideError::Validation(format!("bad fotmob url: {e}")))?;
        url.query_pairs_mut().append_pair("matchId", &self.match_id);
        Ok(ProviderRequest {
            kind: self.kind(),
            match_id: self.match_id.clone(),
            url,
        })
    }

    fn parse(&self, body: &[u8]) -> Result<Game> {
        let details: RawMatchDetails = decode_json(body, &self.match_id, "matchDetails")?;
        let RawMatchDetails {
            general,
            lineup,
            content,
        } = details;

        Loader::new(&self.match_id, self.options, general, lineup)?.game(content.shotmap.shots)
    }
}

// ── Loader ───────────────────────────────────────────────────────

struct Loader {
    match_id: String,
    options: NormalizeOptions,
    header: GameHeader,
    teams: Teams,
    roster: Roster,
    pitch: Arc<Pitch>,
}

impl Loader {
    fn new(
        match_id: &str,
        options: NormalizeOptions,
        general: RawGeneral,
        lineup: RawLineupSection,
    ) -> Result<Self> {
        let datetime = DateTime::parse_from_rfc3339(general.match_time_utc_date.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| PitchsideError::format(match_id, "general.matchTimeUTCDate", e))?;

        let mut lineups = lineup.lineup.into_iter();
        let (Some(home), Some(away)) = (lineups.next(), lineups.next()) else {
            return Err(PitchsideError::format(
                match_id,
                "lineup.lineup",
                "expected one lineup per team",
            ));
        };

        let mut roster = Roster::new();
        for (side, lineup) in [(Side::Home, home), (Side::Away, away)] {
            let starters = lineup.players.into_iter().flatten();
            for player in starters.chain(lineup.bench) {
                roster.insert(
                    side,
                    Player::new(
                        player.id,
                        player.name.full_name,
                        player.position.unwrap_or_default(),
                    ),
                );
            }
        }

        Ok(Self {
            match_id: match_id.to_string(),
            options,
            header: GameHeader {
                id: general.match_id,
                datetime,
                competition: Competition::new(general.league_id, general.league_name),
            },
            teams: Teams::new(
                Team::new(general.home_team.id, general.home_team.name),
                Team::new(general.away_team.id, general.away_team.name),
            ),
            roster,
            pitch: Arc::new(
                Pitch::new(PITCH_LENGTH, PITCH_WIDTH).with_width_direction(Direction::Down),
            ),
        })
    }

    fn game(self, shots: Vec<RawShot>) -> Result<Game> {
        let mut assembler = GameAssembler::new(&self.match_id, self.options.shot_error_policy);
        for raw in &shots {
            assembler.record(&raw.id, self.shot(raw))?;
        }

        debug!(match_id = %self.match_id, shots = shots.len(), "fotmob shots normalized");
        assembler.finish(self.header, &self.teams, &self.roster)
    }

    fn shot(&self, raw: &RawShot) -> Result<Shot> {
        let seconds = period::seconds_from_minute(raw.min);
        let period = match raw.period.as_deref() {
            Some(code) => PERIODS.translate(Some(code), &self.match_id)?,
            None => period::infer_period(seconds, self.options.half_length_minutes),
        };
        let (end_location, end_location_source) =
            coordinates::end_location(raw.goal_crossed_y, raw.goal_crossed_z, &self.pitch);

        Ok(Shot {
            id: raw.id.clone(),
            event_type: EventType::Shot,
            period,
            seconds,
            team: Arc::clone(self.teams.resolve(&raw.team_id, &self.match_id)?),
            player: Arc::clone(self.roster.find(&raw.player_id, &self.match_id)?),
            location: coordinates::normalize(raw.x, raw.y, None, &self.pitch),
            end_location,
            end_location_source,
            pattern: SHOT_PATTERNS.translate(raw.situation.as_deref(), &self.match_id)?,
            body_part: BODY_PARTS.translate(raw.shot_type.as_deref(), &self.match_id)?,
            result: self.result(raw)?,
        })
    }

    /// Event type refined by the own-goal and blocked flags
    fn result(&self, raw: &RawShot) -> Result<ShotResult> {
        let base = SHOT_RESULTS.translate(Some(&raw.event_type), &self.match_id)?;
        Ok(if raw.is_own_goal {
            ShotResult::OwnGoal
        } else if raw.is_blocked && base != ShotResult::Goal {
            ShotResult::Blocked
        } else {
            base
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EndLocationSource;
    use crate::normalize::ShotErrorPolicy;
    use serde_json::{json, Value};

    fn details(shots: Value) -> Value {
        json!({
            "general": {
                "matchId": 4193490,
                "matchTimeUTCDate": "2023-08-11T19:00:00.000Z",
                "leagueId": 47,
                "leagueName": "Premier League",
                "homeTeam": {"id": 8191, "name": "Burnley"},
                "awayTeam": {"id": 8456, "name": "Manchester City"}
            },
            "lineup": {
                "lineup": [
                    {
                        "players": [
                            [{"id": 1, "name": {"fullName": "James Trafford"}, "position": "Keeper"}],
                            [{"id": 2, "name": {"fullName": "Lyle Foster"}, "position": "Attacker"}]
                        ],
                        "bench": [{"id": 3, "name": {"fullName": "Jay Rodriguez"}, "position": 3}]
                    },
                    {
                        "players": [[{"id": 10, "name": {"fullName": "Erling Haaland"}, "position": "Attacker"}]],
                        "bench": [{"id": 11, "name": {"fullName": "Julian Alvarez"}}]
                    }
                ]
            },
            "content": {"shotmap": {"shots": shots}}
        })
    }

    fn raw_shot(id: u64, min: u32, team: u64, player: u64, event: &str) -> Value {
        json!({
            "id": id, "eventType": event, "teamId": team, "playerId": player,
            "x": 94.2, "y": 30.1, "min": min, "period": "FirstHalf",
            "situation": "RegularPlay", "shotType": "LeftFoot",
            "goalCrossedY": 35.2, "goalCrossedZ": 0.8,
            "isBlocked": false, "isOwnGoal": false
        })
    }

    fn parse(shots: Value, policy: ShotErrorPolicy) -> Result<Game> {
        let options = NormalizeOptions {
            shot_error_policy: policy,
            ..NormalizeOptions::default()
        };
        let body = serde_json::to_vec(&details(shots)).unwrap();
        Fotmob::new("4193490", options).parse(&body)
    }

    #[test]
    fn test_request_url() {
        let request = Fotmob::new("4193490", NormalizeOptions::default()).request().unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://www.fotmob.com/api/matchDetails?matchId=4193490"
        );
    }

    #[test]
    fn test_header_teams_and_rosters() {
        let game = parse(json!([]), ShotErrorPolicy::Abort).unwrap();
        assert_eq!(game.id, "4193490");
        assert_eq!(game.competition, Competition::new("47", "Premier League"));
        assert_eq!(*game.home_team, Team::new("8191", "Burnley"));
        assert_eq!(game.away_team.id, "8456");
        assert_eq!(game.home_players.len(), 3);
        assert_eq!(game.away_players.len(), 2);
        let bench = game.home_players.iter().find(|p| p.id == "3").unwrap();
        assert_eq!(bench.position, "3");
        let no_position = game.away_players.iter().find(|p| p.id == "11").unwrap();
        assert_eq!(no_position.position, "");
    }

    #[test]
    fn test_shot_translation() {
        let game = parse(json!([raw_shot(1, 30, 8456, 10, "Goal")]), ShotErrorPolicy::Abort).unwrap();
        let shot = &game.events[0];
        assert_eq!(shot.seconds, 1800);
        assert_eq!(shot.period, Period::FirstHalf);
        assert_eq!(shot.result, ShotResult::Goal);
        assert_eq!(shot.body_part, BodyPart::LeftFoot);
        assert_eq!(shot.pattern, ShotPattern::OpenPlay);
        assert!(Arc::ptr_eq(&shot.team, &game.away_team));
        assert_eq!(shot.player.name, "Erling Haaland");
        assert_eq!(shot.end_location_source, EndLocationSource::GoalCrossing);
        assert_eq!(shot.end_location.x, 105.0);
        assert_eq!(shot.end_location.z, Some(0.8));
        assert_eq!(shot.location.pitch.width_direction, Direction::Down);
    }

    #[test]
    fn test_blocked_and_own_goal_flags() {
        let mut blocked = raw_shot(1, 10, 8191, 2, "AttemptSaved");
        blocked["isBlocked"] = json!(true);
        blocked["goalCrossedY"] = Value::Null;
        let mut own_goal = raw_shot(2, 20, 8456, 10, "Goal");
        own_goal["isOwnGoal"] = json!(true);

        let game = parse(json!([own_goal, blocked]), ShotErrorPolicy::Abort).unwrap();
        assert_eq!(game.events[0].result, ShotResult::Blocked);
        assert_eq!(game.events[0].end_location_source, EndLocationSource::Sentinel);
        assert_eq!(game.events[1].result, ShotResult::OwnGoal);
    }

    #[test]
    fn test_missing_period_uses_threshold() {
        let mut late = raw_shot(1, 46, 8191, 2, "Miss");
        late.as_object_mut().unwrap().remove("period");
        let game = parse(json!([late]), ShotErrorPolicy::Abort).unwrap();
        assert_eq!(game.events[0].period, Period::SecondHalf);
    }

    #[test]
    fn test_unknown_period_is_mapping_error() {
        let mut shot = raw_shot(1, 46, 8191, 2, "Miss");
        shot["period"] = json!("HalfTime");
        let err = parse(json!([shot]), ShotErrorPolicy::Abort).unwrap_err();
        assert!(matches!(err, PitchsideError::Mapping { table: "period", .. }));
    }

    #[test]
    fn test_unknown_team_is_reference_error() {
        let err = parse(json!([raw_shot(1, 5, 9999, 2, "Miss")]), ShotErrorPolicy::Abort).unwrap_err();
        match err {
            PitchsideError::Reference { match_id, kind, id } => {
                assert_eq!(match_id, "4193490");
                assert_eq!(kind, "team");
                assert_eq!(id, "9999");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unmapped_result_never_defaults() {
        let shots = json!([raw_shot(1, 5, 8191, 2, "Miss"), raw_shot(2, 6, 8191, 2, "Woodwork")]);
        let err = parse(shots.clone(), ShotErrorPolicy::Abort).unwrap_err();
        assert!(err.to_string().contains("Woodwork"));

        let game = parse(shots, ShotErrorPolicy::Skip).unwrap();
        assert_eq!(game.events.len(), 1);
        assert_eq!(game.skipped[0].shot_id, "2");
    }

    #[test]
    fn test_single_lineup_is_format_error() {
        let mut doc = details(json!([]));
        doc["lineup"]["lineup"].as_array_mut().unwrap().pop();
        let body = serde_json::to_vec(&doc).unwrap();
        let err = Fotmob::new("4193490", NormalizeOptions::default())
            .parse(&body)
            .unwrap_err();
        assert!(matches!(err, PitchsideError::Format { .. }));
    }
}
