use pitchside::domain::{BodyPart, Competition, EndLocationSource, Period, ShotPattern, ShotResult, Side};
use pitchside::{Fotmob, Game, NormalizeOptions, PitchsideError, Provider, ShotErrorPolicy};
use serde_json::Value;
use std::sync::Arc;

const FIXTURE: &str = "tests/data/fotmob/match-4193490.json";

fn response() -> Vec<u8> {
    std::fs::read(FIXTURE).expect("fixture json")
}

fn game() -> Game {
    Fotmob::new("4193490", NormalizeOptions::default())
        .parse(&response())
        .expect("parse fixture")
}

#[test]
fn request_carries_match_id_query() {
    let request = Fotmob::new("4193490", NormalizeOptions::default())
        .request()
        .unwrap();
    assert_eq!(
        request.url.as_str(),
        "https://www.fotmob.com/api/matchDetails?matchId=4193490"
    );
}

#[test]
fn competition_from_numeric_league_id() {
    assert_eq!(game().competition, Competition::new("47", "Premier League"));
}

#[test]
fn teams_and_flattened_lineups() {
    let game = game();
    assert_eq!(game.id, "4193490");
    assert_eq!(game.home_team.id, "8191");
    assert_eq!(game.away_team.name, "Manchester City");
    assert_eq!(game.datetime.to_rfc3339(), "2023-08-11T19:00:00+00:00");

    // Josh Cullen is both a starter and on the bench; the bench row wins
    assert_eq!(game.home_players.len(), 12);
    assert_eq!(game.away_players.len(), 13);
    let cullen = game.home_players.iter().find(|p| p.id == "1229651").unwrap();
    assert_eq!(cullen.position, "Sub");
}

#[test]
fn rosters_keep_lineup_order() {
    let game = game();
    let home: Vec<&str> = game.home_players.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        home,
        vec![
            "836586", "531376", "766592", "671529", "245163", "1022154", "1229651", "1099574",
            "1172296", "1099531", "1082209", "68153",
        ]
    );
    assert_eq!(game.home_players[0].position, "Keeper");
    // the bench row replaces Cullen in his starting slot
    assert_eq!(game.home_players[6].position, "Sub");

    assert_eq!(game.away_players[0].name, "Ederson");
    assert_eq!(game.away_players.last().unwrap().id, "954044");
}

#[test]
fn shots_sorted_and_complete() {
    let game = game();
    assert_eq!(game.events.len(), 8);
    assert!(game.is_chronological());

    let order: Vec<&str> = game.events.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "2588740002",
            "2588740003",
            "2588740005",
            "2588740001",
            "2588740004",
            "2588740008",
            "2588740006",
            "2588740007",
        ]
    );
}

#[test]
fn shots_resolve_to_match_teams() {
    let game = game();
    for shot in &game.events {
        let side = game.side_of(&shot.team).expect("shot team is a match team");
        assert!(game.players(side).iter().any(|p| Arc::ptr_eq(p, &shot.player)));
    }
    assert_eq!(game.score(Side::Away), 3);
    assert_eq!(game.score(Side::Home), 0);
}

#[test]
fn vocabulary_and_flags() {
    let game = game();
    let by_id = |id: &str| game.events.iter().find(|s| s.id == id).unwrap();

    let header = by_id("2588740003");
    assert_eq!(header.body_part, BodyPart::Head);
    assert_eq!(header.pattern, ShotPattern::OpenPlay);

    let free_kick = by_id("2588740005");
    assert_eq!(free_kick.pattern, ShotPattern::Freekick);
    assert_eq!(free_kick.result, ShotResult::Blocked);
    assert_eq!(free_kick.end_location_source, EndLocationSource::Sentinel);

    let post = by_id("2588740007");
    assert_eq!(post.result, ShotResult::Missed);
    assert_eq!(post.body_part, BodyPart::Other);
    assert_eq!(post.period, Period::SecondHalf);

    assert_eq!(by_id("2588740002").result, ShotResult::Saved);
    assert_eq!(by_id("2588740004").period, Period::FirstHalf);
}

#[test]
fn goal_crossing_end_location() {
    let game = game();
    let goal = game.events.iter().find(|s| s.id == "2588740001").unwrap();
    assert_eq!(goal.end_location_source, EndLocationSource::GoalCrossing);
    assert_eq!(goal.end_location.x, 105.0);
    assert_eq!(goal.end_location.y, 35.9);
    assert_eq!(goal.end_location.z, Some(0.6));
    assert!(Arc::ptr_eq(&goal.location.pitch, &goal.end_location.pitch));
    assert_eq!(goal.location.pitch.width, 68.0);
}

#[test]
fn parsing_is_idempotent() {
    assert_eq!(game(), game());
}

fn with_first_event_type(event_type: &str) -> Vec<u8> {
    let mut doc: Value = serde_json::from_slice(&response()).unwrap();
    doc["content"]["shotmap"]["shots"][0]["eventType"] = Value::from(event_type);
    serde_json::to_vec(&doc).unwrap()
}

#[test]
fn unmapped_result_is_mapping_error() {
    let body = with_first_event_type("Woodwork");
    let err = Fotmob::new("4193490", NormalizeOptions::default())
        .parse(&body)
        .unwrap_err();
    match err {
        PitchsideError::Mapping { match_id, table, code } => {
            assert_eq!(match_id, "4193490");
            assert_eq!(table, "shot result");
            assert_eq!(code, "Woodwork");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn skip_policy_drops_only_the_bad_shot() {
    let body = with_first_event_type("Woodwork");
    let options = NormalizeOptions {
        shot_error_policy: ShotErrorPolicy::Skip,
        ..NormalizeOptions::default()
    };
    let game = Fotmob::new("4193490", options).parse(&body).unwrap();
    assert_eq!(game.events.len(), 7);
    assert_eq!(game.skipped.len(), 1);
    assert_eq!(game.skipped[0].shot_id, "2588740001");
    assert!(game.events.iter().all(|s| s.id != "2588740001"));
}

#[test]
fn non_json_body_is_format_error() {
    let err = Fotmob::new("4193490", NormalizeOptions::default())
        .parse(b"<html>rate limited</html>")
        .unwrap_err();
    assert!(matches!(err, PitchsideError::Format { .. }));
    assert_eq!(err.match_id(), Some("4193490"));
}
