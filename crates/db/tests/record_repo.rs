//! Integration tests for the generic record repository.
//!
//! Exercises create / find / list / update / delete against a real database,
//! including server-assigned columns and the generated KDA column.

use arena_core::error::{CoreError, FailureKind};
use arena_core::pagination::Pagination;
use arena_db::models::discipline::{Discipline, DisciplineFilter};
use arena_db::models::game_player_stat::GamePlayerStat;
use arena_db::models::import_error::NewImportError;
use arena_db::models::match_game::MatchGame;
use arena_db::models::matches::Match;
use arena_db::models::player::Player;
use arena_db::models::team::{Team, TeamFilter};
use arena_db::models::team_profile::TeamProfile;
use arena_db::models::tournament::Tournament;
use arena_db::repositories::{ImportErrorRepo, RecordRepo, ReportRepo};
use arena_db::DataError;
use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_discipline(code: &str, name: &str) -> Discipline {
    Discipline {
        id: 0,
        code: code.to_string(),
        name: name.to_string(),
        description: String::new(),
        icon_url: None,
        team_size: Some(5),
        is_active: true,
        metadata: json!({}),
    }
}

fn new_team(discipline_id: i64, name: &str, tag: &str, verified: bool) -> Team {
    Team {
        id: 0,
        name: name.to_string(),
        tag: tag.to_string(),
        country_code: "UA".to_string(),
        discipline_id,
        created_at: None,
        logo_url: None,
        world_ranking: 0.0,
        is_verified: verified,
    }
}

fn new_player(nickname: &str) -> Player {
    Player {
        id: 0,
        nickname: nickname.to_string(),
        real_name: None,
        country_code: None,
        birth_date: None,
        steam_id: None,
        avatar_url: None,
        mmr_rating: 0.0,
        is_retired: false,
        created_at: None,
    }
}

async fn seed_discipline(pool: &PgPool) -> Discipline {
    RecordRepo::create(pool, &new_discipline("dota2", "Dota 2"))
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_server_columns(pool: PgPool) {
    let discipline = seed_discipline(&pool).await;
    assert!(discipline.id > 0);

    let team = RecordRepo::create(&pool, &new_team(discipline.id, "Natus Vincere", "NAVI", true))
        .await
        .unwrap();
    assert!(team.id > 0);
    assert!(team.created_at.is_some());

    let found: Team = RecordRepo::find_by_id(&pool, team.id).await.unwrap();
    assert_eq!(found, team);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_rows_are_not_found(pool: PgPool) {
    let err = RecordRepo::find_by_id::<Player>(&pool, 999).await.unwrap_err();
    assert_matches!(
        err,
        DataError::Core(CoreError::NotFound { entity: "player", id: 999 })
    );
    assert_eq!(err.to_string(), "player with id 999 not found");

    let err = RecordRepo::update(&pool, 999, &new_player("ghost"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);

    let err = RecordRepo::delete::<Player>(&pool, 999).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_counts_all_matches_but_pages_items(pool: PgPool) {
    let discipline = seed_discipline(&pool).await;
    for (name, tag, verified) in [
        ("Team Spirit", "TS", true),
        ("Team Liquid", "TL", true),
        ("Tundra", "TUN", false),
    ] {
        RecordRepo::create(&pool, &new_team(discipline.id, name, tag, verified))
            .await
            .unwrap();
    }

    let filter = TeamFilter {
        search: Some("team".into()),
        is_verified: Some(true),
        ..Default::default()
    };
    let page = RecordRepo::list::<Team>(&pool, &filter, Pagination::new(1, 0))
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Team Liquid");

    let none = RecordRepo::list::<Discipline>(
        &pool,
        &DisciplineFilter {
            search: Some("nothing-like-this".into()),
            ..Default::default()
        },
        Pagination::default(),
    )
    .await
    .unwrap();
    assert_eq!(none.total, 0);
    assert!(none.items.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete(pool: PgPool) {
    let mut player = RecordRepo::create(&pool, &new_player("s1mple")).await.unwrap();
    player.mmr_rating = 9000.0;
    player.real_name = Some("Oleksandr".into());

    let updated = RecordRepo::update(&pool, player.id, &player).await.unwrap();
    assert_eq!(updated.mmr_rating, 9000.0);
    assert_eq!(updated.created_at, player.created_at);

    RecordRepo::delete::<Player>(&pool, player.id).await.unwrap();
    assert!(RecordRepo::find_by_id::<Player>(&pool, player.id).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_profile_is_keyed_by_team(pool: PgPool) {
    let discipline = seed_discipline(&pool).await;
    let team = RecordRepo::create(&pool, &new_team(discipline.id, "OG", "OG", true))
        .await
        .unwrap();

    let profile = TeamProfile {
        team_id: team.id,
        coach_name: Some("n0tail".into()),
        sponsor_info: None,
        headquarters: Some("Copenhagen".into()),
        website: None,
        contact_email: None,
    };
    RecordRepo::create(&pool, &profile).await.unwrap();

    let found: TeamProfile = RecordRepo::find_by_id(&pool, team.id).await.unwrap();
    assert_eq!(found, profile);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_kda_ratio_is_generated(pool: PgPool) {
    let discipline = seed_discipline(&pool).await;
    let team1 = RecordRepo::create(&pool, &new_team(discipline.id, "A", "A", false))
        .await
        .unwrap();
    let team2 = RecordRepo::create(&pool, &new_team(discipline.id, "B", "B", false))
        .await
        .unwrap();
    let tournament = RecordRepo::create(
        &pool,
        &Tournament {
            id: 0,
            discipline_id: discipline.id,
            name: "Major".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            prize_pool: 1_000_000.0,
            currency: "USD".into(),
            status: "Announced".into(),
            is_online: false,
            bracket_config: json!({}),
        },
    )
    .await
    .unwrap();
    let series = RecordRepo::create(
        &pool,
        &Match {
            id: 0,
            tournament_id: tournament.id,
            team1_id: Some(team1.id),
            team2_id: Some(team2.id),
            start_time: Some(Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()),
            format: "bo3".into(),
            stage: Some("Groups".into()),
            winner_team_id: Some(team1.id),
            is_forfeit: false,
            match_notes: None,
        },
    )
    .await
    .unwrap();
    let game = RecordRepo::create(
        &pool,
        &MatchGame {
            id: 0,
            match_id: series.id,
            map_name: "Mirage".into(),
            game_number: 1,
            duration_seconds: Some(2400),
            winner_team_id: Some(team1.id),
            score_team1: Some(16),
            score_team2: Some(10),
            started_at: None,
            had_technical_pause: false,
            pick_ban_phase: json!({}),
        },
    )
    .await
    .unwrap();
    let player = RecordRepo::create(&pool, &new_player("zywoo")).await.unwrap();

    let stat = RecordRepo::create(
        &pool,
        &GamePlayerStat {
            id: 0,
            game_id: game.id,
            player_id: player.id,
            team_id: Some(team1.id),
            kills: 10,
            deaths: 0,
            assists: 5,
            hero_name: None,
            damage_dealt: 3000,
            gold_earned: 0,
            kda_ratio: None,
            was_mvp: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(stat.kda_ratio, Some(15.0));

    assert_eq!(ReportRepo::player_kda(&pool, player.id).await.unwrap(), 15.0);

    let standings = ReportRepo::tournament_standings(&pool, tournament.id)
        .await
        .unwrap();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].team_id, team1.id);
    assert_eq!(standings[0].wins, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_errors_append(pool: PgPool) {
    let entry = NewImportError {
        source: "players_csv".into(),
        row_data: json!({"nickname": ""}),
        error_message: "nickname is required".into(),
    };
    ImportErrorRepo::append(&pool, &entry).await.unwrap();

    let rows = ImportErrorRepo::list_by_source(&pool, "players_csv")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].row_data, json!({"nickname": ""}));
    assert_eq!(rows[0].error_message, "nickname is required");
}
