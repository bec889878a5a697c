//! Read-only access to the reporting views and functions.

use arena_core::pagination::{Page, Pagination};
use arena_core::query::{ListQuery, ListSource, Predicates};
use arena_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres};

use crate::bind::to_arguments;
use crate::models::report::{ActiveRoster, MatchResult, PlayerCareer, TournamentStanding};

const ACTIVE_ROSTERS: ListSource<'static> = ListSource {
    table: "v_active_rosters",
    columns: "team_id, team_name, tag, player_id, nickname, country_code, role, join_date",
    order_by: "team_name ASC, nickname ASC, player_id ASC",
};

const MATCH_RESULTS: ListSource<'static> = ListSource {
    table: "v_match_results",
    columns: "match_id, tournament_id, start_time, stage, format, winner_team_id, \
              games_played, total_score_team1, total_score_team2",
    order_by: "start_time DESC, match_id DESC",
};

const PLAYER_CAREER: ListSource<'static> = ListSource {
    table: "v_player_career_stats",
    columns: "player_id, nickname, kills, deaths, assists, damage, gold, kda",
    order_by: "kda DESC, kills DESC, player_id ASC",
};

pub struct ReportRepo;

impl ReportRepo {
    /// Current roster entries (no leave date) across all teams.
    pub async fn active_rosters(
        pool: &PgPool,
        page: Pagination,
    ) -> Result<Page<ActiveRoster>, sqlx::Error> {
        paged(pool, ACTIVE_ROSTERS, &Predicates::new(), page).await
    }

    /// Series results with per-map aggregates, optionally for one tournament.
    pub async fn match_results(
        pool: &PgPool,
        predicates: &Predicates,
        page: Pagination,
    ) -> Result<Page<MatchResult>, sqlx::Error> {
        paged(pool, MATCH_RESULTS, predicates, page).await
    }

    /// Lifetime totals per player.
    pub async fn player_career(
        pool: &PgPool,
        predicates: &Predicates,
        page: Pagination,
    ) -> Result<Page<PlayerCareer>, sqlx::Error> {
        paged(pool, PLAYER_CAREER, predicates, page).await
    }

    pub async fn tournament_standings(
        pool: &PgPool,
        tournament_id: DbId,
    ) -> Result<Vec<TournamentStanding>, sqlx::Error> {
        sqlx::query_as::<_, TournamentStanding>(
            "SELECT team_id, matches_played, wins, losses, forfeits \
             FROM fn_tournament_standings($1)",
        )
        .bind(tournament_id)
        .fetch_all(pool)
        .await
    }

    /// Lifetime KDA for one player; 0 when they have no recorded games.
    pub async fn player_kda(pool: &PgPool, player_id: DbId) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>("SELECT fn_player_kda($1)")
            .bind(player_id)
            .fetch_one(pool)
            .await
    }
}

async fn paged<T>(
    pool: &PgPool,
    source: ListSource<'_>,
    predicates: &Predicates,
    page: Pagination,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let q = ListQuery::build(source, predicates, page);

    let count_args = to_arguments(&q.count.args)?;
    let total = sqlx::query_scalar_with::<Postgres, i64, _>(&q.count.sql, count_args)
        .fetch_one(pool)
        .await?;
    let select_args = to_arguments(&q.select.args)?;
    let items = sqlx::query_as_with::<Postgres, T, _>(&q.select.sql, select_args)
        .fetch_all(pool)
        .await?;

    Ok(Page { items, total })
}
