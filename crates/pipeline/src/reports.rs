//! Paged access to the reporting views.

use arena_core::pagination::Page;
use arena_core::types::DbId;
use arena_db::models::report::{
    ActiveRoster, MatchResult, MatchResultFilter, PlayerCareer, PlayerCareerFilter, ReportPage,
    TournamentStanding,
};
use arena_db::repositories::ReportRepo;
use arena_db::DataResult;
use sqlx::PgPool;

/// Normalizes paging before delegating to [`ReportRepo`].
#[derive(Debug, Clone)]
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn active_rosters(&self, page: &ReportPage) -> DataResult<Page<ActiveRoster>> {
        let page = page.pagination().normalized();
        Ok(ReportRepo::active_rosters(&self.pool, page).await?)
    }

    pub async fn match_results(&self, filter: &MatchResultFilter) -> DataResult<Page<MatchResult>> {
        let page = filter.pagination().normalized();
        Ok(ReportRepo::match_results(&self.pool, &filter.predicates(), page).await?)
    }

    pub async fn player_career(&self, filter: &PlayerCareerFilter) -> DataResult<Page<PlayerCareer>> {
        let page = filter.pagination().normalized();
        Ok(ReportRepo::player_career(&self.pool, &filter.predicates(), page).await?)
    }

    pub async fn tournament_standings(
        &self,
        tournament_id: DbId,
    ) -> DataResult<Vec<TournamentStanding>> {
        Ok(ReportRepo::tournament_standings(&self.pool, tournament_id).await?)
    }

    pub async fn player_kda(&self, player_id: DbId) -> DataResult<f64> {
        Ok(ReportRepo::player_kda(&self.pool, player_id).await?)
    }
}
