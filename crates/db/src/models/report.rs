//! Read models for the reporting views and functions.

use arena_core::pagination::Pagination;
use arena_core::query::Predicates;
use arena_core::types::{Date, DbId, Timestamp};
use arena_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `v_active_rosters`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActiveRoster {
    pub team_id: DbId,
    pub team_name: String,
    pub tag: String,
    pub player_id: DbId,
    pub nickname: String,
    pub country_code: Option<String>,
    pub role: String,
    pub join_date: Date,
}

/// A row from `v_match_results`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MatchResult {
    pub match_id: DbId,
    pub tournament_id: DbId,
    pub start_time: Timestamp,
    pub stage: Option<String>,
    pub format: String,
    pub winner_team_id: Option<DbId>,
    pub games_played: i64,
    pub total_score_team1: Option<i64>,
    pub total_score_team2: Option<i64>,
}

/// A row from `v_player_career_stats`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerCareer {
    pub player_id: DbId,
    pub nickname: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub damage: i64,
    pub gold: i64,
    pub kda: f64,
}

/// A row returned by `fn_tournament_standings`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TournamentStanding {
    pub team_id: DbId,
    pub matches_played: i64,
    pub wins: i64,
    pub losses: i64,
    pub forfeits: i64,
}

/// Paging for reports that take no predicates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportPage {
    pub limit: i64,
    pub offset: i64,
}

impl ReportPage {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchResultFilter {
    pub tournament_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

impl MatchResultFilter {
    pub fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(id) = self.tournament_id {
            p.eq("tournament_id", id);
        }
        p
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerCareerFilter {
    /// Partial match on nickname.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl PlayerCareerFilter {
    pub fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(term) = non_blank(&self.search) {
            p.search(&["nickname"], term);
        }
        p
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
