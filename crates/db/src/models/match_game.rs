//! Per-map game model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

/// A row from the `match_games` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct MatchGame {
    pub id: DbId,
    pub match_id: DbId,
    pub map_name: String,
    /// 1-based position within the series.
    pub game_number: i32,
    pub duration_seconds: Option<i32>,
    pub winner_team_id: Option<DbId>,
    pub score_team1: Option<i32>,
    pub score_team2: Option<i32>,
    pub started_at: Option<Timestamp>,
    pub had_technical_pause: bool,
    pub pick_ban_phase: serde_json::Value,
}

impl Record for MatchGame {
    const ENTITY: &'static str = "match game";
    const TABLE: &'static str = "match_games";
    const COLUMNS: &'static str = "id, match_id, map_name, game_number, duration_seconds, \
         winner_team_id, score_team1, score_team2, started_at, had_technical_pause, pick_ban_phase";
    const ORDER_BY: &'static str = "match_id DESC, game_number ASC, id ASC";

    type Filter = MatchGameFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("match_id", self.match_id.into()),
            ("map_name", self.map_name.clone().into()),
            ("game_number", self.game_number.into()),
            ("duration_seconds", self.duration_seconds.into()),
            ("winner_team_id", self.winner_team_id.into()),
            ("score_team1", self.score_team1.into()),
            ("score_team2", self.score_team2.into()),
            ("started_at", self.started_at.into()),
            ("had_technical_pause", self.had_technical_pause.into()),
            ("pick_ban_phase", self.pick_ban_phase.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchGameFilter {
    pub match_id: Option<DbId>,
    pub winner_team_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for MatchGameFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(id) = self.match_id {
            p.eq("match_id", id);
        }
        if let Some(id) = self.winner_team_id {
            p.eq("winner_team_id", id);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
