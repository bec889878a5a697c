//! Match (series) model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::{DbId, Timestamp};
use arena_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

pub const DEFAULT_FORMAT: &str = "bo3";

/// A row from the `matches` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Match {
    pub id: DbId,
    pub tournament_id: DbId,
    pub team1_id: Option<DbId>,
    pub team2_id: Option<DbId>,
    /// Required; `None` only before validation.
    pub start_time: Option<Timestamp>,
    pub format: String,
    pub stage: Option<String>,
    pub winner_team_id: Option<DbId>,
    pub is_forfeit: bool,
    pub match_notes: Option<serde_json::Value>,
}

impl Record for Match {
    const ENTITY: &'static str = "match";
    const TABLE: &'static str = "matches";
    const COLUMNS: &'static str = "id, tournament_id, team1_id, team2_id, start_time, format, \
         stage, winner_team_id, is_forfeit, match_notes";
    const ORDER_BY: &'static str = "start_time DESC, id DESC";

    type Filter = MatchFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("tournament_id", self.tournament_id.into()),
            ("team1_id", self.team1_id.into()),
            ("team2_id", self.team2_id.into()),
            ("start_time", self.start_time.into()),
            ("format", self.format.clone().into()),
            ("stage", self.stage.clone().into()),
            ("winner_team_id", self.winner_team_id.into()),
            ("is_forfeit", self.is_forfeit.into()),
            ("match_notes", self.match_notes.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchFilter {
    pub tournament_id: Option<DbId>,
    /// Matches where the team played on either side.
    pub team_id: Option<DbId>,
    pub stage: Option<String>,
    pub format: Option<String>,
    /// Inclusive lower bound on `start_time`.
    pub from: Option<Timestamp>,
    /// Inclusive upper bound on `start_time`.
    pub to: Option<Timestamp>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for MatchFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(id) = self.tournament_id {
            p.eq("tournament_id", id);
        }
        if let Some(id) = self.team_id {
            p.any_eq(&["team1_id", "team2_id"], id);
        }
        if let Some(stage) = non_blank(&self.stage) {
            p.eq_ignore_case("stage", stage);
        }
        if let Some(format) = non_blank(&self.format) {
            p.eq_ignore_case("format", format);
        }
        if let Some(from) = self.from {
            p.gte("start_time", from);
        }
        if let Some(to) = self.to {
            p.lte("start_time", to);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
