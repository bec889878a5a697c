//! Tournament model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::{Date, DbId};
use arena_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_STATUS: &str = "Announced";

/// A row from the `tournaments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Tournament {
    pub id: DbId,
    pub discipline_id: DbId,
    pub name: String,
    /// Required; `None` only before validation.
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub prize_pool: f64,
    pub currency: String,
    pub status: String,
    pub is_online: bool,
    pub bracket_config: serde_json::Value,
}

impl Record for Tournament {
    const ENTITY: &'static str = "tournament";
    const TABLE: &'static str = "tournaments";
    const COLUMNS: &'static str = "id, discipline_id, name, start_date, end_date, prize_pool, \
         currency, status, is_online, bracket_config";
    const ORDER_BY: &'static str = "start_date DESC, id DESC";

    type Filter = TournamentFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("discipline_id", self.discipline_id.into()),
            ("name", self.name.clone().into()),
            ("start_date", self.start_date.into()),
            ("end_date", self.end_date.into()),
            ("prize_pool", self.prize_pool.into()),
            ("currency", self.currency.clone().into()),
            ("status", self.status.clone().into()),
            ("is_online", self.is_online.into()),
            ("bracket_config", self.bracket_config.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TournamentFilter {
    pub search: Option<String>,
    pub discipline_id: Option<DbId>,
    pub status: Option<String>,
    /// Inclusive lower bound on `start_date`.
    pub start_from: Option<Date>,
    /// Inclusive upper bound on `start_date`.
    pub start_to: Option<Date>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for TournamentFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(term) = non_blank(&self.search) {
            p.search(&["name"], term);
        }
        if let Some(id) = self.discipline_id {
            p.eq("discipline_id", id);
        }
        if let Some(status) = non_blank(&self.status) {
            p.eq_ignore_case("status", status);
        }
        if let Some(from) = self.start_from {
            p.gte("start_date", from);
        }
        if let Some(to) = self.start_to {
            p.lte("start_date", to);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
