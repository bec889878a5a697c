//! Player model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::{Date, DbId, Timestamp};
use arena_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

/// A row from the `players` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Player {
    pub id: DbId,
    pub nickname: String,
    pub real_name: Option<String>,
    pub country_code: Option<String>,
    pub birth_date: Option<Date>,
    pub steam_id: Option<String>,
    pub avatar_url: Option<String>,
    pub mmr_rating: f64,
    pub is_retired: bool,
    /// Assigned by the database on insert.
    pub created_at: Option<Timestamp>,
}

impl Record for Player {
    const ENTITY: &'static str = "player";
    const TABLE: &'static str = "players";
    const COLUMNS: &'static str = "id, nickname, real_name, country_code, birth_date, steam_id, \
         avatar_url, mmr_rating, is_retired, created_at";
    const ORDER_BY: &'static str = "nickname ASC, id ASC";

    type Filter = PlayerFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("nickname", self.nickname.clone().into()),
            ("real_name", self.real_name.clone().into()),
            ("country_code", self.country_code.clone().into()),
            ("birth_date", self.birth_date.into()),
            ("steam_id", self.steam_id.clone().into()),
            ("avatar_url", self.avatar_url.clone().into()),
            ("mmr_rating", self.mmr_rating.into()),
            ("is_retired", self.is_retired.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerFilter {
    /// Partial match on nickname or real name.
    pub search: Option<String>,
    pub country_code: Option<String>,
    pub is_retired: Option<bool>,
    pub min_mmr: Option<f64>,
    pub max_mmr: Option<f64>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for PlayerFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(term) = non_blank(&self.search) {
            p.search(&["nickname", "real_name"], term);
        }
        if let Some(code) = non_blank(&self.country_code) {
            p.eq_ignore_case("country_code", code);
        }
        if let Some(retired) = self.is_retired {
            p.eq("is_retired", retired);
        }
        if let Some(min) = self.min_mmr {
            p.gte("mmr_rating", min);
        }
        if let Some(max) = self.max_mmr {
            p.lte("mmr_rating", max);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
