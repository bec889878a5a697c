//! Team model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::{DbId, Timestamp};
use arena_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

/// A row from the `teams` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    pub tag: String,
    pub country_code: String,
    pub discipline_id: DbId,
    /// Assigned by the database on insert.
    pub created_at: Option<Timestamp>,
    pub logo_url: Option<String>,
    pub world_ranking: f64,
    pub is_verified: bool,
}

impl Record for Team {
    const ENTITY: &'static str = "team";
    const TABLE: &'static str = "teams";
    const COLUMNS: &'static str =
        "id, name, tag, country_code, discipline_id, created_at, logo_url, world_ranking, is_verified";
    const ORDER_BY: &'static str = "name ASC, id ASC";

    type Filter = TeamFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("tag", self.tag.clone().into()),
            ("country_code", self.country_code.clone().into()),
            ("discipline_id", self.discipline_id.into()),
            ("logo_url", self.logo_url.clone().into()),
            ("world_ranking", self.world_ranking.into()),
            ("is_verified", self.is_verified.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamFilter {
    /// Partial match on name or tag.
    pub search: Option<String>,
    pub country_code: Option<String>,
    pub discipline_id: Option<DbId>,
    pub is_verified: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for TeamFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(term) = non_blank(&self.search) {
            p.search(&["name", "tag"], term);
        }
        if let Some(code) = non_blank(&self.country_code) {
            p.eq_ignore_case("country_code", code);
        }
        if let Some(id) = self.discipline_id {
            p.eq("discipline_id", id);
        }
        if let Some(verified) = self.is_verified {
            p.eq("is_verified", verified);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
