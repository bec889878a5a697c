//! Discipline (game title) model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::DbId;
use arena_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

/// A row from the `disciplines` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Discipline {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub team_size: Option<i32>,
    pub is_active: bool,
    /// NOT NULL in the database; defaults to `{}`.
    pub metadata: serde_json::Value,
}

impl Record for Discipline {
    const ENTITY: &'static str = "discipline";
    const TABLE: &'static str = "disciplines";
    const COLUMNS: &'static str =
        "id, code, name, description, icon_url, team_size, is_active, metadata";
    const ORDER_BY: &'static str = "name ASC, id ASC";

    type Filter = DisciplineFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("code", self.code.clone().into()),
            ("name", self.name.clone().into()),
            ("description", self.description.clone().into()),
            ("icon_url", self.icon_url.clone().into()),
            ("team_size", self.team_size.into()),
            ("is_active", self.is_active.into()),
            ("metadata", self.metadata.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisciplineFilter {
    /// Partial match on code or name.
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for DisciplineFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(term) = non_blank(&self.search) {
            p.search(&["code", "name"], term);
        }
        if let Some(active) = self.is_active {
            p.eq("is_active", active);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_ignored() {
        let filter = DisciplineFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        let (clause, args) = filter.predicates().render();
        assert_eq!(clause, "WHERE 1=1");
        assert!(args.is_empty());
    }

    #[test]
    fn search_spans_code_and_name() {
        let filter = DisciplineFilter {
            search: Some("dota".into()),
            is_active: Some(true),
            ..Default::default()
        };
        let (clause, args) = filter.predicates().render();
        assert_eq!(
            clause,
            "WHERE 1=1 AND (LOWER(code) LIKE LOWER($1) OR LOWER(name) LIKE LOWER($2)) \
             AND is_active = $3"
        );
        assert_eq!(args.len(), 3);
    }
}
