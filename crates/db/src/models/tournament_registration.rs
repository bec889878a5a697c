//! Tournament registration model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::{DbId, Timestamp};
use arena_core::validation::non_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

pub const DEFAULT_STATUS: &str = "Pending";

/// A row from the `tournament_registrations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TournamentRegistration {
    pub id: DbId,
    pub tournament_id: DbId,
    pub team_id: DbId,
    pub seed_number: Option<i32>,
    pub status: String,
    pub manager_contact: Option<String>,
    pub roster_snapshot: serde_json::Value,
    pub is_invited: bool,
    /// Assigned by the database on insert.
    pub registered_at: Option<Timestamp>,
}

impl Record for TournamentRegistration {
    const ENTITY: &'static str = "tournament registration";
    const TABLE: &'static str = "tournament_registrations";
    const COLUMNS: &'static str = "id, tournament_id, team_id, seed_number, status, \
         manager_contact, roster_snapshot, is_invited, registered_at";
    const ORDER_BY: &'static str = "registered_at DESC, id DESC";

    type Filter = TournamentRegistrationFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("tournament_id", self.tournament_id.into()),
            ("team_id", self.team_id.into()),
            ("seed_number", self.seed_number.into()),
            ("status", self.status.clone().into()),
            ("manager_contact", self.manager_contact.clone().into()),
            ("roster_snapshot", self.roster_snapshot.clone().into()),
            ("is_invited", self.is_invited.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TournamentRegistrationFilter {
    pub tournament_id: Option<DbId>,
    pub team_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for TournamentRegistrationFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(id) = self.tournament_id {
            p.eq("tournament_id", id);
        }
        if let Some(id) = self.team_id {
            p.eq("team_id", id);
        }
        if let Some(status) = non_blank(&self.status) {
            p.eq_ignore_case("status", status);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::query::ListQuery;

    use super::*;

    #[test]
    fn status_compares_case_insensitively() {
        let filter = TournamentRegistrationFilter {
            tournament_id: Some(4),
            status: Some("approved".into()),
            limit: 50,
            offset: 100,
            ..Default::default()
        };
        let q = ListQuery::build(
            TournamentRegistration::list_source(),
            &filter.predicates(),
            filter.pagination(),
        );

        assert_eq!(
            q.where_clause,
            "WHERE 1=1 AND tournament_id = $1 AND LOWER(status) = LOWER($2)"
        );
        assert_eq!(
            q.count.args,
            vec![SqlValue::from(4_i64), SqlValue::from("approved")]
        );
        assert!(q
            .select
            .sql
            .ends_with("ORDER BY registered_at DESC, id DESC LIMIT $3 OFFSET $4"));
        assert_eq!(q.select.args[2..], [SqlValue::from(50_i64), SqlValue::from(100_i64)]);
    }

    #[test]
    fn blank_status_adds_nothing() {
        let filter = TournamentRegistrationFilter {
            team_id: Some(9),
            status: Some("  ".into()),
            ..Default::default()
        };
        let (clause, args) = filter.predicates().render();
        assert_eq!(clause, "WHERE 1=1 AND team_id = $1");
        assert_eq!(args, vec![SqlValue::from(9_i64)]);
    }
}
