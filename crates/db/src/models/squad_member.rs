//! Squad (roster) membership model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::{Date, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

pub const DEFAULT_ROLE: &str = "Player";

/// A row from the `squad_members` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SquadMember {
    pub id: DbId,
    pub team_id: DbId,
    pub player_id: DbId,
    pub role: String,
    pub is_standin: bool,
    /// Defaults to today on create.
    pub join_date: Option<Date>,
    pub contract_end_date: Option<Date>,
    /// `None` while the player is still on the roster.
    pub leave_date: Option<Date>,
    pub salary_monthly: Option<f64>,
}

impl Record for SquadMember {
    const ENTITY: &'static str = "squad member";
    const TABLE: &'static str = "squad_members";
    const COLUMNS: &'static str = "id, team_id, player_id, role, is_standin, join_date, \
         contract_end_date, leave_date, salary_monthly";
    const ORDER_BY: &'static str = "join_date DESC, id DESC";

    type Filter = SquadMemberFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("team_id", self.team_id.into()),
            ("player_id", self.player_id.into()),
            ("role", self.role.clone().into()),
            ("is_standin", self.is_standin.into()),
            ("join_date", self.join_date.into()),
            ("contract_end_date", self.contract_end_date.into()),
            ("leave_date", self.leave_date.into()),
            ("salary_monthly", self.salary_monthly.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SquadMemberFilter {
    pub team_id: Option<DbId>,
    pub player_id: Option<DbId>,
    /// Only members without a `leave_date`.
    pub active_only: bool,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for SquadMemberFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(id) = self.team_id {
            p.eq("team_id", id);
        }
        if let Some(id) = self.player_id {
            p.eq("player_id", id);
        }
        if self.active_only {
            p.condition("leave_date IS NULL");
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
    fn active_only_binds_nothing() {
        let filter = SquadMemberFilter {
            team_id: Some(4),
            active_only: true,
            ..Default::default()
        };
        let (clause, args) = filter.predicates().render();
        assert_eq!(clause, "WHERE 1=1 AND team_id = $1 AND leave_date IS NULL");
        assert_eq!(args, vec![SqlValue::from(4_i64)]);
    }
}
