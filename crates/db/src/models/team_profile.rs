//! Extended team profile, keyed by the team it describes.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

/// A row from the `team_profiles` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TeamProfile {
    /// Caller-supplied; also the primary key.
    pub team_id: DbId,
    pub coach_name: Option<String>,
    pub sponsor_info: Option<String>,
    pub headquarters: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
}

impl Record for TeamProfile {
    const ENTITY: &'static str = "team profile";
    const TABLE: &'static str = "team_profiles";
    const KEY: &'static str = "team_id";
    const COLUMNS: &'static str =
        "team_id, coach_name, sponsor_info, headquarters, website, contact_email";
    const ORDER_BY: &'static str = "team_id DESC";

    type Filter = TeamProfileFilter;

    fn key(&self) -> DbId {
        self.team_id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("team_id", self.team_id.into()),
            ("coach_name", self.coach_name.clone().into()),
            ("sponsor_info", self.sponsor_info.clone().into()),
            ("headquarters", self.headquarters.clone().into()),
            ("website", self.website.clone().into()),
            ("contact_email", self.contact_email.clone().into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamProfileFilter {
    pub team_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for TeamProfileFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(id) = self.team_id {
            p.eq("team_id", id);
        }
        p
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}
