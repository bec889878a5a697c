//! Per-player per-map statistics model and listing filter.

use arena_core::pagination::Pagination;
use arena_core::query::{Predicates, SqlValue};
use arena_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::record::{ListFilter, Record};

/// A row from the `game_player_stats` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GamePlayerStat {
    pub id: DbId,
    pub game_id: DbId,
    pub player_id: DbId,
    pub team_id: Option<DbId>,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub hero_name: Option<String>,
    pub damage_dealt: i32,
    pub gold_earned: i32,
    /// Generated column: `(kills + assists) / deaths`, or `kills + assists`
    /// when `deaths = 0`. Never written.
    pub kda_ratio: Option<f64>,
    pub was_mvp: bool,
}

impl Record for GamePlayerStat {
    const ENTITY: &'static str = "game player stat";
    const TABLE: &'static str = "game_player_stats";
    const COLUMNS: &'static str = "id, game_id, player_id, team_id, kills, deaths, assists, \
         hero_name, damage_dealt, gold_earned, kda_ratio, was_mvp";
    const ORDER_BY: &'static str = "game_id DESC, id DESC";

    type Filter = GamePlayerStatFilter;

    fn key(&self) -> DbId {
        self.id
    }

    fn writable(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("game_id", self.game_id.into()),
            ("player_id", self.player_id.into()),
            ("team_id", self.team_id.into()),
            ("kills", self.kills.into()),
            ("deaths", self.deaths.into()),
            ("assists", self.assists.into()),
            ("hero_name", self.hero_name.clone().into()),
            ("damage_dealt", self.damage_dealt.into()),
            ("gold_earned", self.gold_earned.into()),
            ("was_mvp", self.was_mvp.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GamePlayerStatFilter {
    pub game_id: Option<DbId>,
    pub player_id: Option<DbId>,
    pub team_id: Option<DbId>,
    pub was_mvp: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

impl ListFilter for GamePlayerStatFilter {
    fn predicates(&self) -> Predicates {
        let mut p = Predicates::new();
        if let Some(id) = self.game_id {
            p.eq("game_id", id);
        }
        if let Some(id) = self.player_id {
            p.eq("player_id", id);
        }
        if let Some(id) = self.team_id {
            p.eq("team_id", id);
        }
        if let Some(mvp) = self.was_mvp {
            p.eq("was_mvp", mvp);
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
    fn computed_ratio_is_not_written() {
        let stat = GamePlayerStat {
            id: 0,
            game_id: 1,
            player_id: 2,
            team_id: None,
            kills: 10,
            deaths: 0,
            assists: 5,
            hero_name: None,
            damage_dealt: 0,
            gold_earned: 0,
            kda_ratio: Some(15.0),
            was_mvp: true,
        };
        assert!(stat.writable().iter().all(|(col, _)| *col != "kda_ratio"));
    }
}
