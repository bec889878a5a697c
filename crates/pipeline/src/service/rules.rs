//! Per-entity write rules.
//!
//! Each `prepare` trims, fills defaults, then checks rules in order and stops
//! at the first violation.

use arena_core::error::CoreError;
use arena_core::validation::{
    ensure, id_present, is_before_floor, present, timestamp_before_floor, today, trim, trim_opt,
};
use arena_db::models::discipline::Discipline;
use arena_db::models::game_player_stat::GamePlayerStat;
use arena_db::models::match_game::MatchGame;
use arena_db::models::matches::{self, Match};
use arena_db::models::player::Player;
use arena_db::models::squad_member::{self, SquadMember};
use arena_db::models::team::Team;
use arena_db::models::team_profile::TeamProfile;
use arena_db::models::tournament::{self, Tournament};
use arena_db::models::tournament_registration::{self, TournamentRegistration};
use arena_db::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// A record with domain rules applied before every write.
pub trait DomainRecord: Record {
    fn prepare(&mut self, mode: WriteMode) -> Result<(), CoreError>;
}

fn default_if_blank(value: &mut String, default: &str) {
    if value.is_empty() {
        *value = default.to_string();
    }
}

impl DomainRecord for Discipline {
    fn prepare(&mut self, _mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.code);
        trim(&mut self.name);
        trim(&mut self.description);
        ensure(
            present(&self.code) && present(&self.name),
            "code and name are required",
        )
    }
}

impl DomainRecord for Team {
    fn prepare(&mut self, _mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.name);
        trim(&mut self.tag);
        trim(&mut self.country_code);
        ensure(
            present(&self.name)
                && present(&self.tag)
                && present(&self.country_code)
                && id_present(self.discipline_id),
            "name, tag, country_code, discipline_id are required",
        )
    }
}

impl DomainRecord for Player {
    fn prepare(&mut self, _mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.nickname);
        ensure(present(&self.nickname), "nickname is required")?;
        ensure(
            self.birth_date.map_or(true, |d| d <= today()),
            "birth_date cannot be in the future",
        )
    }
}

impl DomainRecord for Tournament {
    fn prepare(&mut self, mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.name);
        trim(&mut self.currency);
        trim(&mut self.status);
        default_if_blank(&mut self.currency, tournament::DEFAULT_CURRENCY);
        default_if_blank(&mut self.status, tournament::DEFAULT_STATUS);

        ensure(
            present(&self.name) && id_present(self.discipline_id),
            "name and discipline_id are required",
        )?;
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(CoreError::validation("start_date and end_date are required"));
        };
        ensure(end >= start, "end_date must be after start_date")?;
        if mode == WriteMode::Create {
            ensure(!is_before_floor(start), "start_date looks invalid")?;
        }
        Ok(())
    }
}

impl DomainRecord for TournamentRegistration {
    fn prepare(&mut self, _mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.status);
        default_if_blank(&mut self.status, tournament_registration::DEFAULT_STATUS);
        ensure(
            id_present(self.tournament_id) && id_present(self.team_id),
            "tournament_id and team_id are required",
        )
    }
}

impl DomainRecord for Match {
    fn prepare(&mut self, mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.format);
        default_if_blank(&mut self.format, matches::DEFAULT_FORMAT);

        let Some(start) = self.start_time.filter(|_| id_present(self.tournament_id)) else {
            return Err(CoreError::validation(
                "tournament_id and start_time are required",
            ));
        };
        if let (Some(a), Some(b)) = (self.team1_id, self.team2_id) {
            ensure(a != b, "team1_id and team2_id must differ")?;
        }
        if mode == WriteMode::Create {
            ensure(!timestamp_before_floor(start), "start_time looks invalid")?;
        }
        Ok(())
    }
}

impl DomainRecord for MatchGame {
    fn prepare(&mut self, _mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.map_name);
        ensure(
            id_present(self.match_id) && present(&self.map_name) && self.game_number > 0,
            "match_id, map_name, game_number are required",
        )
    }
}

impl DomainRecord for GamePlayerStat {
    fn prepare(&mut self, _mode: WriteMode) -> Result<(), CoreError> {
        trim_opt(&mut self.hero_name);
        ensure(
            id_present(self.game_id) && id_present(self.player_id),
            "game_id and player_id are required",
        )
    }
}

impl DomainRecord for SquadMember {
    fn prepare(&mut self, mode: WriteMode) -> Result<(), CoreError> {
        trim(&mut self.role);
        ensure(
            id_present(self.team_id) && id_present(self.player_id),
            "team_id and player_id are required",
        )?;
        default_if_blank(&mut self.role, squad_member::DEFAULT_ROLE);

        let join = match (self.join_date, mode) {
            (Some(date), _) => date,
            (None, WriteMode::Create) => *self.join_date.insert(today()),
            (None, WriteMode::Update) => {
                return Err(CoreError::validation("join_date is required"));
            }
        };
        ensure(
            self.leave_date.map_or(true, |d| d >= join),
            "leave_date cannot be before join_date",
        )?;
        ensure(
            self.contract_end_date.map_or(true, |d| d >= join),
            "contract_end_date cannot be before join_date",
        )
    }
}

impl DomainRecord for TeamProfile {
    fn prepare(&mut self, _mode: WriteMode) -> Result<(), CoreError> {
        trim_opt(&mut self.coach_name);
        trim_opt(&mut self.sponsor_info);
        trim_opt(&mut self.headquarters);
        trim_opt(&mut self.website);
        trim_opt(&mut self.contact_email);
        ensure(id_present(self.team_id), "team_id is required")
    }
}
