//! Import-row shapes, one per entity kind, and their conversion into
//! domain records.
//!
//! Every field is optional at this stage so that a missing value is reported
//! by the domain rules rather than as a decode error. Unset flags and numbers
//! take the same defaults the schema uses.

use arena_core::error::CoreError;
use arena_core::import::{json_field, parse_date, parse_timestamp, EntityKind};
use arena_core::types::DbId;
use arena_db::models::discipline::Discipline;
use arena_db::models::game_player_stat::GamePlayerStat;
use arena_db::models::match_game::MatchGame;
use arena_db::models::matches::Match;
use arena_db::models::player::Player;
use arena_db::models::squad_member::SquadMember;
use arena_db::models::team::Team;
use arena_db::models::team_profile::TeamProfile;
use arena_db::models::tournament::Tournament;
use arena_db::models::tournament_registration::TournamentRegistration;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::service::DomainRecord;

/// A decoded import row that knows how to become its domain record.
pub trait ImportRow: DeserializeOwned + Send {
    const KIND: EntityKind;

    type Record: DomainRecord;

    fn into_record(self) -> Result<Self::Record, CoreError>;
}

/// Trimmed text; blank collapses to `None`.
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required_text(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn id(value: Option<DbId>) -> DbId {
    value.unwrap_or(0)
}

fn object_or_empty(field: &str, raw: Option<Value>) -> Result<Value, CoreError> {
    Ok(json_field(field, raw)?.unwrap_or_else(|| Value::Object(Default::default())))
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerImport {
    pub nickname: Option<String>,
    pub real_name: Option<String>,
    pub country_code: Option<String>,
    pub birth_date: Option<String>,
    pub steam_id: Option<String>,
    pub avatar_url: Option<String>,
    pub mmr_rating: Option<f64>,
    pub is_retired: Option<bool>,
}

impl ImportRow for PlayerImport {
    const KIND: EntityKind = EntityKind::Players;
    type Record = Player;

    fn into_record(self) -> Result<Player, CoreError> {
        Ok(Player {
            id: 0,
            nickname: required_text(self.nickname),
            real_name: text(self.real_name),
            country_code: text(self.country_code),
            birth_date: parse_date("birth_date", self.birth_date.as_deref())?,
            steam_id: text(self.steam_id),
            avatar_url: text(self.avatar_url),
            mmr_rating: self.mmr_rating.unwrap_or(0.0),
            is_retired: self.is_retired.unwrap_or(false),
            created_at: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Disciplines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisciplineImport {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub team_size: Option<i32>,
    pub is_active: Option<bool>,
    pub metadata: Option<Value>,
}

impl ImportRow for DisciplineImport {
    const KIND: EntityKind = EntityKind::Disciplines;
    type Record = Discipline;

    fn into_record(self) -> Result<Discipline, CoreError> {
        Ok(Discipline {
            id: 0,
            code: required_text(self.code),
            name: required_text(self.name),
            description: required_text(self.description),
            icon_url: text(self.icon_url),
            team_size: self.team_size,
            is_active: self.is_active.unwrap_or(true),
            metadata: object_or_empty("metadata", self.metadata)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamImport {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub country_code: Option<String>,
    pub discipline_id: Option<DbId>,
    pub logo_url: Option<String>,
    pub world_ranking: Option<f64>,
    pub is_verified: Option<bool>,
}

impl ImportRow for TeamImport {
    const KIND: EntityKind = EntityKind::Teams;
    type Record = Team;

    fn into_record(self) -> Result<Team, CoreError> {
        Ok(Team {
            id: 0,
            name: required_text(self.name),
            tag: required_text(self.tag),
            country_code: required_text(self.country_code),
            discipline_id: id(self.discipline_id),
            created_at: None,
            logo_url: text(self.logo_url),
            world_ranking: self.world_ranking.unwrap_or(0.0),
            is_verified: self.is_verified.unwrap_or(false),
        })
    }
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TournamentImport {
    pub discipline_id: Option<DbId>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub prize_pool: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub is_online: Option<bool>,
    pub bracket_config: Option<Value>,
}

impl ImportRow for TournamentImport {
    const KIND: EntityKind = EntityKind::Tournaments;
    type Record = Tournament;

    fn into_record(self) -> Result<Tournament, CoreError> {
        Ok(Tournament {
            id: 0,
            discipline_id: id(self.discipline_id),
            name: required_text(self.name),
            start_date: parse_date("start_date", self.start_date.as_deref())?,
            end_date: parse_date("end_date", self.end_date.as_deref())?,
            prize_pool: self.prize_pool.unwrap_or(0.0),
            currency: required_text(self.currency),
            status: required_text(self.status),
            is_online: self.is_online.unwrap_or(false),
            bracket_config: object_or_empty("bracket_config", self.bracket_config)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tournament registrations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TournamentRegistrationImport {
    pub tournament_id: Option<DbId>,
    pub team_id: Option<DbId>,
    pub seed_number: Option<i32>,
    pub status: Option<String>,
    pub manager_contact: Option<String>,
    pub roster_snapshot: Option<Value>,
    pub is_invited: Option<bool>,
}

impl ImportRow for TournamentRegistrationImport {
    const KIND: EntityKind = EntityKind::TournamentRegistrations;
    type Record = TournamentRegistration;

    fn into_record(self) -> Result<TournamentRegistration, CoreError> {
        Ok(TournamentRegistration {
            id: 0,
            tournament_id: id(self.tournament_id),
            team_id: id(self.team_id),
            seed_number: self.seed_number,
            status: required_text(self.status),
            manager_contact: text(self.manager_contact),
            roster_snapshot: object_or_empty("roster_snapshot", self.roster_snapshot)?,
            is_invited: self.is_invited.unwrap_or(false),
            registered_at: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchImport {
    pub tournament_id: Option<DbId>,
    pub team1_id: Option<DbId>,
    pub team2_id: Option<DbId>,
    pub start_time: Option<String>,
    pub format: Option<String>,
    pub stage: Option<String>,
    pub winner_team_id: Option<DbId>,
    pub is_forfeit: Option<bool>,
    pub match_notes: Option<Value>,
}

impl ImportRow for MatchImport {
    const KIND: EntityKind = EntityKind::Matches;
    type Record = Match;

    fn into_record(self) -> Result<Match, CoreError> {
        Ok(Match {
            id: 0,
            tournament_id: id(self.tournament_id),
            team1_id: self.team1_id,
            team2_id: self.team2_id,
            start_time: parse_timestamp("start_time", self.start_time.as_deref())?,
            format: required_text(self.format),
            stage: text(self.stage),
            winner_team_id: self.winner_team_id,
            is_forfeit: self.is_forfeit.unwrap_or(false),
            match_notes: json_field("match_notes", self.match_notes)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Match games
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchGameImport {
    pub match_id: Option<DbId>,
    pub map_name: Option<String>,
    pub game_number: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub winner_team_id: Option<DbId>,
    pub score_team1: Option<i32>,
    pub score_team2: Option<i32>,
    pub started_at: Option<String>,
    pub had_technical_pause: Option<bool>,
    pub pick_ban_phase: Option<Value>,
}

impl ImportRow for MatchGameImport {
    const KIND: EntityKind = EntityKind::MatchGames;
    type Record = MatchGame;

    fn into_record(self) -> Result<MatchGame, CoreError> {
        Ok(MatchGame {
            id: 0,
            match_id: id(self.match_id),
            map_name: required_text(self.map_name),
            game_number: self.game_number.unwrap_or(0),
            duration_seconds: self.duration_seconds,
            winner_team_id: self.winner_team_id,
            score_team1: self.score_team1,
            score_team2: self.score_team2,
            started_at: parse_timestamp("started_at", self.started_at.as_deref())?,
            had_technical_pause: self.had_technical_pause.unwrap_or(false),
            pick_ban_phase: object_or_empty("pick_ban_phase", self.pick_ban_phase)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Game player stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GamePlayerStatImport {
    pub game_id: Option<DbId>,
    pub player_id: Option<DbId>,
    pub team_id: Option<DbId>,
    pub kills: Option<i32>,
    pub deaths: Option<i32>,
    pub assists: Option<i32>,
    pub hero_name: Option<String>,
    pub damage_dealt: Option<i32>,
    pub gold_earned: Option<i32>,
    pub was_mvp: Option<bool>,
}

impl ImportRow for GamePlayerStatImport {
    const KIND: EntityKind = EntityKind::GamePlayerStats;
    type Record = GamePlayerStat;

    fn into_record(self) -> Result<GamePlayerStat, CoreError> {
        Ok(GamePlayerStat {
            id: 0,
            game_id: id(self.game_id),
            player_id: id(self.player_id),
            team_id: self.team_id,
            kills: self.kills.unwrap_or(0),
            deaths: self.deaths.unwrap_or(0),
            assists: self.assists.unwrap_or(0),
            hero_name: text(self.hero_name),
            damage_dealt: self.damage_dealt.unwrap_or(0),
            gold_earned: self.gold_earned.unwrap_or(0),
            kda_ratio: None,
            was_mvp: self.was_mvp.unwrap_or(false),
        })
    }
}

// ---------------------------------------------------------------------------
// Squad members
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SquadMemberImport {
    pub team_id: Option<DbId>,
    pub player_id: Option<DbId>,
    pub role: Option<String>,
    pub is_standin: Option<bool>,
    pub join_date: Option<String>,
    pub contract_end_date: Option<String>,
    pub leave_date: Option<String>,
    pub salary_monthly: Option<f64>,
}

impl ImportRow for SquadMemberImport {
    const KIND: EntityKind = EntityKind::SquadMembers;
    type Record = SquadMember;

    fn into_record(self) -> Result<SquadMember, CoreError> {
        Ok(SquadMember {
            id: 0,
            team_id: id(self.team_id),
            player_id: id(self.player_id),
            role: required_text(self.role),
            is_standin: self.is_standin.unwrap_or(false),
            join_date: parse_date("join_date", self.join_date.as_deref())?,
            contract_end_date: parse_date("contract_end_date", self.contract_end_date.as_deref())?,
            leave_date: parse_date("leave_date", self.leave_date.as_deref())?,
            salary_monthly: self.salary_monthly,
        })
    }
}

// ---------------------------------------------------------------------------
// Team profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamProfileImport {
    pub team_id: Option<DbId>,
    pub coach_name: Option<String>,
    pub sponsor_info: Option<String>,
    pub headquarters: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
}

impl ImportRow for TeamProfileImport {
    const KIND: EntityKind = EntityKind::TeamProfiles;
    type Record = TeamProfile;

    fn into_record(self) -> Result<TeamProfile, CoreError> {
        Ok(TeamProfile {
            team_id: id(self.team_id),
            coach_name: text(self.coach_name),
            sponsor_info: text(self.sponsor_info),
            headquarters: text(self.headquarters),
            website: text(self.website),
            contact_email: text(self.contact_email),
        })
    }
}
