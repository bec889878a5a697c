//! Batch import vocabulary: entity kinds, the per-batch summary, and the
//! string parsers used when converting loosely-typed rows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, Timestamp};

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Outcome of one import batch.
///
/// `inserted + failed` always equals the number of rows submitted, and
/// `errors` holds one message per failed row in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl ImportSummary {
    pub fn record_success(&mut self) {
        self.inserted += 1;
    }

    pub fn record_failure(&mut self, error: impl fmt::Display) {
        self.failed += 1;
        self.errors.push(error.to_string());
    }

    pub fn total(&self) -> usize {
        self.inserted + self.failed
    }
}

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// The ten importable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Players,
    Disciplines,
    Teams,
    Tournaments,
    TournamentRegistrations,
    Matches,
    MatchGames,
    GamePlayerStats,
    SquadMembers,
    TeamProfiles,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        Self::Players,
        Self::Disciplines,
        Self::Teams,
        Self::Tournaments,
        Self::TournamentRegistrations,
        Self::Matches,
        Self::MatchGames,
        Self::GamePlayerStats,
        Self::SquadMembers,
        Self::TeamProfiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Disciplines => "disciplines",
            Self::Teams => "teams",
            Self::Tournaments => "tournaments",
            Self::TournamentRegistrations => "tournament_registrations",
            Self::Matches => "matches",
            Self::MatchGames => "match_games",
            Self::GamePlayerStats => "game_player_stats",
            Self::SquadMembers => "squad_members",
            Self::TeamProfiles => "team_profiles",
        }
    }

    /// Default provenance tag for rows arriving through `channel`.
    pub fn source_tag(&self, channel: Channel) -> String {
        format!("{}_{}", self.as_str(), channel.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == needle)
            .ok_or_else(|| CoreError::validation(format!("unknown entity kind: {s}")))
    }
}

/// How a batch reached the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Api,
    Csv,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Csv => "csv",
        }
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an optional `YYYY-MM-DD` string. Blank input is `None`.
pub fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<Date>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    Date::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| CoreError::conversion(format!("invalid {field} '{raw}': {e}")))
}

/// Parse an optional timestamp.
///
/// Accepts RFC 3339, or a zone-less `YYYY-MM-DD HH:MM:SS` /
/// `YYYY-MM-DDTHH:MM:SS` which is taken as UTC. Blank input is `None`.
pub fn parse_timestamp(field: &str, raw: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .ok_or_else(|| CoreError::conversion(format!("invalid {field} '{raw}'")))
}

/// Normalize a JSON column value.
///
/// Objects and arrays pass through. A string is parsed as JSON text, which is
/// how CSV rows carry these columns; a blank string or `null` is `None`.
pub fn json_field(
    field: &str,
    raw: Option<serde_json::Value>,
) -> Result<Option<serde_json::Value>, CoreError> {
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            serde_json::from_str(text)
                .map(Some)
                .map_err(|e| CoreError::conversion(format!("invalid {field} JSON: {e}")))
        }
        Some(other) => Ok(Some(other)),
    }
}
