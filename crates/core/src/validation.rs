//! Small helpers shared by the per-entity write rules.

use chrono::Utc;

use crate::error::CoreError;
use crate::types::{Date, DbId, Timestamp};

/// Earliest plausible date for tournament starts and match start times.
pub const SANITY_FLOOR: (i32, u32, u32) = (2000, 1, 1);

pub fn sanity_floor() -> Date {
    let (y, m, d) = SANITY_FLOOR;
    Date::from_ymd_opt(y, m, d).unwrap_or(Date::MIN)
}

/// Trim a required string in place.
pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional string; whitespace-only collapses to `None`.
pub fn trim_opt(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
}

/// Present means non-empty after trimming.
pub fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Identifiers equal to zero (or negative) count as absent.
pub fn id_present(id: DbId) -> bool {
    id > 0
}

pub fn opt_id_present(id: Option<DbId>) -> bool {
    id.is_some_and(id_present)
}

/// Fails with `message` unless `ok` holds.
pub fn ensure(ok: bool, message: &str) -> Result<(), CoreError> {
    if ok {
        Ok(())
    } else {
        Err(CoreError::validation(message))
    }
}

pub fn today() -> Date {
    Utc::now().date_naive()
}

pub fn is_before_floor(date: Date) -> bool {
    date < sanity_floor()
}

pub fn timestamp_before_floor(ts: Timestamp) -> bool {
    is_before_floor(ts.date_naive())
}

/// Returns the filter value when it carries something other than whitespace.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn trim_opt_collapses_blank() {
        let mut v = Some("   ".to_string());
        trim_opt(&mut v);
        assert_eq!(v, None);

        let mut v = Some("  Berlin ".to_string());
        trim_opt(&mut v);
        assert_eq!(v.as_deref(), Some("Berlin"));
    }

    #[test]
    fn zero_id_is_absent() {
        assert!(!id_present(0));
        assert!(id_present(1));
        assert!(!opt_id_present(Some(0)));
        assert!(!opt_id_present(None));
    }

    #[test]
    fn floor_is_start_of_2000() {
        assert!(is_before_floor(Date::from_ymd_opt(1999, 12, 31).unwrap()));
        assert!(!is_before_floor(Date::from_ymd_opt(2000, 1, 1).unwrap()));
        let ts = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert!(timestamp_before_floor(ts));
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(&Some(" \t".into())), None);
        assert_eq!(non_blank(&Some(" ua ".into())), Some("ua"));
        assert_eq!(non_blank(&None), None);
    }

    #[test]
    fn ensure_uses_message_verbatim() {
        let err = ensure(false, "nickname is required").unwrap_err();
        assert_eq!(err, CoreError::validation("nickname is required"));
        assert!(ensure(true, "unused").is_ok());
    }
}
