//! Parameterized query construction for filtered listings.
//!
//! Filters contribute conditions to a [`Predicates`] accumulator. Each
//! condition is a SQL fragment with `?` slot markers and the values that fill
//! them. Placeholder numbers (`$1`, `$2`, ...) are assigned only when the
//! accumulator is rendered, from the running argument count, so absent
//! filter fields never leave gaps and reordering conditions can't desync
//! indices from arguments.
//!
//! [`ListQuery::build`] renders one WHERE clause and uses it verbatim for both
//! the count query and the paged select query.

use crate::pagination::Pagination;
use crate::types::{Date, Timestamp};

// ---------------------------------------------------------------------------
// Bind values
// ---------------------------------------------------------------------------

/// A typed value bound to a placeholder.
///
/// Every variant is nullable so that `NULL` keeps its column type when bound.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    BigInt(Option<i64>),
    Int(Option<i32>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Text(Option<String>),
    Date(Option<Date>),
    Timestamp(Option<Timestamp>),
    Json(Option<serde_json::Value>),
}

macro_rules! sql_value_from {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for SqlValue {
            fn from(v: $ty) -> Self {
                SqlValue::$variant(Some(v))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(v: Option<$ty>) -> Self {
                SqlValue::$variant(v)
            }
        }
    };
}

sql_value_from!(i64 => BigInt);
sql_value_from!(i32 => Int);
sql_value_from!(f64 => Float);
sql_value_from!(bool => Bool);
sql_value_from!(String => Text);
sql_value_from!(Date => Date);
sql_value_from!(Timestamp => Timestamp);
sql_value_from!(serde_json::Value => Json);

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<Option<&str>> for SqlValue {
    fn from(v: Option<&str>) -> Self {
        SqlValue::Text(v.map(str::to_string))
    }
}

// ---------------------------------------------------------------------------
// Predicate accumulator
// ---------------------------------------------------------------------------

/// Slot marker used inside condition templates.
const SLOT: char = '?';

/// Constant base clause; every condition is appended with `AND`.
pub const BASE_WHERE: &str = "WHERE 1=1";

#[derive(Debug, Clone)]
struct Condition {
    template: String,
    values: Vec<SqlValue>,
}

/// Ordered list of `(fragment template, values)` pairs for one WHERE clause.
#[derive(Debug, Clone, Default)]
pub struct Predicates {
    conditions: Vec<Condition>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conditions (not arguments).
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Total number of bound values across all conditions.
    pub fn arg_count(&self) -> usize {
        self.conditions.iter().map(|c| c.values.len()).sum()
    }

    /// Append a raw condition. `template` must contain exactly one `?` per value.
    pub fn push(&mut self, template: impl Into<String>, values: Vec<SqlValue>) -> &mut Self {
        let template = template.into();
        debug_assert_eq!(
            template.matches(SLOT).count(),
            values.len(),
            "slot count mismatch in `{template}`"
        );
        self.conditions.push(Condition { template, values });
        self
    }

    /// A condition with no bound values, e.g. `leave_date IS NULL`.
    pub fn condition(&mut self, fragment: &str) -> &mut Self {
        self.push(fragment, Vec::new())
    }

    /// `column = ?`
    pub fn eq(&mut self, column: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.push(format!("{column} = ?"), vec![value.into()])
    }

    /// `LOWER(column) = LOWER(?)`, for nominally case-insensitive codes.
    pub fn eq_ignore_case(&mut self, column: &str, value: &str) -> &mut Self {
        self.push(format!("LOWER({column}) = LOWER(?)"), vec![value.into()])
    }

    /// `column >= ?`
    pub fn gte(&mut self, column: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.push(format!("{column} >= ?"), vec![value.into()])
    }

    /// `column <= ?`
    pub fn lte(&mut self, column: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.push(format!("{column} <= ?"), vec![value.into()])
    }

    /// Case-insensitive partial match of `term` against any of `columns`.
    ///
    /// Each column gets its own slot holding `%term%`.
    pub fn search(&mut self, columns: &[&str], term: &str) -> &mut Self {
        let pattern = format!("%{term}%");
        let parts: Vec<String> = columns
            .iter()
            .map(|c| format!("LOWER({c}) LIKE LOWER(?)"))
            .collect();
        let values = columns
            .iter()
            .map(|_| SqlValue::from(pattern.as_str()))
            .collect();
        self.push(group_or(parts), values)
    }

    /// `(a = ? OR b = ?)` with the same value bound into a fresh slot per column.
    pub fn any_eq(&mut self, columns: &[&str], value: impl Into<SqlValue>) -> &mut Self {
        let value = value.into();
        let parts: Vec<String> = columns.iter().map(|c| format!("{c} = ?")).collect();
        let values = columns.iter().map(|_| value.clone()).collect();
        self.push(group_or(parts), values)
    }

    /// Render to `WHERE 1=1 AND ...` plus the argument list in slot order.
    pub fn render(&self) -> (String, Vec<SqlValue>) {
        let mut clause = String::from(BASE_WHERE);
        let mut args: Vec<SqlValue> = Vec::with_capacity(self.arg_count());

        for cond in &self.conditions {
            clause.push_str(" AND ");
            let mut values = cond.values.iter();
            for ch in cond.template.chars() {
                if ch == SLOT {
                    if let Some(v) = values.next() {
                        args.push(v.clone());
                        clause.push('$');
                        clause.push_str(&args.len().to_string());
                        continue;
                    }
                }
                clause.push(ch);
            }
        }

        (clause, args)
    }
}

fn group_or(parts: Vec<String>) -> String {
    if parts.len() == 1 {
        parts.into_iter().next().unwrap_or_default()
    } else {
        format!("({})", parts.join(" OR "))
    }
}

// ---------------------------------------------------------------------------
// List query
// ---------------------------------------------------------------------------

/// Where a listing reads from and how it is ordered.
#[derive(Debug, Clone, Copy)]
pub struct ListSource<'a> {
    pub table: &'a str,
    pub columns: &'a str,
    /// Must end with a unique tiebreaker so pages are stable.
    pub order_by: &'a str,
}

/// SQL text plus its arguments in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

/// Count and select queries sharing one rendered WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub where_clause: String,
    pub count: BuiltQuery,
    pub select: BuiltQuery,
}

impl ListQuery {
    pub fn build(source: ListSource<'_>, predicates: &Predicates, page: Pagination) -> Self {
        let (where_clause, args) = predicates.render();

        let count = BuiltQuery {
            sql: format!("SELECT COUNT(*) FROM {} {where_clause}", source.table),
            args: args.clone(),
        };

        let mut select_args = args;
        select_args.push(SqlValue::from(page.limit));
        select_args.push(SqlValue::from(page.offset));
        let limit_idx = select_args.len() - 1;
        let offset_idx = select_args.len();

        let select = BuiltQuery {
            sql: format!(
                "SELECT {} FROM {} {where_clause} ORDER BY {} LIMIT ${limit_idx} OFFSET ${offset_idx}",
                source.columns, source.table, source.order_by
            ),
            args: select_args,
        };

        Self {
            where_clause,
            count,
            select,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: ListSource<'static> = ListSource {
        table: "teams",
        columns: "id, name",
        order_by: "name ASC, id ASC",
    };

    #[test]
    fn empty_accumulator_renders_base_clause() {
        let (clause, args) = Predicates::new().render();
        assert_eq!(clause, "WHERE 1=1");
        assert!(args.is_empty());
    }

    #[test]
    fn placeholders_follow_running_argument_count() {
        let mut p = Predicates::new();
        p.eq("discipline_id", 7_i64).eq("is_verified", true);
        let (clause, args) = p.render();
        assert_eq!(
            clause,
            "WHERE 1=1 AND discipline_id = $1 AND is_verified = $2"
        );
        assert_eq!(args, vec![SqlValue::from(7_i64), SqlValue::from(true)]);
    }

    #[test]
    fn duplicated_value_gets_distinct_slots() {
        let mut p = Predicates::new();
        p.eq("tournament_id", 3_i64)
            .any_eq(&["team1_id", "team2_id"], 9_i64)
            .eq_ignore_case("stage", "Final");
        let (clause, args) = p.render();
        assert_eq!(
            clause,
            "WHERE 1=1 AND tournament_id = $1 AND (team1_id = $2 OR team2_id = $3) \
             AND LOWER(stage) = LOWER($4)"
        );
        assert_eq!(args.len(), 4);
        assert_eq!(args[1], args[2]);
    }

    #[test]
    fn search_wraps_term_and_lowercases_both_sides() {
        let mut p = Predicates::new();
        p.search(&["nickname", "real_name"], "astra");
        let (clause, args) = p.render();
        assert_eq!(
            clause,
            "WHERE 1=1 AND (LOWER(nickname) LIKE LOWER($1) OR LOWER(real_name) LIKE LOWER($2))"
        );
        assert_eq!(
            args,
            vec![SqlValue::from("%astra%"), SqlValue::from("%astra%")]
        );
    }

    #[test]
    fn single_column_search_has_no_parentheses() {
        let mut p = Predicates::new();
        p.search(&["name"], "major");
        let (clause, _) = p.render();
        assert_eq!(clause, "WHERE 1=1 AND LOWER(name) LIKE LOWER($1)");
    }

    #[test]
    fn valueless_condition_does_not_consume_a_slot() {
        let mut p = Predicates::new();
        p.condition("leave_date IS NULL").eq("team_id", 4_i64);
        let (clause, args) = p.render();
        assert_eq!(clause, "WHERE 1=1 AND leave_date IS NULL AND team_id = $1");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn count_and_select_share_the_where_clause() {
        let mut p = Predicates::new();
        p.search(&["name", "tag"], "navi").eq("is_verified", true);
        let q = ListQuery::build(SOURCE, &p, Pagination::new(10, 30));

        assert_eq!(
            q.count.sql,
            format!("SELECT COUNT(*) FROM teams {}", q.where_clause)
        );
        assert!(q.select.sql.contains(&q.where_clause));
        assert_eq!(q.select.args[..q.count.args.len()], q.count.args[..]);
    }

    #[test]
    fn limit_and_offset_follow_last_predicate_slot() {
        let mut p = Predicates::new();
        p.eq("discipline_id", 7_i64).eq("is_verified", true);
        let q = ListQuery::build(SOURCE, &p, Pagination::new(20, 0));

        assert_eq!(q.count.args.len(), 2);
        assert_eq!(q.select.args.len(), 4);
        assert!(q
            .select
            .sql
            .ends_with("ORDER BY name ASC, id ASC LIMIT $3 OFFSET $4"));
        assert_eq!(q.select.args[2], SqlValue::from(20_i64));
        assert_eq!(q.select.args[3], SqlValue::from(0_i64));
    }

    #[test]
    fn unfiltered_list_query_binds_only_paging() {
        let q = ListQuery::build(SOURCE, &Predicates::new(), Pagination::default());
        assert_eq!(q.count.sql, "SELECT COUNT(*) FROM teams WHERE 1=1");
        assert!(q.count.args.is_empty());
        assert_eq!(
            q.select.sql,
            "SELECT id, name FROM teams WHERE 1=1 ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn option_conversions_keep_type_for_null() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::BigInt(None));
        assert_eq!(SqlValue::from(None::<&str>), SqlValue::Text(None));
        assert_eq!(SqlValue::from(None::<Date>), SqlValue::Date(None));
    }
}
