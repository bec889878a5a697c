//! Generic CRUD over any [`Record`].

use arena_core::pagination::{Page, Pagination};
use arena_core::query::{ListQuery, SqlValue};
use arena_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::bind::to_arguments;
use crate::error::{DataError, DataResult};
use crate::record::{ListFilter, Record};

/// CRUD for every entity table, driven by its [`Record`] impl.
pub struct RecordRepo;

impl RecordRepo {
    /// Insert a row, returning it as stored (server-assigned columns filled).
    pub async fn create<R: Record>(pool: &PgPool, record: &R) -> DataResult<R> {
        let (query, values) = insert_sql::<R>(record.writable());
        let row = sqlx::query_as_with::<Postgres, R, _>(&query, to_arguments(&values)?)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Find a row by its key column.
    pub async fn find_by_id<R: Record>(pool: &PgPool, id: DbId) -> DataResult<R> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            R::COLUMNS,
            R::TABLE,
            R::KEY
        );
        sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| missing::<R>(id))
    }

    /// One page of rows matching `filter`, plus the total match count.
    ///
    /// `page` is used as given; callers normalize it first.
    pub async fn list<R: Record>(
        pool: &PgPool,
        filter: &R::Filter,
        page: Pagination,
    ) -> DataResult<Page<R>> {
        let predicates = filter.predicates();
        let q = ListQuery::build(R::list_source(), &predicates, page);

        let count_args = to_arguments(&q.count.args)?;
        let total = sqlx::query_scalar_with::<Postgres, i64, _>(&q.count.sql, count_args)
            .fetch_one(pool)
            .await?;

        let select_args = to_arguments(&q.select.args)?;
        let items = sqlx::query_as_with::<Postgres, R, _>(&q.select.sql, select_args)
            .fetch_all(pool)
            .await?;

        tracing::debug!(
            table = R::TABLE,
            conditions = predicates.len(),
            limit = page.limit,
            offset = page.offset,
            total,
            "Listed rows",
        );
        Ok(Page { items, total })
    }

    /// Replace every writable column of the row keyed by `id`.
    pub async fn update<R: Record>(pool: &PgPool, id: DbId, record: &R) -> DataResult<R> {
        let (query, values) = update_sql::<R>(id, record.writable());
        sqlx::query_as_with::<Postgres, R, _>(&query, to_arguments(&values)?)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| missing::<R>(id))
    }

    /// Delete the row keyed by `id`.
    pub async fn delete<R: Record>(pool: &PgPool, id: DbId) -> DataResult<()> {
        let query = format!("DELETE FROM {} WHERE {} = $1", R::TABLE, R::KEY);
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        if result.rows_affected() > 0 {
            Ok(())
        } else {
            Err(missing::<R>(id))
        }
    }
}

fn missing<R: Record>(id: DbId) -> DataError {
    tracing::debug!(table = R::TABLE, key = R::KEY, id, "Row not found");
    DataError::not_found(R::ENTITY, id)
}

fn insert_sql<R: Record>(writable: Vec<(&'static str, SqlValue)>) -> (String, Vec<SqlValue>) {
    let mut columns = Vec::with_capacity(writable.len());
    let mut slots = Vec::with_capacity(writable.len());
    let mut values = Vec::with_capacity(writable.len());
    for (idx, (column, value)) in writable.into_iter().enumerate() {
        columns.push(column);
        slots.push(format!("${}", idx + 1));
        values.push(value);
    }
    let query = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        R::TABLE,
        columns.join(", "),
        slots.join(", "),
        R::COLUMNS
    );
    (query, values)
}

/// `$1` is the key; writable columns other than the key follow from `$2`.
fn update_sql<R: Record>(id: DbId, writable: Vec<(&'static str, SqlValue)>) -> (String, Vec<SqlValue>) {
    let mut sets = Vec::with_capacity(writable.len());
    let mut values = vec![SqlValue::from(id)];
    for (column, value) in writable.into_iter().filter(|(c, _)| *c != R::KEY) {
        values.push(value);
        sets.push(format!("{column} = ${}", values.len()));
    }
    let query = format!(
        "UPDATE {} SET {} WHERE {} = $1 RETURNING {}",
        R::TABLE,
        sets.join(", "),
        R::KEY,
        R::COLUMNS
    );
    (query, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::Team;
    use crate::models::team_profile::TeamProfile;

    fn team() -> Team {
        Team {
            id: 0,
            name: "Natus Vincere".into(),
            tag: "NAVI".into(),
            country_code: "UA".into(),
            discipline_id: 1,
            created_at: None,
            logo_url: None,
            world_ranking: 1.0,
            is_verified: true,
        }
    }

    #[test]
    fn insert_lists_writable_columns_only() {
        let (sql, values) = insert_sql::<Team>(team().writable());
        assert_eq!(
            sql,
            format!(
                "INSERT INTO teams (name, tag, country_code, discipline_id, logo_url, \
                 world_ranking, is_verified) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
                Team::COLUMNS
            )
        );
        assert_eq!(values.len(), 7);
    }

    #[test]
    fn update_binds_key_first() {
        let (sql, values) = update_sql::<Team>(42, team().writable());
        assert!(sql.starts_with("UPDATE teams SET name = $2, tag = $3"));
        assert!(sql.contains("WHERE id = $1 RETURNING"));
        assert_eq!(values[0], SqlValue::from(42_i64));
        assert_eq!(values.len(), 8);
    }

    #[test]
    fn update_skips_caller_supplied_key_column() {
        let profile = TeamProfile {
            team_id: 5,
            coach_name: Some("xoma".into()),
            sponsor_info: None,
            headquarters: None,
            website: None,
            contact_email: None,
        };
        let (sql, values) = update_sql::<TeamProfile>(5, profile.writable());
        assert!(sql.starts_with("UPDATE team_profiles SET coach_name = $2,"));
        assert!(sql.contains("WHERE team_id = $1"));
        assert_eq!(values.len(), 6);
    }
}
