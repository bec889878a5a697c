//! Binding [`SqlValue`] lists onto sqlx argument buffers.

use arena_core::query::SqlValue;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// Build a Postgres argument buffer with one entry per value, in order.
pub fn to_arguments(values: &[SqlValue]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for value in values {
        push(&mut args, value)?;
    }
    Ok(args)
}

fn push(args: &mut PgArguments, value: &SqlValue) -> Result<(), sqlx::Error> {
    let result = match value {
        SqlValue::BigInt(v) => args.add(*v),
        SqlValue::Int(v) => args.add(*v),
        SqlValue::Float(v) => args.add(*v),
        SqlValue::Bool(v) => args.add(*v),
        SqlValue::Text(v) => args.add(v.clone()),
        SqlValue::Date(v) => args.add(*v),
        SqlValue::Timestamp(v) => args.add(*v),
        SqlValue::Json(v) => args.add(v.clone()),
    };
    result.map_err(sqlx::Error::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_value_becomes_one_argument() {
        let values = vec![
            SqlValue::from(7_i64),
            SqlValue::from(true),
            SqlValue::from("%navi%"),
            SqlValue::from(None::<String>),
        ];
        let args = to_arguments(&values).unwrap();
        assert_eq!(args.len(), 4);
    }
}
