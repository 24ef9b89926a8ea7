//! Coupon Repositories

use std::{error::Error as StdError, str::FromStr};

use sqlx::{Row, sqlite::SqliteRow};

pub(crate) mod coupons;
pub(crate) mod details;

/// Decode a text column into any type that parses from a string.
fn parse_column<T>(row: &SqliteRow, column: &'static str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;

    raw.parse().map_err(|e| column_error(column, e))
}

fn column_error<E>(column: &'static str, source: E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}
