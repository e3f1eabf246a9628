//! Shared helper utilities for sqlx-backed adapters.

use sqlx::Row;

use crate::error::{DbScribeError, Result};

/// Extension trait adding error-contextualized field extraction to
/// sqlx rows.
///
/// Catalog queries alias every column to a stable name, so extraction
/// is always by name. Decode failures wrap the field and table names to
/// make driver type mismatches diagnosable from the error alone.
pub trait RowExt: Row {
    /// Reads one named field from the row.
    ///
    /// # Errors
    /// Returns a query error naming the field (and table, when known)
    /// if the column is absent or fails to decode.
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, Self::Database> + sqlx::Type<Self::Database>,
        for<'s> &'s str: sqlx::ColumnIndex<Self>;
}

impl<R: Row> RowExt for R {
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, Self::Database> + sqlx::Type<Self::Database>,
        for<'s> &'s str: sqlx::ColumnIndex<Self>,
    {
        self.try_get(field_name)
            .map_err(|e| DbScribeError::parse_field(field_name, table_context, e))
    }
}
