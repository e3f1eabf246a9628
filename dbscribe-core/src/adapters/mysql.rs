//! MySQL catalog adapter.
//!
//! Catalog strings are read through `CAST(... AS CHAR)` so MySQL 8
//! servers return them as utf8 text instead of binary collation blobs.
//! Primary key and auto-increment markers come straight from the
//! `column_key` and `extra` catalog columns.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::debug;

use super::helpers::RowExt;
use super::{CatalogAdapter, Vocabulary};
use crate::config::ConnectionParams;
use crate::error::{DbScribeError, Result};
use crate::models::{Column, Dialect, Table, TableKind};

const VOCABULARY: Vocabulary = Vocabulary {
    string: &["char", "varchar", "binary", "varbinary"],
    text: &[
        "text",
        "tinytext",
        "mediumtext",
        "longtext",
        "blob",
        "tinyblob",
        "mediumblob",
        "longblob",
    ],
    integer: &["tinyint", "smallint", "mediumint", "int", "bigint"],
    float: &["numeric", "decimal", "float", "real", "double", "double precision"],
    temporal: &["date", "datetime", "timestamp", "time", "year"],
    boolean: &["boolean", "bool"],
};

const TABLES_QUERY: &str = "SELECT CAST(table_name AS CHAR) AS table_name \
     FROM information_schema.tables \
     WHERE table_type = 'BASE TABLE' AND table_schema = ? \
     ORDER BY table_name";

const VIEWS_QUERY: &str = "SELECT CAST(table_name AS CHAR) AS table_name \
     FROM information_schema.tables \
     WHERE table_type = 'VIEW' AND table_schema = ? \
     ORDER BY table_name";

const COLUMNS_QUERY: &str = r"
SELECT
    CAST(c.ordinal_position AS SIGNED) AS ordinal_position,
    CAST(c.column_name AS CHAR) AS column_name,
    CAST(c.data_type AS CHAR) AS data_type,
    CAST(c.is_nullable AS CHAR) AS is_nullable,
    CAST(c.column_default AS CHAR) AS column_default,
    CAST(c.character_maximum_length AS SIGNED) AS character_maximum_length,
    CAST(c.numeric_precision AS SIGNED) AS numeric_precision,
    CAST(c.column_key AS CHAR) AS column_key,
    CAST(c.extra AS CHAR) AS extra
FROM information_schema.columns c
WHERE c.table_schema = ? AND c.table_name = ?
ORDER BY c.ordinal_position
";

/// MySQL adapter backed by a single lazily opened connection.
#[derive(Debug)]
pub struct MySqlAdapter {
    pool: MySqlPool,
    schema: String,
}

impl MySqlAdapter {
    /// Creates the adapter with a lazily connecting pool.
    ///
    /// # Errors
    /// Returns error if the connection URL cannot be built or parsed
    pub fn connect(params: &ConnectionParams) -> Result<Self> {
        let url = params.connect_url()?;
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_lazy(&url)
            .map_err(|e| DbScribeError::Connection {
                context: format!(
                    "Failed to create MySQL connection pool to {}",
                    crate::adapters::redact_database_url(&url)
                ),
                source: Box::new(e),
            })?;

        Ok(Self {
            pool,
            schema: params.effective_schema().to_string(),
        })
    }

    async fn fetch_relations(&self, query: &str, kind: TableKind) -> Result<Vec<Table>> {
        let label = match kind {
            TableKind::Table => "tables",
            TableKind::View => "views",
        };

        let rows = sqlx::query(query)
            .bind(&self.schema)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DbScribeError::query_failed(
                    format!("listing {} in schema '{}'", label, self.schema),
                    e,
                )
            })?;

        let mut relations = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.get_field("table_name", None)?;
            relations.push(Table {
                name,
                kind,
                columns: Vec::new(),
            });
        }

        debug!("Found {} {} in schema {}", relations.len(), label, self.schema);
        Ok(relations)
    }
}

#[async_trait]
impl CatalogAdapter for MySqlAdapter {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &VOCABULARY
    }

    async fn test_connection(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(DbScribeError::connection_failed)?;
        Ok(())
    }

    async fn prepare_column_query(&self) -> Result<()> {
        use sqlx::Executor;

        (&self.pool)
            .prepare(COLUMNS_QUERY)
            .await
            .map_err(|e| DbScribeError::query_failed("preparing the column catalog query", e))?;
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<Table>> {
        self.fetch_relations(TABLES_QUERY, TableKind::Table).await
    }

    async fn list_views(&self) -> Result<Vec<Table>> {
        self.fetch_relations(VIEWS_QUERY, TableKind::View).await
    }

    async fn list_columns(&self, table_name: &str) -> Result<Vec<Column>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(&self.schema)
            .bind(table_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DbScribeError::query_failed(
                    format!("listing columns of table '{table_name}'"),
                    e,
                )
            })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let ordinal: i64 = row.get_field("ordinal_position", Some(table_name))?;
            let name: String = row.get_field("column_name", Some(table_name))?;
            let data_type: String = row.get_field("data_type", Some(table_name))?;
            let is_nullable: String = row.get_field("is_nullable", Some(table_name))?;
            let default_value: Option<String> = row.get_field("column_default", Some(table_name))?;
            let max_char_length: Option<i64> =
                row.get_field("character_maximum_length", Some(table_name))?;
            let numeric_precision: Option<i64> =
                row.get_field("numeric_precision", Some(table_name))?;
            let column_key: String = row.get_field("column_key", Some(table_name))?;
            let extra: String = row.get_field("extra", Some(table_name))?;

            columns.push(Column {
                category: self.classify(&data_type),
                is_primary_key: self.is_primary_key(&column_key),
                is_auto_increment: self.is_auto_increment(&extra),
                name,
                data_type,
                is_nullable: is_nullable == "YES",
                default_value,
                max_char_length,
                numeric_precision,
                ordinal_position: u32::try_from(ordinal).unwrap_or_default(),
            });
        }

        debug!("Table {} has {} columns", table_name, columns.len());
        Ok(columns)
    }

    fn is_primary_key(&self, key_metadata: &str) -> bool {
        key_metadata.contains("PRI")
    }

    fn is_auto_increment(&self, extra_metadata: &str) -> bool {
        extra_metadata.to_ascii_lowercase().contains("auto_increment")
    }
}
