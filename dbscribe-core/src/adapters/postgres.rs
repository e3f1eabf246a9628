//! PostgreSQL catalog adapter.
//!
//! Reads `information_schema` through a lazy sqlx pool. Primary key
//! membership comes from joining `table_constraints` with
//! `key_column_usage`; auto-increment detection relies on the serial
//! `nextval(...)` column default.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use super::helpers::RowExt;
use super::{CatalogAdapter, Vocabulary};
use crate::config::ConnectionParams;
use crate::error::{DbScribeError, Result};
use crate::models::{Column, Dialect, Table, TableKind};

const VOCABULARY: Vocabulary = Vocabulary {
    string: &["character varying", "varchar", "character", "char"],
    text: &["text"],
    integer: &["smallint", "integer", "bigint"],
    float: &["numeric", "decimal", "real", "double precision"],
    temporal: &[
        "time",
        "timestamp",
        "date",
        "time with time zone",
        "time without time zone",
        "timestamp with time zone",
        "timestamp without time zone",
    ],
    boolean: &["boolean"],
};

const TABLES_QUERY: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_type = 'BASE TABLE' AND table_schema = $1 \
     ORDER BY table_name";

const VIEWS_QUERY: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_type = 'VIEW' AND table_schema = $1 \
     ORDER BY table_name";

const COLUMNS_QUERY: &str = r"
SELECT
    c.ordinal_position::int AS ordinal_position,
    c.column_name,
    c.data_type,
    c.is_nullable,
    c.column_default,
    c.character_maximum_length::bigint AS character_maximum_length,
    c.numeric_precision::bigint AS numeric_precision,
    COALESCE(pk.constraint_type, '') AS constraint_type
FROM information_schema.columns c
LEFT JOIN (
    SELECT kcu.column_name, kcu.table_name, kcu.table_schema, tc.constraint_type
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
        ON tc.constraint_name = kcu.constraint_name
        AND tc.table_schema = kcu.table_schema
    WHERE tc.constraint_type = 'PRIMARY KEY'
) pk ON pk.column_name = c.column_name
    AND pk.table_name = c.table_name
    AND pk.table_schema = c.table_schema
WHERE c.table_schema = $1 AND c.table_name = $2
ORDER BY c.ordinal_position
";

/// PostgreSQL adapter backed by a single lazily opened connection.
#[derive(Debug)]
pub struct PostgresAdapter {
    pool: PgPool,
    schema: String,
}

impl PostgresAdapter {
    /// Creates the adapter with a lazily connecting pool.
    ///
    /// No network traffic happens here; the first catalog query opens
    /// the pooled connection.
    ///
    /// # Errors
    /// Returns error if the connection URL cannot be built or parsed
    pub fn connect(params: &ConnectionParams) -> Result<Self> {
        use sqlx::Executor;

        let url = params.connect_url()?;
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            // Apply session settings to every pooled connection
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute("SET statement_timeout = '30s'").await?;

                    let app_name = format!("dbscribe-gen-{}", env!("CARGO_PKG_VERSION"));
                    conn.execute(format!("SET application_name = '{}'", app_name).as_str())
                        .await?;

                    Ok(())
                })
            })
            .connect_lazy(&url)
            .map_err(|e| DbScribeError::Connection {
                context: format!(
                    "Failed to create PostgreSQL connection pool to {}",
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
impl CatalogAdapter for PostgresAdapter {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
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
            let ordinal: i32 = row.get_field("ordinal_position", Some(table_name))?;
            let name: String = row.get_field("column_name", Some(table_name))?;
            let data_type: String = row.get_field("data_type", Some(table_name))?;
            let is_nullable: String = row.get_field("is_nullable", Some(table_name))?;
            let default_value: Option<String> = row.get_field("column_default", Some(table_name))?;
            let max_char_length: Option<i64> =
                row.get_field("character_maximum_length", Some(table_name))?;
            let numeric_precision: Option<i64> =
                row.get_field("numeric_precision", Some(table_name))?;
            let constraint_type: String = row.get_field("constraint_type", Some(table_name))?;

            columns.push(Column {
                category: self.classify(&data_type),
                is_primary_key: self.is_primary_key(&constraint_type),
                is_auto_increment: self
                    .is_auto_increment(default_value.as_deref().unwrap_or_default()),
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
        key_metadata == "PRIMARY KEY"
    }

    // Serial columns surface as a nextval() default on their sequence.
    fn is_auto_increment(&self, extra_metadata: &str) -> bool {
        extra_metadata.starts_with("nextval(")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::TypeCategory;

    #[test]
    fn test_vocabulary_classification() {
        assert_eq!(
            VOCABULARY.classify("character varying"),
            TypeCategory::String
        );
        assert_eq!(VOCABULARY.classify("char"), TypeCategory::String);
        assert_eq!(VOCABULARY.classify("text"), TypeCategory::Text);
        assert_eq!(VOCABULARY.classify("integer"), TypeCategory::Integer);
        assert_eq!(VOCABULARY.classify("bigint"), TypeCategory::Integer);
        assert_eq!(VOCABULARY.classify("numeric"), TypeCategory::Float);
        assert_eq!(VOCABULARY.classify("double precision"), TypeCategory::Float);
        assert_eq!(
            VOCABULARY.classify("timestamp with time zone"),
            TypeCategory::Temporal
        );
        assert_eq!(VOCABULARY.classify("date"), TypeCategory::Temporal);
        assert_eq!(VOCABULARY.classify("boolean"), TypeCategory::Boolean);
        assert_eq!(VOCABULARY.classify("jsonb"), TypeCategory::Unknown);
        assert_eq!(VOCABULARY.classify("uuid"), TypeCategory::Unknown);
    }

    #[tokio::test]
    async fn test_predicates() {
        let adapter = PostgresAdapter::connect(&ConnectionParams::default()).unwrap();

        assert_eq!(adapter.dialect(), Dialect::PostgreSQL);
        assert!(adapter.is_primary_key("PRIMARY KEY"));
        assert!(!adapter.is_primary_key(""));
        assert!(adapter.is_auto_increment("nextval('users_id_seq'::regclass)"));
        assert!(!adapter.is_auto_increment("'draft'::character varying"));
        assert!(adapter.is_string("character varying"));
        assert!(adapter.is_temporal("timestamp without time zone"));
        assert!(!adapter.is_integer("numeric"));
    }
}
