//! SQL Server catalog adapter.
//!
//! Uses tiberius over a tokio TCP stream. The client is a single
//! connection rather than a pool, so it is opened eagerly at
//! construction and serialized behind a mutex for the sequential
//! catalog queries.
//!
//! `information_schema.columns` on SQL Server exposes no key or
//! identity metadata, so the key predicates always see empty metadata
//! strings and generated structs never carry primary key or
//! auto-increment markers for this dialect.

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

use super::{CatalogAdapter, Vocabulary};
use crate::config::ConnectionParams;
use crate::error::{DbScribeError, Result};
use crate::models::{Column, Dialect, Table, TableKind};

const VOCABULARY: Vocabulary = Vocabulary {
    string: &["char", "varchar", "nchar", "nvarchar", "binary", "varbinary"],
    text: &["text", "ntext"],
    integer: &["tinyint", "smallint", "int", "bigint"],
    float: &["numeric", "decimal", "float", "real", "money", "smallmoney"],
    temporal: &[
        "time",
        "date",
        "datetime",
        "datetime2",
        "smalldatetime",
        "datetimeoffset",
    ],
    boolean: &["bit"],
};

const TABLES_QUERY: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_type = 'BASE TABLE' AND table_schema = @P1 \
     ORDER BY table_name";

const VIEWS_QUERY: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_type = 'VIEW' AND table_schema = @P1 \
     ORDER BY table_name";

const COLUMNS_QUERY: &str = r"
SELECT
    CAST(c.ordinal_position AS INT) AS ordinal_position,
    c.column_name,
    c.data_type,
    c.is_nullable,
    c.column_default,
    CAST(c.character_maximum_length AS BIGINT) AS character_maximum_length,
    CAST(c.numeric_precision AS BIGINT) AS numeric_precision
FROM information_schema.columns c
WHERE c.table_schema = @P1 AND c.table_name = @P2
ORDER BY c.ordinal_position
";

/// SQL Server adapter holding one eagerly opened tiberius client.
#[derive(Debug)]
pub struct MsSqlAdapter {
    client: Mutex<Client<Compat<TcpStream>>>,
    schema: String,
}

impl MsSqlAdapter {
    /// Connects eagerly; tiberius has no lazy client.
    ///
    /// # Errors
    /// Returns error if the TCP connection or the TDS handshake fails
    pub async fn connect(params: &ConnectionParams) -> Result<Self> {
        let mut config = Config::new();
        config.host(&params.host);
        config.port(params.effective_port());
        config.database(&params.database);
        config.authentication(AuthMethod::sql_server(
            params.effective_user(),
            &params.password,
        ));
        // Local development servers present self-signed certificates.
        config.trust_cert();

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(DbScribeError::connection_failed)?;
        tcp.set_nodelay(true)
            .map_err(DbScribeError::connection_failed)?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(DbScribeError::connection_failed)?;

        Ok(Self {
            client: Mutex::new(client),
            schema: params.effective_schema().to_string(),
        })
    }

    async fn fetch_relations(&self, kind: TableKind) -> Result<Vec<Table>> {
        let (query, label) = match kind {
            TableKind::Table => (TABLES_QUERY, "tables"),
            TableKind::View => (VIEWS_QUERY, "views"),
        };
        let schema = self.schema.as_str();

        let mut client = self.client.lock().await;
        let rows = client
            .query(query, &[&schema])
            .await
            .map_err(|e| {
                DbScribeError::query_failed(format!("listing {label} in schema '{schema}'"), e)
            })?
            .into_first_result()
            .await
            .map_err(|e| DbScribeError::query_failed(format!("reading {label} result"), e))?;

        let mut relations = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: Option<&str> = row
                .try_get("table_name")
                .map_err(|e| DbScribeError::parse_field("table_name", None, e))?;
            relations.push(Table {
                name: name.unwrap_or_default().to_string(),
                kind,
                columns: Vec::new(),
            });
        }

        debug!("Found {} {} in schema {}", relations.len(), label, schema);
        Ok(relations)
    }
}

#[async_trait]
impl CatalogAdapter for MsSqlAdapter {
    fn dialect(&self) -> Dialect {
        Dialect::SqlServer
    }

    fn vocabulary(&self) -> &'static Vocabulary {
        &VOCABULARY
    }

    async fn test_connection(&self) -> Result<()> {
        let mut client = self.client.lock().await;
        client
            .simple_query("SELECT 1")
            .await
            .map_err(DbScribeError::connection_failed)?
            .into_first_result()
            .await
            .map_err(DbScribeError::connection_failed)?;
        Ok(())
    }

    // tiberius prepares on execute through sp_executesql, so there is
    // nothing to prepare ahead of time.
    async fn prepare_column_query(&self) -> Result<()> {
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<Table>> {
        self.fetch_relations(TableKind::Table).await
    }

    async fn list_views(&self) -> Result<Vec<Table>> {
        self.fetch_relations(TableKind::View).await
    }

    async fn list_columns(&self, table_name: &str) -> Result<Vec<Column>> {
        let schema = self.schema.as_str();

        let mut client = self.client.lock().await;
        let rows = client
            .query(COLUMNS_QUERY, &[&schema, &table_name])
            .await
            .map_err(|e| {
                DbScribeError::query_failed(format!("listing columns of table '{table_name}'"), e)
            })?
            .into_first_result()
            .await
            .map_err(|e| {
                DbScribeError::query_failed(format!("reading columns of table '{table_name}'"), e)
            })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let ordinal: Option<i32> = row
                .try_get("ordinal_position")
                .map_err(|e| DbScribeError::parse_field("ordinal_position", Some(table_name), e))?;
            let name: Option<&str> = row
                .try_get("column_name")
                .map_err(|e| DbScribeError::parse_field("column_name", Some(table_name), e))?;
            let data_type: Option<&str> = row
                .try_get("data_type")
                .map_err(|e| DbScribeError::parse_field("data_type", Some(table_name), e))?;
            let is_nullable: Option<&str> = row
                .try_get("is_nullable")
                .map_err(|e| DbScribeError::parse_field("is_nullable", Some(table_name), e))?;
            let default_value: Option<&str> = row
                .try_get("column_default")
                .map_err(|e| DbScribeError::parse_field("column_default", Some(table_name), e))?;
            let max_char_length: Option<i64> = row.try_get("character_maximum_length").map_err(
                |e| DbScribeError::parse_field("character_maximum_length", Some(table_name), e),
            )?;
            let numeric_precision: Option<i64> = row
                .try_get("numeric_precision")
                .map_err(|e| DbScribeError::parse_field("numeric_precision", Some(table_name), e))?;

            let data_type = data_type.unwrap_or_default().to_string();
            columns.push(Column {
                category: self.classify(&data_type),
                is_primary_key: self.is_primary_key(""),
                is_auto_increment: self.is_auto_increment(""),
                name: name.unwrap_or_default().to_string(),
                data_type,
                is_nullable: is_nullable.unwrap_or_default() == "YES",
                default_value: default_value.map(str::to_string),
                max_char_length,
                numeric_precision,
                ordinal_position: ordinal
                    .and_then(|o| u32::try_from(o).ok())
                    .unwrap_or_default(),
            });
        }

        debug!("Table {} has {} columns", table_name, columns.len());
        Ok(columns)
    }

    fn is_primary_key(&self, key_metadata: &str) -> bool {
        key_metadata.contains("PRI")
    }

    fn is_auto_increment(&self, extra_metadata: &str) -> bool {
        extra_metadata
            .to_ascii_lowercase()
            .contains("auto_increment")
    }
}
