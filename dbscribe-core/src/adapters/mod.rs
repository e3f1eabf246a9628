//! Database adapter trait and factory for unified catalog access.
//!
//! This module defines the object-safe trait every dialect adapter
//! implements to enumerate tables and columns through
//! `information_schema`, plus the static type vocabulary used to
//! classify raw column types.
//!
//! # Module Structure
//! - `helpers`: Shared row extraction utilities for sqlx-backed adapters
//! - Dialect-specific modules (`postgres`, `mysql`, `mssql`)

use async_trait::async_trait;

use crate::config::ConnectionParams;
use crate::error::Result;
use crate::models::{Column, Dialect, Table, TypeCategory};

/// Static lookup table mapping raw catalog type names to categories.
///
/// Each dialect carries one of these as a constant. Lookups are
/// case-insensitive and walk the lists in a fixed order, so a name
/// accidentally present in two lists resolves to the earlier category.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub string: &'static [&'static str],
    pub text: &'static [&'static str],
    pub integer: &'static [&'static str],
    pub float: &'static [&'static str],
    pub temporal: &'static [&'static str],
    pub boolean: &'static [&'static str],
}

impl Vocabulary {
    fn matches(list: &[&str], data_type: &str) -> bool {
        let lowered = data_type.to_ascii_lowercase();
        list.contains(&lowered.as_str())
    }

    /// Classifies a raw type name, falling back to `Unknown` for
    /// anything outside the vocabulary.
    pub fn classify(&self, data_type: &str) -> TypeCategory {
        if Self::matches(self.string, data_type) {
            TypeCategory::String
        } else if Self::matches(self.text, data_type) {
            TypeCategory::Text
        } else if Self::matches(self.integer, data_type) {
            TypeCategory::Integer
        } else if Self::matches(self.float, data_type) {
            TypeCategory::Float
        } else if Self::matches(self.temporal, data_type) {
            TypeCategory::Temporal
        } else if Self::matches(self.boolean, data_type) {
            TypeCategory::Boolean
        } else {
            TypeCategory::Unknown
        }
    }
}

/// Main trait for dialect adapters with object-safe design.
///
/// # Security Guarantees
/// - All operations are read-only catalog queries
/// - Credentials are never stored beyond the driver configuration
/// - Connection details are sanitized in error messages
///
/// # Object Safety
/// This trait is object-safe, allowing for dynamic dispatch through
/// `Box<dyn CatalogAdapter>`.
#[async_trait]
pub trait CatalogAdapter: Send + Sync + std::fmt::Debug {
    /// Returns the dialect this adapter speaks.
    fn dialect(&self) -> Dialect;

    /// Returns the static type vocabulary for this dialect.
    fn vocabulary(&self) -> &'static Vocabulary;

    /// Tests the database connection without touching the catalog.
    ///
    /// # Errors
    /// Returns error if the connection cannot execute a trivial query
    async fn test_connection(&self) -> Result<()>;

    /// Prepares the column query once, so malformed catalog SQL fails
    /// before any table is processed. Dialects without client-side
    /// statement preparation treat this as a no-op.
    async fn prepare_column_query(&self) -> Result<()>;

    /// Lists base tables in the configured schema, alphabetically.
    async fn list_tables(&self) -> Result<Vec<Table>>;

    /// Lists views in the configured schema, alphabetically.
    async fn list_views(&self) -> Result<Vec<Table>>;

    /// Lists the columns of one table in ordinal order, already
    /// classified into type categories.
    async fn list_columns(&self, table_name: &str) -> Result<Vec<Column>>;

    /// True when the key metadata string marks a primary key member.
    fn is_primary_key(&self, key_metadata: &str) -> bool;

    /// True when the extra metadata string marks an auto-incremented
    /// column.
    fn is_auto_increment(&self, extra_metadata: &str) -> bool;

    /// True when the raw type is a bounded string type.
    fn is_string(&self, data_type: &str) -> bool {
        Vocabulary::matches(self.vocabulary().string, data_type)
    }

    /// True when the raw type is an unbounded text or blob type.
    fn is_text(&self, data_type: &str) -> bool {
        Vocabulary::matches(self.vocabulary().text, data_type)
    }

    /// True when the raw type is an integer type.
    fn is_integer(&self, data_type: &str) -> bool {
        Vocabulary::matches(self.vocabulary().integer, data_type)
    }

    /// True when the raw type is a fixed or floating point type.
    fn is_float(&self, data_type: &str) -> bool {
        Vocabulary::matches(self.vocabulary().float, data_type)
    }

    /// True when the raw type is a date, time, or timestamp type.
    fn is_temporal(&self, data_type: &str) -> bool {
        Vocabulary::matches(self.vocabulary().temporal, data_type)
    }

    /// Classifies a raw type through the dialect vocabulary.
    fn classify(&self, data_type: &str) -> TypeCategory {
        self.vocabulary().classify(data_type)
    }
}

/// Factory function to create a catalog adapter for the configured
/// dialect.
///
/// # Arguments
/// * `params` - Connection parameters (credentials sanitized in errors)
///
/// # Returns
/// Boxed catalog adapter for dynamic dispatch
///
/// # Errors
/// Returns error if:
/// - Connection parameters fail validation
/// - The initial connection fails (SQL Server connects eagerly)
/// - The requested dialect is not compiled in
pub async fn create_adapter(params: &ConnectionParams) -> Result<Box<dyn CatalogAdapter>> {
    params.validate()?;

    match params.dialect {
        #[cfg(feature = "postgresql")]
        Dialect::PostgreSQL => {
            let adapter = postgres::PostgresAdapter::connect(params)?;
            Ok(Box::new(adapter))
        }
        #[cfg(not(feature = "postgresql"))]
        Dialect::PostgreSQL => Err(crate::error::DbScribeError::configuration(
            "PostgreSQL support not compiled in. Use --features postgresql",
        )),
        #[cfg(feature = "mysql")]
        Dialect::MySQL => {
            let adapter = mysql::MySqlAdapter::connect(params)?;
            Ok(Box::new(adapter))
        }
        #[cfg(not(feature = "mysql"))]
        Dialect::MySQL => Err(crate::error::DbScribeError::configuration(
            "MySQL support not compiled in. Use --features mysql",
        )),
        Dialect::SqlServer => {
            #[cfg(feature = "mssql")]
            {
                let adapter = mssql::MsSqlAdapter::connect(params).await?;
                Ok(Box::new(adapter))
            }
            #[cfg(not(feature = "mssql"))]
            {
                Err(crate::error::DbScribeError::configuration(
                    "SQL Server support not compiled in. Use --features mssql",
                ))
            }
        }
    }
}

/// Safely redacts credentials from database connection URLs.
///
/// # Note
/// This function delegates to `crate::error::redact_database_url` for
/// consistency. Invalid URLs are fully redacted as "<redacted>".
#[inline]
pub fn redact_database_url(url: &str) -> String {
    crate::error::redact_database_url(url)
}

// Shared helper utilities for sqlx-backed adapters
#[cfg(any(feature = "postgresql", feature = "mysql"))]
pub mod helpers;

// Dialect-specific adapter modules
#[cfg(feature = "postgresql")]
pub mod postgres;

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "mssql")]
pub mod mssql;
