//! Core data models for database schema representation.
//!
//! This module defines the unified data structures used to represent
//! the catalog read from a live database, along with the dialect
//! enumeration that drives adapter selection. All models are designed
//! to be serializable for schema dumps.

use serde::{Deserialize, Serialize};

use crate::error::DbScribeError;

/// Supported database dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    PostgreSQL,
    MySQL,
    SqlServer,
}

impl Dialect {
    /// Default TCP port used when the connection does not specify one.
    pub const fn default_port(self) -> u16 {
        match self {
            Dialect::PostgreSQL => 5432,
            Dialect::MySQL => 3306,
            Dialect::SqlServer => 1433,
        }
    }

    /// Default login user used when the connection does not specify one.
    pub const fn default_user(self) -> &'static str {
        match self {
            Dialect::PostgreSQL => "postgres",
            Dialect::MySQL => "root",
            Dialect::SqlServer => "sa",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::PostgreSQL => write!(f, "PostgreSQL"),
            Dialect::MySQL => write!(f, "MySQL"),
            Dialect::SqlServer => write!(f, "SQL Server"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = DbScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Ok(Dialect::PostgreSQL),
            "mysql" => Ok(Dialect::MySQL),
            "mssql" | "sqlserver" => Ok(Dialect::SqlServer),
            other => Err(DbScribeError::configuration(format!(
                "Unsupported database type '{other}' (expected pg, mysql, or mssql)"
            ))),
        }
    }
}

/// Classification of a raw column type into the categories the Go type
/// mapper understands. Raw types outside the per-dialect vocabulary
/// land in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    /// Bounded character types (varchar, char, ...)
    String,
    /// Unbounded character and blob types
    Text,
    /// Integer types of any width
    Integer,
    /// Fixed and floating point numeric types
    Float,
    /// Date, time, and timestamp types
    Temporal,
    /// Boolean types
    Boolean,
    /// Anything outside the dialect vocabulary
    Unknown,
}

/// Whether a relation is a base table or a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    Table,
    View,
}

/// Database column information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub category: TypeCategory,
    pub is_nullable: bool,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub default_value: Option<String>,
    pub max_char_length: Option<i64>,
    pub numeric_precision: Option<i64>,
    pub ordinal_position: u32,
}

/// Database table information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub kind: TableKind,
    pub columns: Vec<Column>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::PostgreSQL.to_string(), "PostgreSQL");
        assert_eq!(Dialect::MySQL.to_string(), "MySQL");
        assert_eq!(Dialect::SqlServer.to_string(), "SQL Server");
    }

    #[test]
    fn test_dialect_parse_aliases() {
        assert_eq!("pg".parse::<Dialect>().ok(), Some(Dialect::PostgreSQL));
        assert_eq!(
            "postgresql".parse::<Dialect>().ok(),
            Some(Dialect::PostgreSQL)
        );
        assert_eq!("MySQL".parse::<Dialect>().ok(), Some(Dialect::MySQL));
        assert_eq!("sqlserver".parse::<Dialect>().ok(), Some(Dialect::SqlServer));
        assert_eq!("mssql".parse::<Dialect>().ok(), Some(Dialect::SqlServer));
    }

    #[test]
    fn test_dialect_parse_rejects_unknown() {
        let error = "oracle".parse::<Dialect>().unwrap_err();
        assert!(error.to_string().contains("oracle"));
    }

    #[test]
    fn test_dialect_defaults() {
        assert_eq!(Dialect::PostgreSQL.default_port(), 5432);
        assert_eq!(Dialect::MySQL.default_port(), 3306);
        assert_eq!(Dialect::SqlServer.default_port(), 1433);
        assert_eq!(Dialect::PostgreSQL.default_user(), "postgres");
        assert_eq!(Dialect::MySQL.default_user(), "root");
        assert_eq!(Dialect::SqlServer.default_user(), "sa");
    }
}
