//! Mapping from type categories to Go field types.
//!
//! The mapping is total: every (category, nullability) pair yields a
//! concrete Go type. Nullable columns map to the corresponding
//! `database/sql` null wrapper so scans never fail on NULL, and unknown
//! categories fall back to `sql.NullString` regardless of nullability.

use crate::models::TypeCategory;

/// A Go type together with the import path it requires, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    pub go_type: &'static str,
    pub import: Option<&'static str>,
}

const NULL_STRING: FieldType = FieldType {
    go_type: "sql.NullString",
    import: Some("database/sql"),
};

/// Chooses the Go type for one column.
pub fn map_go_type(category: TypeCategory, is_nullable: bool) -> FieldType {
    match (category, is_nullable) {
        (TypeCategory::String | TypeCategory::Text, false) => FieldType {
            go_type: "string",
            import: None,
        },
        (TypeCategory::String | TypeCategory::Text, true) => NULL_STRING,
        (TypeCategory::Integer, false) => FieldType {
            go_type: "int",
            import: None,
        },
        (TypeCategory::Integer, true) => FieldType {
            go_type: "sql.NullInt64",
            import: Some("database/sql"),
        },
        (TypeCategory::Float, false) => FieldType {
            go_type: "float64",
            import: None,
        },
        (TypeCategory::Float, true) => FieldType {
            go_type: "sql.NullFloat64",
            import: Some("database/sql"),
        },
        (TypeCategory::Temporal, false) => FieldType {
            go_type: "time.Time",
            import: Some("time"),
        },
        (TypeCategory::Temporal, true) => FieldType {
            go_type: "pq.NullTime",
            import: Some("github.com/lib/pq"),
        },
        (TypeCategory::Boolean, false) => FieldType {
            go_type: "bool",
            import: None,
        },
        (TypeCategory::Boolean, true) => FieldType {
            go_type: "sql.NullBool",
            import: Some("database/sql"),
        },
        (TypeCategory::Unknown, _) => NULL_STRING,
    }
}
