//! Full-file generation tests over hand-built tables.
//!
//! These exercise naming, type mapping, tag generation, and import
//! collection together through the public rendering entry point.

use dbscribe_core::{
    Column, GenerationConfig, NamingStyle, Table, TableKind, TagKind, TagSet, TypeCategory,
    render_table,
};

fn column(name: &str, data_type: &str, category: TypeCategory) -> Column {
    Column {
        name: name.to_string(),
        data_type: data_type.to_string(),
        category,
        is_nullable: false,
        is_primary_key: false,
        is_auto_increment: false,
        default_value: None,
        max_char_length: None,
        numeric_precision: None,
        ordinal_position: 1,
    }
}

fn table(name: &str, columns: Vec<Column>) -> Table {
    Table {
        name: name.to_string(),
        kind: TableKind::Table,
        columns,
    }
}

#[test]
fn test_camel_case_with_db_and_sql_tags() {
    let mut tags = TagSet::default();
    tags.insert(TagKind::Sql);
    let config = GenerationConfig {
        tags,
        ..GenerationConfig::default()
    };

    let generated = render_table(
        &table("users", vec![column("user_id", "int", TypeCategory::Integer)]),
        &config,
    );

    assert_eq!(generated.file_name, "Users.go");
    assert_eq!(
        generated.content,
        "package dto\n\ntype Users struct {\n\tUserId int `db:\"user_id\" sql:\"type:int;not null\"`\n}\n"
    );
}

#[test]
fn test_title_case_nullable_string_pulls_sql_import() {
    let config = GenerationConfig {
        naming: NamingStyle::Title,
        ..GenerationConfig::default()
    };

    let mut email = column("email", "varchar", TypeCategory::String);
    email.is_nullable = true;
    email.max_char_length = Some(255);

    let generated = render_table(&table("email_addresses", vec![email]), &config);

    assert_eq!(generated.file_name, "Email_addresses.go");
    assert_eq!(
        generated.content,
        "package dto\n\nimport (\n\t\"database/sql\"\n)\n\ntype Email_addresses struct {\n\tEmail sql.NullString `db:\"email\"`\n}\n"
    );
}

#[test]
fn test_empty_tag_set_emits_no_annotations() {
    let config = GenerationConfig {
        tags: TagSet::empty(),
        ..GenerationConfig::default()
    };

    let columns = vec![
        column("id", "integer", TypeCategory::Integer),
        column("name", "varchar", TypeCategory::String),
    ];
    let generated = render_table(&table("users", columns), &config);

    assert!(!generated.content.contains('`'));
    assert!(generated.content.contains("\tId int\n"));
    assert!(generated.content.contains("\tName string\n"));
}

#[test]
fn test_empty_table_with_tags_enabled_has_no_imports() {
    let config = GenerationConfig {
        tags: TagSet::from_iter([TagKind::Db, TagKind::Sql]),
        package: "models".to_string(),
        ..GenerationConfig::default()
    };

    let generated = render_table(&table("empty", vec![]), &config);
    assert_eq!(
        generated.content,
        "package models\n\ntype Empty struct {\n}\n"
    );
}

#[test]
fn test_non_nullable_unknown_still_imports_database_sql() {
    let generated = render_table(
        &table("events", vec![column("payload", "jsonb", TypeCategory::Unknown)]),
        &GenerationConfig::default(),
    );

    assert!(generated.content.contains("import (\n\t\"database/sql\"\n)"));
    assert!(generated.content.contains("\tPayload sql.NullString `db:\"payload\"`\n"));
}

#[test]
fn test_all_categories_render_together() {
    let mut deleted_at = column("deleted_at", "timestamp", TypeCategory::Temporal);
    deleted_at.is_nullable = true;
    let mut name = column("name", "varchar", TypeCategory::String);
    name.is_nullable = true;
    let mut score = column("score", "double precision", TypeCategory::Float);
    score.is_nullable = true;

    let columns = vec![
        column("id", "integer", TypeCategory::Integer),
        name,
        column("bio", "text", TypeCategory::Text),
        score,
        column("created_at", "timestamp", TypeCategory::Temporal),
        deleted_at,
        column("active", "boolean", TypeCategory::Boolean),
        column("meta", "jsonb", TypeCategory::Unknown),
    ];
    let generated = render_table(&table("profiles", columns), &GenerationConfig::default());

    assert_eq!(
        generated.content,
        "package dto\n\n\
         import (\n\
         \t\"database/sql\"\n\
         \t\"github.com/lib/pq\"\n\
         \t\"time\"\n\
         )\n\n\
         type Profiles struct {\n\
         \tId int `db:\"id\"`\n\
         \tName sql.NullString `db:\"name\"`\n\
         \tBio string `db:\"bio\"`\n\
         \tScore sql.NullFloat64 `db:\"score\"`\n\
         \tCreatedAt time.Time `db:\"created_at\"`\n\
         \tDeletedAt pq.NullTime `db:\"deleted_at\"`\n\
         \tActive bool `db:\"active\"`\n\
         \tMeta sql.NullString `db:\"meta\"`\n\
         }\n"
    );
}

#[test]
fn test_structable_recorder_with_key_metadata() {
    let config = GenerationConfig {
        tags: TagSet::from_iter([TagKind::Structable]),
        structable_recorder: true,
        ..GenerationConfig::default()
    };

    let mut id = column("id", "integer", TypeCategory::Integer);
    id.is_primary_key = true;
    id.is_auto_increment = true;

    let generated = render_table(&table("users", vec![id]), &config);

    assert_eq!(
        generated.content,
        "package dto\n\n\
         import (\n\
         \t\"github.com/Masterminds/structable\"\n\
         )\n\n\
         type Users struct {\n\
         \tId int `stbl:\"id,PRIMARY_KEY,SERIAL,AUTO_INCREMENT\"`\n\
         \n\tstructable.Recorder\n\
         }\n"
    );
}

#[test]
fn test_views_render_like_tables() {
    let view = Table {
        name: "active_users".to_string(),
        kind: TableKind::View,
        columns: vec![column("user_id", "integer", TypeCategory::Integer)],
    };
    let generated = render_table(&view, &GenerationConfig::default());

    assert_eq!(generated.file_name, "ActiveUsers.go");
    assert!(generated.content.contains("type ActiveUsers struct {"));
}
