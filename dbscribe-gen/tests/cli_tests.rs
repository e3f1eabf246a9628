//! CLI parsing tests.

#![allow(clippy::unwrap_used)]

use clap::Parser;
use dbscribe_core::{Dialect, NamingStyle, TagKind};
use dbscribe_gen::cli::Cli;
use std::path::PathBuf;

#[test]
fn test_generation_flags() {
    let cli = Cli::try_parse_from([
        "dbscribe-gen",
        "--naming",
        "title",
        "--prefix",
        "tbl_",
        "--suffix",
        "_dto",
        "--package",
        "models",
        "-o",
        "./out",
        "--include-views",
        "--gofmt",
    ])
    .unwrap();

    assert_eq!(cli.naming, NamingStyle::Title);
    assert_eq!(cli.output_dir, PathBuf::from("./out"));
    assert!(cli.include_views);
    assert!(cli.gofmt);

    let config = cli.generation_config();
    assert_eq!(config.naming, NamingStyle::Title);
    assert_eq!(config.prefix, "tbl_");
    assert_eq!(config.suffix, "_dto");
    assert_eq!(config.package, "models");
}

#[test]
fn test_invalid_naming_is_rejected() {
    assert!(Cli::try_parse_from(["dbscribe-gen", "--naming", "snake"]).is_err());
}

#[test]
fn test_password_from_environment() {
    temp_env::with_var("DB_PASSWORD", Some("s3cret"), || {
        let cli = Cli::try_parse_from(["dbscribe-gen"]).unwrap();
        assert_eq!(cli.password, "s3cret");
        assert_eq!(cli.connection_params().password, "s3cret");
    });
}

#[test]
fn test_password_flag_beats_environment() {
    temp_env::with_var("DB_PASSWORD", Some("from-env"), || {
        let cli = Cli::try_parse_from(["dbscribe-gen", "-p", "from-flag"]).unwrap();
        assert_eq!(cli.password, "from-flag");
    });
}

#[test]
fn test_tag_toggles_compose() {
    let cli = Cli::try_parse_from(["dbscribe-gen", "--tags-structable", "--tags-sql"]).unwrap();
    let config = cli.generation_config();

    assert!(config.tags.contains(TagKind::Db));
    assert!(config.tags.contains(TagKind::Structable));
    assert!(config.tags.contains(TagKind::Sql));
}

#[test]
fn test_no_db_drops_default_tag() {
    let cli = Cli::try_parse_from(["dbscribe-gen", "--tags-no-db"]).unwrap();
    assert!(cli.generation_config().tags.is_empty());
}

#[test]
fn test_modes_parse() {
    let cli = Cli::try_parse_from(["dbscribe-gen", "--check", "-q"]).unwrap();
    assert!(cli.check);
    assert!(cli.global.quiet);

    let cli = Cli::try_parse_from(["dbscribe-gen", "--list-dialects"]).unwrap();
    assert!(cli.list_dialects);

    let cli = Cli::try_parse_from(["dbscribe-gen", "--dump-schema", "schema.json"]).unwrap();
    assert_eq!(cli.dump_schema, Some(PathBuf::from("schema.json")));
}

#[test]
fn test_connection_defaults_resolve_per_dialect() {
    let cli = Cli::try_parse_from(["dbscribe-gen", "-t", "mssql"]).unwrap();
    let params = cli.connection_params();

    assert_eq!(params.dialect, Dialect::SqlServer);
    assert_eq!(params.effective_port(), 1433);
    assert_eq!(params.effective_user(), "sa");
    assert_eq!(params.effective_schema(), "dbo");
}
