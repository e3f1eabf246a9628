//! Command line definition and argument-to-config translation.
//!
//! The raw clap structure is translated into the two plain config
//! structs from `dbscribe-core` before any table is processed, so the
//! rest of the pipeline never sees clap types.

use clap::{Args, Parser};
use dbscribe_core::{ConnectionParams, Dialect, GenerationConfig, NamingStyle, TagSet, TagToggles};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dbscribe-gen")]
#[command(about = "Go struct generation from database tables")]
#[command(version)]
#[command(long_about = "
dbscribe-gen - Go struct generation from database tables

This tool connects to a database, enumerates the tables of one schema
through the information_schema catalog, and writes one Go file per
table containing a matching struct definition.

SUPPORTED DATABASES:
- PostgreSQL (-t pg)
- MySQL (-t mysql)
- SQL Server (-t mssql)

EXAMPLES:
  dbscribe-gen -d orders -u app -p secret
  dbscribe-gen -t mysql -d app --tags-sql -o ./models
  dbscribe-gen -t pg --check
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Database type
    #[arg(
        short = 't',
        long = "db-type",
        default_value = "pg",
        help = "Database type (pg, mysql, mssql)"
    )]
    pub db_type: Dialect,

    /// Database host
    #[arg(short = 'H', long, default_value = "127.0.0.1", help = "Host of the database")]
    pub host: String,

    /// Database port
    #[arg(short = 'P', long, help = "Port of the database (dialect default if omitted)")]
    pub port: Option<u16>,

    /// Login user
    #[arg(short = 'u', long, help = "User to connect with (dialect default if omitted)")]
    pub user: Option<String>,

    /// Login password
    #[arg(
        short = 'p',
        long,
        env = "DB_PASSWORD",
        hide_env_values = true,
        default_value = "",
        help = "Password to connect with (DB_PASSWORD environment variable)"
    )]
    pub password: String,

    /// Prompt for the password
    #[arg(long, help = "Read the password from the terminal, overriding --password")]
    pub password_prompt: bool,

    /// Database name
    #[arg(
        short = 'd',
        long,
        default_value = "postgres",
        help = "Name of the database to introspect"
    )]
    pub database: String,

    /// Schema filter
    #[arg(short = 's', long, help = "Schema to enumerate (dialect default if omitted)")]
    pub schema: Option<String>,

    /// Output directory
    #[arg(
        short = 'o',
        long,
        default_value = ".",
        help = "Directory the generated files are written to (must exist)"
    )]
    pub output_dir: PathBuf,

    /// Naming convention
    #[arg(
        long,
        default_value = "camel",
        help = "Naming convention for struct and field names (camel, title)"
    )]
    pub naming: NamingStyle,

    /// Struct name prefix
    #[arg(
        long,
        default_value = "",
        help = "Prefix joined to the table name before the naming transform"
    )]
    pub prefix: String,

    /// Struct name suffix
    #[arg(
        long,
        default_value = "",
        help = "Suffix joined to the table name before the naming transform"
    )]
    pub suffix: String,

    /// Go package name
    #[arg(long, default_value = "dto", help = "Package name in the generated files")]
    pub package: String,

    /// Also generate structs for views
    #[arg(long, help = "Generate structs for views in addition to tables")]
    pub include_views: bool,

    /// Drop the default db tag
    #[arg(long, help = "Do not annotate fields with db tags")]
    pub tags_no_db: bool,

    /// Add stbl tags
    #[arg(long, help = "Annotate fields with stbl tags for Masterminds/structable")]
    pub tags_structable: bool,

    /// Only stbl tags
    #[arg(long, help = "Annotate fields with stbl tags only")]
    pub tags_structable_only: bool,

    /// Add sql tags
    #[arg(long, help = "Annotate fields with sql tags")]
    pub tags_sql: bool,

    /// Only sql tags
    #[arg(long, help = "Annotate fields with sql tags only")]
    pub tags_sql_only: bool,

    /// Embed structable.Recorder
    #[arg(long, help = "Embed structable.Recorder in the generated structs")]
    pub structable_recorder: bool,

    /// Format generated files with gofmt
    #[arg(long, help = "Pipe each generated file through gofmt")]
    pub gofmt: bool,

    /// Dump the introspected schema as JSON
    #[arg(
        long,
        value_name = "FILE",
        help = "Additionally write the introspected tables as pretty-printed JSON"
    )]
    pub dump_schema: Option<PathBuf>,

    /// Verify the connection and exit
    #[arg(long, help = "Connect, ping the database, and exit without generating")]
    pub check: bool,

    /// List supported dialects and exit
    #[arg(long, help = "Print the supported dialects with their connection defaults")]
    pub list_dialects: bool,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

impl Cli {
    /// Freezes the connection flags into [`ConnectionParams`].
    ///
    /// The password is taken from the flag or environment as parsed;
    /// the interactive prompt replaces it later, before connecting.
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            dialect: self.db_type,
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            schema: self.schema.clone(),
        }
    }

    /// Freezes the generation flags into [`GenerationConfig`].
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            naming: self.naming,
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            package: self.package.clone(),
            tags: TagSet::from_toggles(&self.tag_toggles()),
            structable_recorder: self.structable_recorder,
        }
    }

    fn tag_toggles(&self) -> TagToggles {
        TagToggles {
            no_db: self.tags_no_db,
            structable: self.tags_structable,
            structable_only: self.tags_structable_only,
            sql: self.tags_sql,
            sql_only: self.tags_sql_only,
        }
    }
}
