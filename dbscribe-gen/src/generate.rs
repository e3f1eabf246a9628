//! Generation pipeline: introspect one schema, render Go structs,
//! write one file per table.
//!
//! Each table's columns are fetched and its file written before the
//! next table is touched. The pipeline aborts on the first error;
//! files written for earlier tables stay on disk.

use std::path::Path;
use std::process::Stdio;

use dbscribe_core::{
    DbScribeError, GenerationConfig, Result, Table, create_adapter, render_table,
};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, info, trace};

use crate::cli::Cli;

/// Runs the full generation flow for the parsed CLI arguments.
///
/// # Errors
/// Returns error if the configuration is invalid, the database cannot
/// be reached, a catalog query fails, or an output file cannot be
/// written
pub async fn run(cli: &Cli) -> Result<()> {
    let mut params = cli.connection_params();

    if cli.password_prompt {
        params.password = rpassword::prompt_password("Password: ")
            .map_err(|e| DbScribeError::configuration(format!("Failed to read password: {e}")))?;
    }

    if !cli.check {
        verify_output_dir(&cli.output_dir)?;
    }

    // Display never contains credentials.
    info!("Target: {}", params);

    let adapter = create_adapter(&params).await.map_err(|e| {
        error!("Failed to create database adapter: {}", e);
        e
    })?;

    adapter.test_connection().await.map_err(|e| {
        error!("Connection test failed: {}", e);
        e
    })?;

    if cli.check {
        info!("✓ Connection test successful");
        println!("Connection to {} database successful", adapter.dialect());
        return Ok(());
    }

    adapter.prepare_column_query().await?;

    let mut tables = adapter.list_tables().await?;
    if cli.include_views {
        tables.extend(adapter.list_views().await?);
    }
    info!(
        "Found {} relations in schema {}",
        tables.len(),
        params.effective_schema()
    );

    let config = cli.generation_config();
    let mut written = 0_usize;

    for table in &mut tables {
        table.columns = adapter.list_columns(&table.name).await?;
        debug!("Table {}: {} columns", table.name, table.columns.len());
        for column in &table.columns {
            trace!(
                "  {}.{}: {} ({:?}, nullable: {})",
                table.name, column.name, column.data_type, column.category, column.is_nullable
            );
        }
        write_table(table, &config, &cli.output_dir, cli.gofmt).await?;
        written = written.saturating_add(1);
    }

    if let Some(path) = &cli.dump_schema {
        dump_schema(&tables, path).await?;
    }

    info!("✓ Generation completed");
    println!("Generated {} file(s) in {}", written, cli.output_dir.display());

    Ok(())
}

/// Checks that the output directory exists before any connection is
/// opened.
///
/// # Errors
/// Returns error if the path is missing or not a directory
pub fn verify_output_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(DbScribeError::configuration(format!(
            "Output directory '{}' does not exist or is not a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Renders one table and writes its Go file into `output_dir`.
///
/// # Errors
/// Returns error if formatting fails or the file cannot be written
pub async fn write_table(
    table: &Table,
    config: &GenerationConfig,
    output_dir: &Path,
    gofmt: bool,
) -> Result<()> {
    let file = render_table(table, config);
    let content = if gofmt {
        gofmt_source(&file.content).await?
    } else {
        file.content
    };

    let path = output_dir.join(&file.file_name);
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| DbScribeError::write_failed(format!("writing {}", path.display()), e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Pipes generated source through the external `gofmt` binary.
async fn gofmt_source(content: &str) -> Result<String> {
    let mut child = Command::new("gofmt")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| DbScribeError::format_failed("spawning gofmt", e))?;

    let mut stdin = child.stdin.take().ok_or_else(|| {
        DbScribeError::format_failed(
            "opening gofmt stdin",
            std::io::Error::other("stdin not captured"),
        )
    })?;
    stdin
        .write_all(content.as_bytes())
        .await
        .map_err(|e| DbScribeError::format_failed("writing to gofmt", e))?;
    // gofmt reads until EOF.
    drop(stdin);

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| DbScribeError::format_failed("waiting for gofmt", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DbScribeError::format_failed(
            "gofmt rejected generated source",
            std::io::Error::other(stderr.into_owned()),
        ));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| DbScribeError::format_failed("reading gofmt output", e))
}

/// Writes the introspected tables as pretty-printed JSON.
async fn dump_schema(tables: &[Table], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tables)
        .map_err(|e| DbScribeError::serialization_failed("encoding schema dump", e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| DbScribeError::write_failed(format!("writing {}", path.display()), e))?;
    info!("Dumped schema to {}", path.display());
    Ok(())
}

/// Prints the supported dialects with their connection defaults.
pub fn list_dialects() {
    println!("Supported Database Types:");
    println!();

    #[cfg(feature = "postgresql")]
    {
        println!("PostgreSQL (-t pg):");
        println!("  Default: postgres@127.0.0.1:5432, schema public");
        println!();
    }

    #[cfg(feature = "mysql")]
    {
        println!("MySQL (-t mysql):");
        println!("  Default: root@127.0.0.1:3306, schema <database>");
        println!();
    }

    #[cfg(feature = "mssql")]
    {
        println!("SQL Server (-t mssql):");
        println!("  Default: sa@127.0.0.1:1433, schema dbo");
        println!();
    }
}
