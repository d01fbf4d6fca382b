//! CLI entry point for dbstruct

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dbstruct::catalog::{DdlSchema, InformationSchema, SchemaSource};
use dbstruct::config::{DbStructConfig, Tag};
use dbstruct::NameFormat;

#[derive(Parser)]
#[command(name = "dbstruct")]
#[command(about = "Generate Go structs from a MySQL information_schema catalog")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MySQL connection URL (overrides config)
    #[arg(long)]
    dsn: Option<String>,

    /// Read tables from a DDL file instead of a live database
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Comma-separated tables to generate (default: all)
    #[arg(short, long, value_delimiter = ',')]
    tables: Vec<String>,

    /// Output file (with --single-file) or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Go package name
    #[arg(short, long)]
    package: Option<String>,

    /// Write all structs into a single file
    #[arg(long)]
    single_file: bool,

    /// Add `json:"<column>"` tags
    #[arg(long)]
    json: bool,

    /// Add `orm:"<column>"` tags
    #[arg(long)]
    orm: bool,

    /// Extra tag as NAME or NAME:FORMAT (repeatable)
    #[arg(long = "tag", value_parser = parse_tag)]
    tags: Vec<Tag>,

    /// Field name format: unchanged, upper_camel, lower_camel, snake
    #[arg(long)]
    field_fmt: Option<NameFormat>,

    /// Struct name format: unchanged, upper_camel, lower_camel, snake
    #[arg(long)]
    struct_fmt: Option<NameFormat>,

    /// File name format: unchanged, upper_camel, lower_camel, snake
    #[arg(long)]
    file_fmt: Option<NameFormat>,

    /// Generate a method with this name returning the table name
    #[arg(long)]
    table_name_func: Option<String>,

    /// Append column comments to fields
    #[arg(long)]
    comments: bool,

    /// Skip running gofmt on generated files
    #[arg(long)]
    no_gofmt: bool,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate structs (default)
    Generate,
    /// Inspect schema (show catalog columns for debugging)
    Inspect {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_tag(value: &str) -> Result<Tag, String> {
    match value.split_once(':') {
        Some((name, mode)) => Ok(Tag::new(name, mode.parse()?)),
        None => Ok(Tag::new(value, NameFormat::Unchanged)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = if let Some(config_path) = &cli.config {
        DbStructConfig::from_file(config_path)?
    } else {
        DbStructConfig::load(None)?
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    apply_overrides(&mut config, &cli);

    config.validate()?;

    match &cli.command {
        Some(Commands::Inspect { json }) => inspect(&config, *json).await,
        Some(Commands::Generate) | None => run_generate(&config).await,
    }
}

/// Apply CLI flags on top of the loaded configuration
fn apply_overrides(config: &mut DbStructConfig, cli: &Cli) {
    if let Some(dsn) = &cli.dsn {
        config.dsn = dsn.clone();
    }
    if let Some(schema) = &cli.schema {
        config.schema_file = Some(schema.clone());
    }
    if !cli.tables.is_empty() {
        config.tables = cli.tables.clone();
    }
    if let Some(output) = &cli.output {
        config.model_path = Some(output.clone());
    }
    if let Some(package) = &cli.package {
        config.package_name = package.clone();
    }
    if let Some(fmt) = cli.field_fmt {
        config.field_name_fmt = fmt;
    }
    if let Some(fmt) = cli.struct_fmt {
        config.struct_name_fmt = fmt;
    }
    if let Some(fmt) = cli.file_fmt {
        config.file_name_fmt = fmt;
    }
    if let Some(func) = &cli.table_name_func {
        config.table_name_func = func.clone();
        config.gen_table_name_func = true;
    }
    config.tags.extend(cli.tags.iter().cloned());
    config.single_file |= cli.single_file;
    config.tag_json |= cli.json;
    config.tag_orm |= cli.orm;
    config.field_comments |= cli.comments;
    config.dry_run |= cli.dry_run;
    if cli.no_gofmt {
        config.gofmt = false;
    }
}

async fn run_generate(config: &DbStructConfig) -> Result<()> {
    let report = match &config.schema_file {
        Some(schema_file) => {
            info!("Generating structs from DDL: {:?}", schema_file);
            let schema = DdlSchema::from_file(schema_file)?;
            dbstruct::generate_with(&schema, config).await?
        }
        None => dbstruct::generate(config).await?,
    };

    if config.dry_run {
        println!("Dry run mode - would generate:");
        for path in &report.written {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    if !report.is_complete() {
        for failed in &report.failed {
            eprintln!("failed: {}: {}", failed.path.display(), failed.error);
        }
        bail!(
            "{} of {} struct files could not be written",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }

    info!(
        "Code generation completed successfully ({} files)",
        report.written.len()
    );
    Ok(())
}

async fn inspect(config: &DbStructConfig, as_json: bool) -> Result<()> {
    let tables = match &config.schema_file {
        Some(schema_file) => {
            DdlSchema::from_file(schema_file)?
                .list_tables(&config.tables)
                .await?
        }
        None => {
            let catalog = InformationSchema::connect(&config.dsn)?;
            let tables = catalog.list_tables(&config.tables).await;
            catalog.disconnect().await?;
            tables?
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    println!("Found {} tables:\n", tables.len());
    for (table, columns) in &tables {
        println!("Table: {}", table);
        for col in columns {
            let nullable = if col.is_nullable() { "NULL" } else { "NOT NULL" };
            let go_type = dbstruct::codegen::map_type(&col.data_type);
            println!(
                "    - {} {} {} -> {}",
                col.name, col.data_type, nullable, go_type
            );
            if !col.comment.is_empty() {
                println!("      comment: {}", col.comment);
            }
        }
        println!();
    }

    Ok(())
}
