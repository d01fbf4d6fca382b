//! Integration tests for dbstruct against a MySQL testcontainer
//!
//! These tests verify the live catalog path end to end: the parameterized
//! `information_schema.COLUMNS` query, grouping, and the files written from it.
//!
//! They need a Docker daemon, so they are ignored by default:
//!
//! ```bash
//! cargo test -p dbstruct-tests -- --ignored
//! ```

use std::fs;

use dbstruct::catalog::{InformationSchema, SchemaSource};
use dbstruct::{DbStructBuilder, NameFormat};
use mysql_async::prelude::Queryable;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mysql::Mysql;

const SCHEMA: &str = include_str!("../fixtures/shop.sql");

/// Start MySQL, load the fixture schema and return the container with its URL.
/// The container stops when the returned handle is dropped.
async fn start_mysql() -> anyhow::Result<(ContainerAsync<Mysql>, String)> {
    let container = Mysql::default().start().await?;
    let port = container.get_host_port_ipv4(3306).await?;
    let url = format!("mysql://root@127.0.0.1:{}/test", port);

    let pool = mysql_async::Pool::new(mysql_async::Opts::from_url(&url)?);
    let mut conn = pool.get_conn().await?;
    for stmt in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        conn.query_drop(stmt).await?;
    }
    drop(conn);
    pool.disconnect().await?;

    Ok((container, url))
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_information_schema_reader() -> anyhow::Result<()> {
    let (_container, url) = start_mysql().await?;
    let catalog = InformationSchema::connect(&url)?;

    // No allow-list: every table, ordered by name
    let tables = catalog.list_tables(&[]).await?;
    let names: Vec<&str> = tables.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["audit_log", "order_items", "orders"]);

    let orders = &tables["orders"];
    let columns: Vec<&str> = orders.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        columns,
        vec!["id", "user_name", "total", "status", "created_at"]
    );
    assert_eq!(orders[1].data_type, "varchar");
    assert_eq!(orders[1].nullable, "NO");
    assert_eq!(orders[1].comment, "buyer login");
    assert_eq!(orders[2].nullable, "YES");

    // Allow-list is bound as parameters, so a quote in a name is harmless
    let tables = catalog
        .list_tables(&["orders".to_string(), "it's".to_string()])
        .await?;
    assert_eq!(tables.len(), 1);
    assert!(tables.contains_key("orders"));

    catalog.disconnect().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_generate_from_live_catalog() -> anyhow::Result<()> {
    let (_container, url) = start_mysql().await?;
    let out = tempfile::tempdir()?;
    let path = out.path().join("models.go");

    let report = DbStructBuilder::new()
        .dsn(&url)
        .append_table("orders")
        .append_table("order_items")
        .struct_name_fmt(NameFormat::SnakeToUpperCamel)
        .field_name_fmt(NameFormat::SnakeToUpperCamel)
        .tag_json(true)
        .table_name_func("TableName")
        .gen_table_name_func(true)
        .single_file(true)
        .model_path(&path)
        .gofmt(false)
        .generate()
        .await?;

    assert_eq!(report.tables, 2);
    assert!(report.is_complete());

    let content = fs::read_to_string(&path)?;
    assert_eq!(content.matches("package model").count(), 1);
    assert_eq!(content.matches("import \"time\"").count(), 1);
    assert!(content.contains("type Orders struct {\n"));
    assert!(content.contains("type OrderItems struct {\n"));
    assert!(content.contains("\tUserName string `json:\"user_name\"`\n"));
    assert!(content.contains("\tCreatedAt time.Time `json:\"created_at\"`\n"));
    assert!(content.contains("\tTotal float64 `json:\"total\"`\n"));
    assert!(content.contains("func (o *Orders) TableName() string {\n\treturn \"orders\"\n}"));
    assert!(!content.contains("AuditLog"));

    Ok(())
}
