//! Offline catalog built from `CREATE TABLE` statements using sqlparser-rs

use std::path::Path;

use async_trait::async_trait;
use sqlparser::ast::{
    ColumnDef, ColumnOption, CreateTable, Expr, IndexColumn, ObjectName, PrimaryKeyConstraint,
    Statement, TableConstraint,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use super::{group_columns, Column, SchemaSource, Tables};
use crate::error::Result;

/// A schema catalog read from MySQL DDL instead of a live server.
///
/// Rows carry the same values `information_schema.COLUMNS` would report for
/// the statements: the lower-case `DATA_TYPE` with no length arguments or
/// attributes (`INT(11) UNSIGNED` is `int`, `BOOLEAN` is `tinyint`),
/// `YES`/`NO` nullability and the column `COMMENT`.
#[derive(Debug, Clone)]
pub struct DdlSchema {
    rows: Vec<Column>,
}

impl DdlSchema {
    /// Parse a SQL schema string
    pub fn parse(sql: &str) -> Result<Self> {
        let dialect = MySqlDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;

        let mut rows = Vec::new();
        for stmt in statements {
            if let Statement::CreateTable(create_table) = stmt {
                rows.extend(extract_columns(&create_table));
            }
        }

        // Same ordering as `ORDER BY TABLE_NAME ASC`; the sort is stable so
        // column order inside a table is kept.
        rows.sort_by(|a, b| a.table.cmp(&b.table));
        debug!("Parsed {} columns from DDL", rows.len());

        Ok(Self { rows })
    }

    /// Read and parse a SQL schema file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let sql = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&sql)
    }
}

#[async_trait]
impl SchemaSource for DdlSchema {
    async fn list_tables(&self, allow_list: &[String]) -> Result<Tables> {
        let rows = self
            .rows
            .iter()
            .filter(|c| allow_list.is_empty() || allow_list.contains(&c.table))
            .cloned();
        Ok(group_columns(rows))
    }
}

/// Extract catalog rows from a CREATE TABLE statement
fn extract_columns(create: &CreateTable) -> Vec<Column> {
    let table = extract_table_name(&create.name);

    let mut columns: Vec<Column> = create
        .columns
        .iter()
        .map(|col_def| extract_column(&table, col_def))
        .collect();

    // Table-level PRIMARY KEY columns are implicitly NOT NULL
    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey(PrimaryKeyConstraint {
            columns: pk_cols, ..
        }) = constraint
        {
            for pk_col in pk_cols {
                let col_name = extract_ident_from_index_column(pk_col);
                if let Some(col) = columns.iter_mut().find(|c| c.name == col_name) {
                    col.nullable = "NO".to_string();
                }
            }
        }
    }

    columns
}

fn extract_column(table: &str, col_def: &ColumnDef) -> Column {
    let mut nullable = true;
    let mut comment = String::new();

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => nullable = false,
            ColumnOption::Null => nullable = true,
            ColumnOption::PrimaryKey(_) => nullable = false,
            ColumnOption::Comment(c) => comment = c.clone(),
            _ => {}
        }
    }

    Column {
        name: col_def.name.value.clone(),
        data_type: catalog_data_type(&col_def.data_type.to_string()),
        nullable: if nullable { "YES" } else { "NO" }.to_string(),
        table: table.to_string(),
        comment,
    }
}

/// Reduce a rendered DDL type (`INT(11) UNSIGNED`, `VARCHAR(255)`) to the
/// catalog `DATA_TYPE` spelling (`int`, `varchar`). Signedness lives in
/// `COLUMN_TYPE`, so `unsigned` is dropped here too.
fn catalog_data_type(rendered: &str) -> String {
    let lower = rendered.to_lowercase();

    let mut base = String::with_capacity(lower.len());
    let mut depth = 0usize;
    for c in lower.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => base.push(c),
            _ => {}
        }
    }

    let words: Vec<&str> = base
        .split_whitespace()
        .filter(|w| !matches!(*w, "unsigned" | "signed" | "zerofill"))
        .collect();

    match words.join(" ").as_str() {
        "bool" | "boolean" => "tinyint".to_string(),
        "integer" => "int".to_string(),
        "double precision" | "real" => "double".to_string(),
        "numeric" | "dec" | "fixed" => "decimal".to_string(),
        "character" => "char".to_string(),
        "character varying" => "varchar".to_string(),
        other => other.to_string(),
    }
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
