//! Schema catalog access
//!
//! A [`SchemaSource`] yields every column of the selected tables, grouped by
//! table in catalog order. [`InformationSchema`] reads a live MySQL server;
//! [`DdlSchema`] reads `CREATE TABLE` statements for offline generation.

mod ddl;
mod information_schema;

pub use ddl::DdlSchema;
pub use information_schema::{build_columns_query, InformationSchema};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One row of `information_schema.COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// `COLUMN_NAME`
    pub name: String,

    /// `DATA_TYPE`, e.g. `varchar` or `bigint unsigned`
    pub data_type: String,

    /// `IS_NULLABLE`, `YES` or `NO`
    pub nullable: String,

    /// `TABLE_NAME`
    pub table: String,

    /// `COLUMN_COMMENT`, empty when the column has none
    pub comment: String,
}

impl Column {
    pub fn is_nullable(&self) -> bool {
        self.nullable.eq_ignore_ascii_case("YES")
    }
}

/// Columns grouped by table name, in the order tables were first seen
pub type Tables = IndexMap<String, Vec<Column>>;

/// A catalog that can list table columns
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// List the columns of every table, or only of `allow_list` when it is non-empty.
    async fn list_tables(&self, allow_list: &[String]) -> Result<Tables>;
}

/// Group catalog rows by table, keeping arrival order within each table
pub fn group_columns(rows: impl IntoIterator<Item = Column>) -> Tables {
    let mut tables = Tables::new();
    for column in rows {
        tables.entry(column.table.clone()).or_default().push(column);
    }
    tables
}

#[cfg(test)]
pub(crate) fn column(table: &str, name: &str, data_type: &str) -> Column {
    Column {
        name: name.to_string(),
        data_type: data_type.to_string(),
        nullable: "NO".to_string(),
        table: table.to_string(),
        comment: String::new(),
    }
}
