//! MySQL catalog type to Go type mapping

/// A Go type that a catalog column can be emitted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoType {
    Int,
    Int16,
    Int32,
    Int64,
    Float64,
    String,
    Bool,
    /// `time.Time` from the standard `time` package
    Time,
}

impl GoType {
    /// Resolve a raw `information_schema.COLUMNS.DATA_TYPE` value
    ///
    /// The match is exact and case-sensitive. Anything not in the table
    /// becomes `string` so unknown catalog types never stop generation.
    pub fn from_catalog(data_type: &str) -> GoType {
        match data_type {
            "int" | "integer" => GoType::Int,
            "smallint" => GoType::Int16,
            "mediumint" => GoType::Int32,
            "tinyint" | "bigint" => GoType::Int64,

            // Unsigned widths all widen to int64 so values never overflow
            "int unsigned"
            | "integer unsigned"
            | "tinyint unsigned"
            | "smallint unsigned"
            | "mediumint unsigned"
            | "bigint unsigned"
            | "bit" => GoType::Int64,

            "float" | "double" | "decimal" => GoType::Float64,

            "binary" | "varbinary" | "enum" | "set" | "varchar" | "char" | "tinytext"
            | "mediumtext" | "text" | "longtext" | "blob" | "tinyblob" | "mediumblob"
            | "longblob" => GoType::String,

            "bool" => GoType::Bool,

            "date" | "datetime" | "timestamp" | "time" => GoType::Time,

            _ => GoType::String,
        }
    }

    /// Get the type string for code generation
    pub fn as_str(&self) -> &'static str {
        match self {
            GoType::Int => "int",
            GoType::Int16 => "int16",
            GoType::Int32 => "int32",
            GoType::Int64 => "int64",
            GoType::Float64 => "float64",
            GoType::String => "string",
            GoType::Bool => "bool",
            GoType::Time => "time.Time",
        }
    }

    /// Go package that must be imported to use this type
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            GoType::Time => Some("time"),
            _ => None,
        }
    }
}

/// Map a catalog type name straight to its Go type string
pub fn map_type(data_type: &str) -> &'static str {
    GoType::from_catalog(data_type).as_str()
}
