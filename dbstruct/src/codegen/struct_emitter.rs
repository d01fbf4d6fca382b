//! Struct emitter - renders one Go struct per table

use std::collections::BTreeSet;

use tracing::debug;

use super::naming::format_name;
use super::type_mapper::GoType;
use crate::catalog::Column;
use crate::config::{DbStructConfig, Tag};

/// Generated source for one table, before it is written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Table the struct was generated from
    pub table_name: String,

    /// Struct name after applying `struct_name_fmt`
    pub type_name: String,

    /// Unformatted Go source
    pub body: String,

    /// Go packages the struct fields need
    pub imports: BTreeSet<&'static str>,
}

/// Render the Go struct for `table_name`.
///
/// In per-file mode the body is a complete file with its own `package`
/// clause; in single-file mode it is just the type and its accessor.
pub fn emit(table_name: &str, columns: &[Column], config: &DbStructConfig) -> GeneratedUnit {
    let type_name = format_name(table_name, config.struct_name_fmt);
    let tags = config.effective_tags();
    debug!(
        "Emitting struct {} for table {} ({} columns)",
        type_name,
        table_name,
        columns.len()
    );

    let mut imports = BTreeSet::new();
    let mut fields = String::new();

    for column in columns {
        let go_type = GoType::from_catalog(&column.data_type);
        if let Some(path) = go_type.import_path() {
            imports.insert(path);
        }

        let field_name = format_name(&column.name, config.field_name_fmt);
        fields.push_str(&format!("\t{} {}", field_name, go_type.as_str()));

        if !tags.is_empty() {
            fields.push_str(&format!(" `{}`", tag_clauses(&column.name, &tags)));
        }

        if config.field_comments && !column.comment.is_empty() {
            fields.push_str(&format!(" // {}", single_line(&column.comment)));
        }
        fields.push('\n');
    }

    let mut body = String::new();

    if !config.single_file {
        body.push_str(&format!("package {}\n\n", config.package_name));
        body.push_str(&render_imports(&imports));
    }

    body.push_str(&format!("type {} struct {{\n", type_name));
    body.push_str(&fields);
    body.push_str("}\n");

    if let Some(func) = config.table_name_func() {
        body.push('\n');
        body.push_str(&format!(
            "func ({} *{}) {}() string {{\n\treturn {}\n}}\n",
            receiver_name(&type_name),
            type_name,
            func,
            go_string(table_name)
        ));
    }

    GeneratedUnit {
        table_name: table_name.to_string(),
        type_name,
        body,
        imports,
    }
}

/// `json:"user_name" orm:"user_name"` for one column
///
/// Tag values are formatted from the raw column name, not the field name.
fn tag_clauses(column_name: &str, tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| format!("{}:\"{}\"", tag.name, format_name(column_name, tag.mode)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Go import declaration for the given packages, or nothing if there are none
pub(crate) fn render_imports(imports: &BTreeSet<&'static str>) -> String {
    match imports.len() {
        0 => String::new(),
        1 => format!(
            "import \"{}\"\n\n",
            imports.iter().next().copied().unwrap_or_default()
        ),
        _ => {
            let mut block = String::from("import (\n");
            for path in imports {
                block.push_str(&format!("\t\"{}\"\n", path));
            }
            block.push_str(")\n\n");
            block
        }
    }
}

/// Method receiver: the lower-cased first letter of the type name
fn receiver_name(type_name: &str) -> String {
    match type_name.chars().next() {
        Some(first) => first.to_lowercase().collect(),
        None => "t".to_string(),
    }
}

/// Quote a value as a Go interpreted string literal
fn go_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

fn single_line(comment: &str) -> String {
    comment.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::column;
    use crate::codegen::NameFormat;

    fn orders() -> Vec<Column> {
        vec![
            column("orders", "id", "bigint unsigned"),
            column("orders", "user_name", "varchar"),
            column("orders", "created_at", "datetime"),
        ]
    }

    fn camel_config() -> DbStructConfig {
        DbStructConfig {
            field_name_fmt: NameFormat::SnakeToUpperCamel,
            struct_name_fmt: NameFormat::SnakeToUpperCamel,
            package_name: "model".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_emit_per_file() {
        let unit = emit("orders", &orders(), &camel_config());
        assert_eq!(unit.type_name, "Orders");
        assert_eq!(unit.table_name, "orders");
        assert_eq!(
            unit.body,
            "package model\n\n\
             import \"time\"\n\n\
             type Orders struct {\n\
             \tId int64\n\
             \tUserName string\n\
             \tCreatedAt time.Time\n\
             }\n"
        );
        assert!(unit.imports.contains("time"));
    }

    #[test]
    fn test_emit_single_file_has_no_package_clause() {
        let config = DbStructConfig {
            single_file: true,
            ..camel_config()
        };
        let unit = emit("orders", &orders(), &config);
        assert!(unit.body.starts_with("type Orders struct {\n"));
        assert!(!unit.body.contains("package"));
        assert!(!unit.body.contains("import"));
        // The import is still reported so the combined file can declare it
        assert!(unit.imports.contains("time"));
    }

    #[test]
    fn test_json_tag_uses_raw_column_name() {
        let config = DbStructConfig {
            tag_json: true,
            ..camel_config()
        };
        let unit = emit("orders", &orders(), &config);
        let line = unit
            .body
            .lines()
            .find(|l| l.trim_start().starts_with("UserName "))
            .unwrap();
        assert_eq!(line, "\tUserName string `json:\"user_name\"`");
        assert_eq!(line.matches("json:").count(), 1);
    }

    #[test]
    fn test_multiple_tags_joined_by_single_space() {
        let config = DbStructConfig {
            tags: vec![Tag::new("db", NameFormat::SnakeToLowerCamel)],
            tag_json: true,
            tag_orm: true,
            ..camel_config()
        };
        let unit = emit("orders", &orders(), &config);
        assert!(unit
            .body
            .contains("\tUserName string `db:\"userName\" json:\"user_name\" orm:\"user_name\"`\n"));
    }

    #[test]
    fn test_no_tags_no_backticks() {
        let unit = emit("orders", &orders(), &camel_config());
        assert!(!unit.body.contains('`'));
    }

    #[test]
    fn test_table_name_accessor() {
        let config = DbStructConfig {
            table_name_func: "TableName".into(),
            gen_table_name_func: true,
            ..camel_config()
        };
        let unit = emit("orders", &orders(), &config);
        assert!(unit
            .body
            .ends_with("}\n\nfunc (o *Orders) TableName() string {\n\treturn \"orders\"\n}\n"));
    }

    #[test]
    fn test_table_name_accessor_needs_flag() {
        let config = DbStructConfig {
            table_name_func: "TableName".into(),
            ..camel_config()
        };
        let unit = emit("orders", &orders(), &config);
        assert!(!unit.body.contains("func "));
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        let columns = vec![column("geo", "shape", "geometry")];
        let unit = emit("geo", &columns, &camel_config());
        assert!(unit.body.contains("\tShape string\n"));
        assert!(unit.imports.is_empty());
    }

    #[test]
    fn test_field_comments() {
        let mut columns = orders();
        columns[1].comment = "buyer\nlogin".into();
        let config = DbStructConfig {
            field_comments: true,
            ..camel_config()
        };
        let unit = emit("orders", &columns, &config);
        assert!(unit.body.contains("\tUserName string // buyer login\n"));
    }

    #[test]
    fn test_render_imports() {
        assert_eq!(render_imports(&BTreeSet::new()), "");
        let imports: BTreeSet<&'static str> = ["time", "database/sql"].into_iter().collect();
        assert_eq!(
            render_imports(&imports),
            "import (\n\t\"database/sql\"\n\t\"time\"\n)\n\n"
        );
    }

    #[test]
    fn test_go_string_escapes() {
        assert_eq!(go_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(receiver_name("Orders"), "o");
    }
}
