//! Identifier casing conventions for generated names

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a catalog identifier is turned into a Go identifier or file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NameFormat {
    /// Keep the identifier exactly as the catalog reports it
    #[default]
    #[serde(rename = "unchanged")]
    Unchanged,

    /// `user_name` -> `UserName`
    #[serde(rename = "upper_camel", alias = "pascal")]
    SnakeToUpperCamel,

    /// `user_name` -> `userName`
    #[serde(rename = "lower_camel", alias = "camel")]
    SnakeToLowerCamel,

    /// `UserName` / `userName` -> `user_name`
    #[serde(rename = "snake")]
    PascalOrCamelToSnake,
}

impl NameFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameFormat::Unchanged => "unchanged",
            NameFormat::SnakeToUpperCamel => "upper_camel",
            NameFormat::SnakeToLowerCamel => "lower_camel",
            NameFormat::PascalOrCamelToSnake => "snake",
        }
    }
}

impl fmt::Display for NameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unchanged" | "default" => Ok(NameFormat::Unchanged),
            "upper_camel" | "pascal" => Ok(NameFormat::SnakeToUpperCamel),
            "lower_camel" | "camel" => Ok(NameFormat::SnakeToLowerCamel),
            "snake" => Ok(NameFormat::PascalOrCamelToSnake),
            other => Err(format!(
                "unknown name format '{}' (expected unchanged, upper_camel, lower_camel or snake)",
                other
            )),
        }
    }
}

/// Format an identifier under the given casing mode
///
/// Empty `_` segments are skipped, so `user__name` and `_user_name` camel-case
/// the same way as `user_name`.
pub fn format_name(identifier: &str, mode: NameFormat) -> String {
    match mode {
        NameFormat::Unchanged => identifier.to_string(),
        NameFormat::SnakeToUpperCamel => snake_to_camel(identifier, true),
        NameFormat::SnakeToLowerCamel => snake_to_camel(identifier, false),
        NameFormat::PascalOrCamelToSnake => camel_to_snake(identifier),
    }
}

fn snake_to_camel(identifier: &str, upper_first: bool) -> String {
    let mut out = String::with_capacity(identifier.len());

    let segments = identifier.split('_').filter(|s| !s.is_empty());
    for (i, segment) in segments.enumerate() {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            if i == 0 && !upper_first {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }

    out
}

fn camel_to_snake(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);

    for (i, c) in identifier.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
