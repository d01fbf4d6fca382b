//! Default configuration values - single source of truth

use crate::codegen::NameFormat;

/// Default casing for struct field names
pub const FIELD_NAME_FMT: NameFormat = NameFormat::Unchanged;

/// Default casing for struct type names
pub const STRUCT_NAME_FMT: NameFormat = NameFormat::Unchanged;

/// Default casing for per-table file names
pub const FILE_NAME_FMT: NameFormat = NameFormat::Unchanged;

/// Default Go package name
pub const PACKAGE_NAME: &str = "model";

/// Directory (relative to the working directory) used when no output path is set
pub const MODEL_DIR: &str = "model";

/// File name used in single-file mode when no output path is set
pub const SINGLE_FILE_NAME: &str = "models.go";

/// Extension of generated source files
pub const FILE_EXTENSION: &str = "go";

/// Whether to write everything into one file by default
pub const SINGLE_FILE: bool = false;

/// Whether to run gofmt on written files by default
pub const GOFMT: bool = true;

/// Whether to append column comments to field lines by default
pub const FIELD_COMMENTS: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
