//! Main code generator: emits one unit per table and writes the output files

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::format_file;
use super::naming::format_name;
use super::struct_emitter::{emit, render_imports, GeneratedUnit};
use crate::catalog::Tables;
use crate::config::{defaults, DbStructConfig};
use crate::error::{DbStructError, Result};

/// Generated units keyed by struct name, in table order
pub type Units = IndexMap<String, GeneratedUnit>;

/// Two tables whose struct names formatted to the same identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub type_name: String,
    /// Table whose struct was dropped
    pub replaced_table: String,
    /// Table whose struct was kept
    pub table: String,
}

/// Two structs whose file names formatted to the same path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCollision {
    pub path: PathBuf,
    /// Struct whose file was overwritten
    pub replaced_type: String,
    /// Struct whose file was kept
    pub type_name: String,
}

/// A per-table file that could not be written
#[derive(Debug, Clone, Serialize)]
pub struct FailedWrite {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// Number of tables read from the catalog
    pub tables: usize,
    /// Files written (or, in dry-run mode, files that would be written)
    pub written: Vec<PathBuf>,
    /// Per-table write failures that generation skipped past
    pub failed: Vec<FailedWrite>,
    /// Struct-name collisions; the later table overwrote the earlier one
    pub collisions: Vec<Collision>,
    /// File-name collisions in per-file mode; the later struct's file was kept
    pub file_collisions: Vec<FileCollision>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Main code generator that turns catalog tables into Go source files
pub struct CodeGenerator<'a> {
    config: &'a DbStructConfig,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator with the given configuration
    pub fn new(config: &'a DbStructConfig) -> Self {
        Self { config }
    }

    /// Emit and write every table
    pub fn generate(&self, tables: &Tables) -> Result<GenerationReport> {
        let (units, collisions) = self.build_units(tables);
        let mut report = GenerationReport {
            tables: tables.len(),
            collisions,
            ..Default::default()
        };

        let path = self.config.resolve_model_path()?;
        if self.config.single_file {
            self.write_single_file(&units, &path, &mut report)?;
        } else {
            self.write_per_file(&units, &path, &mut report)?;
        }

        Ok(report)
    }

    /// Emit one unit per table; a later table with the same struct name wins
    pub fn build_units(&self, tables: &Tables) -> (Units, Vec<Collision>) {
        let mut units = Units::with_capacity(tables.len());
        let mut collisions = Vec::new();

        for (table, columns) in tables {
            let unit = emit(table, columns, self.config);
            let type_name = unit.type_name.clone();
            if let Some(replaced) = units.insert(type_name.clone(), unit) {
                warn!(
                    "Struct name {} from table {} overwrites the one from table {}",
                    type_name, table, replaced.table_name
                );
                collisions.push(Collision {
                    type_name,
                    replaced_table: replaced.table_name,
                    table: table.clone(),
                });
            }
        }

        (units, collisions)
    }

    /// Render the combined file: one package clause followed by every struct
    pub fn render_single_file(&self, units: &Units) -> String {
        let imports: BTreeSet<&'static str> = units
            .values()
            .flat_map(|u| u.imports.iter().copied())
            .collect();

        let mut content = format!("package {}\n\n", self.config.package_name);
        content.push_str(&render_imports(&imports));

        let bodies: Vec<&str> = units.values().map(|u| u.body.as_str()).collect();
        content.push_str(&bodies.join("\n"));
        content
    }

    /// File name for a struct under `file_name_fmt`
    pub fn file_name(&self, type_name: &str) -> String {
        format!(
            "{}.{}",
            format_name(type_name, self.config.file_name_fmt),
            defaults::FILE_EXTENSION
        )
    }

    fn write_single_file(
        &self,
        units: &Units,
        path: &Path,
        report: &mut GenerationReport,
    ) -> Result<()> {
        let content = self.render_single_file(units);

        if self.config.dry_run {
            info!("Dry run: would write {} structs to {:?}", units.len(), path);
            report.written.push(path.to_path_buf());
            return Ok(());
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| DbStructError::write(dir, e))?;
        }
        fs::write(path, content).map_err(|e| DbStructError::write(path, e))?;
        info!("Wrote {} structs to {:?}", units.len(), path);

        if self.config.gofmt {
            format_file(path);
        }
        report.written.push(path.to_path_buf());
        Ok(())
    }

    fn write_per_file(&self, units: &Units, dir: &Path, report: &mut GenerationReport) -> Result<()> {
        if !self.config.dry_run {
            fs::create_dir_all(dir).map_err(|e| DbStructError::write(dir, e))?;
        }

        let mut claimed: HashMap<PathBuf, &str> = HashMap::with_capacity(units.len());
        for (type_name, unit) in units {
            let path = dir.join(self.file_name(type_name));

            if let Some(previous) = claimed.insert(path.clone(), type_name) {
                warn!(
                    "File {:?} for struct {} overwrites the one for struct {}",
                    path, type_name, previous
                );
                report.written.retain(|p| p != &path);
                report.file_collisions.push(FileCollision {
                    path: path.clone(),
                    replaced_type: previous.to_string(),
                    type_name: type_name.clone(),
                });
            }

            if self.config.dry_run {
                info!("Dry run: would write {} -> {:?}", type_name, path);
                report.written.push(path);
                continue;
            }

            debug!("Writing struct {} -> {:?}", type_name, path);
            if let Err(e) = fs::write(&path, &unit.body) {
                error!("Failed to write struct {} to {:?}: {}", type_name, path, e);
                report.failed.push(FailedWrite {
                    path,
                    error: e.to_string(),
                });
                continue;
            }

            if self.config.gofmt {
                format_file(&path);
            }
            report.written.push(path);
        }

        info!(
            "Wrote {} struct files to {:?} ({} failed)",
            report.written.len(),
            dir,
            report.failed.len()
        );
        Ok(())
    }
}
