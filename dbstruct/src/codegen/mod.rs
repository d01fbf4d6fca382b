//! Code generation module

mod code_generator;
mod naming;
mod struct_emitter;
mod type_mapper;

pub use code_generator::*;
pub use naming::*;
pub use struct_emitter::{emit, GeneratedUnit};
pub use type_mapper::*;

use std::path::Path;

/// Best-effort gofmt on a generated file.
pub(crate) fn format_file(path: &Path) {
    let _ = std::process::Command::new("gofmt")
        .arg("-w")
        .arg(path)
        .output();
}
