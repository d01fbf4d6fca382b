//! Configuration for dbstruct

pub mod defaults;
mod settings;

pub use settings::{DbStructConfig, Tag};
