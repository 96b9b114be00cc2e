//! CLI commands.

pub mod run;
pub mod summary;
