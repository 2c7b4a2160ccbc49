//! CLI subcommand implementations.

pub mod add;
pub mod analytics;
pub mod delete;
pub mod list;
pub mod status;
pub mod summary;
pub mod util;

#[cfg(test)]
mod fixtures;
