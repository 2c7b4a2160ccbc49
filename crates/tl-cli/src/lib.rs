//! Time log CLI library.
//!
//! This crate provides the command-line interface over the record store.

mod cli;
pub mod commands;
mod config;

pub use cli::{AddArgs, Cli, Commands, ListArgs, SummaryArgs};
pub use config::Config;
