//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod rows;
pub mod text;
