//! CLI command handlers for `techtree`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod export;
pub mod import;
pub mod show;
