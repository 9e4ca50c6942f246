//! Freightpath CLI library.
//!
//! Configuration layering and output formatting shared by the `freightpath`
//! binary's subcommands.

pub mod config;
pub mod output;
