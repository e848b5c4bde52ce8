//! Shared pieces of the `pawdeck` binary: configuration and table output

pub mod config;
pub mod output;
