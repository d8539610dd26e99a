//! Infrastructure concerns: configuration and logging setup.

pub mod config;
