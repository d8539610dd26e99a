//! CLI module graph.

pub mod close;
pub mod command;
pub mod config;
pub mod context;
pub mod fee;
pub mod history;
pub mod output;
pub mod participant;
pub mod paths;
pub mod quote;
pub mod wager;
