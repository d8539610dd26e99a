//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`outbound::WagerStore`], [`outbound::ParticipantStore`],
//!   [`outbound::HistoryStore`] - entity persistence for the CRUD layer
//! - [`outbound::SettlementStore`] - consistent snapshot plus the atomic
//!   daily-closure commit

pub mod outbound;
