//! Adapters at the edges of the application: the CLI that drives it and the
//! stores it drives.

pub mod inbound;
pub mod outbound;
