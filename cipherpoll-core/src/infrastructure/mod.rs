//! Infrastructure layer: I/O and external integrations.

pub mod compute;
pub mod config;
pub mod ledger;
pub mod logging;
