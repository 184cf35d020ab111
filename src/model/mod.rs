//! Server-facing entities
//!
//! Everything the channel service reads or returns lives in models.rs
//! and is re-exported here.

mod models;

pub use models::*;
