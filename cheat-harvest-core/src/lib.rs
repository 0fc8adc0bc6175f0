//! Shared record types and name handling for cheat-harvest.
//!
//! Everything here is pure data: no network access and no filesystem
//! writes. The scraper crate produces these records, the frontend crate
//! materializes them.

pub mod sanitize;
pub mod types;

pub use sanitize::{folder_name_or, sanitize_filename, sanitize_name};
pub use types::{Build, BuildId, Cheat, CheatSource, HarvestedTitle, Title};
