//! Date night restaurant directory core.
//!
//! Loads the flat restaurant dataset, derives descriptive fields, computes the
//! date-night score, and exposes the read-only views consumed by the site.

pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;
