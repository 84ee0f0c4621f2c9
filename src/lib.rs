//! Rollups and derived metrics for drift log dashboards.
//!
//! Data flows one way: a loaded [`entry::EntryStore`] is partitioned per user
//! ([`grouping`]), reduced to scalar metrics ([`metrics`]) and chart buckets
//! ([`rollup`]), decorated through the lookup tables in [`palette`], and
//! assembled into views by [`report`].

pub mod config;
pub mod data;
pub mod entry;
pub mod format;
pub mod grouping;
pub mod logging;
pub mod metrics;
pub mod palette;
pub mod report;
pub mod rollup;
