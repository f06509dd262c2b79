//! Metrics collection.
//!
//! # Metrics
//! - `naming_resolutions_total` (counter): resolved operations by `tier`
//! - `naming_resolution_failures_total` (counter): exhausted resolutions
//! - `naming_provider_uri_sources_total` (counter): endpoint lists by `source`
//! - `naming_plugin_load_failures_total` (counter): plugins skipped during discovery
//!
//! # Design Decisions
//! - Labels are static strings to keep cardinality bounded
//! - No exporter is bundled; the embedding application installs a recorder

use metrics::counter;

pub fn record_resolution(tier: &'static str) {
    counter!("naming_resolutions_total", "tier" => tier).increment(1);
}

pub fn record_resolution_failure() {
    counter!("naming_resolution_failures_total").increment(1);
}

pub fn record_provider_uri_source(source: &'static str) {
    counter!("naming_provider_uri_sources_total", "source" => source).increment(1);
}

pub fn record_plugin_load_failure() {
    counter!("naming_plugin_load_failures_total").increment(1);
}
