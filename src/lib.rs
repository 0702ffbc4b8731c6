//! Asteroid impact simulation: physics core plus catalog, reporting and export.
//!
//! The calculator lives in [`physics`] and has no dependencies on the other
//! crates. Everything else exists to feed it parameters or present its
//! results, so front-ends (CLI, web, notebooks) can share one engine.

pub mod display;

pub use impact_catalog as catalog;
pub use impact_config as config;
pub use impact_core as primitives;
pub use impact_export as export;
pub use impact_physics as physics;
pub use impact_report as report;
pub use impact_service as service;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
