//! Testing utilities for the fixture workspace
//!
//! Shared reflected fixture types, deterministic specimen contexts and
//! tracing setup.

#![allow(missing_docs)]

mod context;
mod fixtures;

pub use context::{ContextConfig, RecordingContext, SequentialContext};
pub use fixtures::{Attachment, DynamicRecord, Gadget, Thermostat, Widget};

use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber honouring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
