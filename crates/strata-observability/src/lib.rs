//! Strata Observability Module
//!
//! Provides:
//! - Console logging through `tracing-subscriber`
//! - Security synchronization metrics through the `metrics` facade
//!
//! Metrics can be compiled out via the `observability` feature flag. At
//! runtime they can be further disabled with `OBSERVABILITY_ENABLED=false`.
//! Counters are only kept once a binary calls [`init_metrics`], which
//! installs a Prometheus recorder and returns the handle that renders it.
//!
//! # Examples
//!
//! ```no_run
//! use strata_observability::{init_console_logging, init_metrics, track_properties_written};
//!
//! init_console_logging();
//! let metrics = init_metrics();
//! track_properties_written("default_live", 2);
//!
//! if let Some(handle) = metrics {
//!     println!("{}", handle.render());
//! }
//! ```

pub mod logging;

#[cfg(feature = "observability")]
pub mod metrics;

pub use logging::{LogFormat, init_console_logging};

#[cfg(feature = "observability")]
pub use metrics::{
    MetricsHandle, init_metrics, is_observability_enabled, track_document_hydrated,
    track_properties_removed, track_properties_written,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    /// No-op observability check when feature disabled
    pub fn is_observability_enabled() -> bool {
        false
    }

    /// Placeholder handle; there is never a recorder to render
    #[derive(Clone)]
    pub struct MetricsHandle;

    impl MetricsHandle {
        pub fn render(&self) -> String {
            String::new()
        }
    }

    pub fn init_metrics() -> Option<MetricsHandle> {
        None
    }

    pub fn track_properties_written(_workspace: &str, _count: usize) {}
    pub fn track_properties_removed(_workspace: &str, _count: usize) {}
    pub fn track_document_hydrated(_roles: usize) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;

#[cfg(all(test, not(feature = "observability")))]
mod tests {
    use super::*;

    #[test]
    fn test_stubs_record_nothing() {
        assert!(!is_observability_enabled());
        assert!(init_metrics().is_none());
        assert!(MetricsHandle.render().is_empty());

        track_properties_written("default", 3);
        track_properties_removed("default_live", 1);
        track_document_hydrated(2);
    }
}
