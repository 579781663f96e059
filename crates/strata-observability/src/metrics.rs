use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::warn;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

/// Rendering side of the installed Prometheus recorder.
#[derive(Clone)]
pub struct MetricsHandle(PrometheusHandle);

impl MetricsHandle {
    /// Current metrics in the Prometheus text format.
    pub fn render(&self) -> String {
        self.0.render()
    }
}

/// Install the Prometheus recorder as the global metrics recorder.
/// Returns None if observability is disabled or a recorder is already installed
pub fn init_metrics() -> Option<MetricsHandle> {
    if !is_observability_enabled() {
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(MetricsHandle(handle)),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// Track role permission properties written to a workspace
pub fn track_properties_written(workspace: &str, count: usize) {
    if !is_observability_enabled() || count == 0 {
        return;
    }
    counter!("security_properties_written_total", "workspace" => workspace.to_string())
        .increment(count as u64);
}

/// Track role permission properties removed from a workspace
pub fn track_properties_removed(workspace: &str, count: usize) {
    if !is_observability_enabled() || count == 0 {
        return;
    }
    counter!("security_properties_removed_total", "workspace" => workspace.to_string())
        .increment(count as u64);
}

/// Track a document whose permissions were hydrated
pub fn track_document_hydrated(roles: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("security_documents_hydrated_total").increment(1);
    counter!("security_roles_hydrated_total").increment(roles as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_with(record: impl FnOnce()) -> String {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, record);
        handle.render()
    }

    #[test]
    fn test_property_counters_are_labelled_by_workspace() {
        let rendered = render_with(|| {
            track_properties_written("default", 2);
            track_properties_written("default_live", 1);
            track_properties_written("default", 3);
            track_properties_removed("default_live", 4);
        });

        assert!(rendered.contains(r#"security_properties_written_total{workspace="default"} 5"#));
        assert!(
            rendered.contains(r#"security_properties_written_total{workspace="default_live"} 1"#)
        );
        assert!(
            rendered.contains(r#"security_properties_removed_total{workspace="default_live"} 4"#)
        );
    }

    #[test]
    fn test_zero_counts_are_not_recorded() {
        let rendered = render_with(|| {
            track_properties_written("default", 0);
            track_properties_removed("default", 0);
        });

        assert!(!rendered.contains("security_properties_written_total"));
        assert!(!rendered.contains("security_properties_removed_total"));
    }

    #[test]
    fn test_hydrated_documents_and_roles() {
        let rendered = render_with(|| {
            track_document_hydrated(2);
            track_document_hydrated(0);
        });

        assert!(rendered.contains("security_documents_hydrated_total 2"));
        assert!(rendered.contains("security_roles_hydrated_total 2"));
    }
}
