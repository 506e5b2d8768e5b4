//! Disk space check for a workspace
//!
//! `DiskMonitor` owns an immutable [`Configuration`] and a disk usage source.
//! A check never fails from the caller's point of view: a disabled monitor
//! or an unreadable filesystem simply produces no output.

use std::path::Path;

use crate::config::Configuration;
use crate::disk::{DiskUsageProvider, StatvfsProvider};
use crate::display::{Presenter, Style};
use crate::render::render;
use crate::severity::Severity;

/// What a check decided to show
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub header: String,
    pub message: String,
}

impl Notification {
    pub fn style(&self) -> Style {
        self.severity.style()
    }
}

pub struct DiskMonitor<D = StatvfsProvider> {
    config: Configuration,
    disk: D,
}

impl DiskMonitor<StatvfsProvider> {
    /// Create a monitor that queries the real filesystem
    pub fn new(config: Configuration) -> Self {
        DiskMonitor::with_provider(config, StatvfsProvider)
    }
}

impl<D: DiskUsageProvider> DiskMonitor<D> {
    pub fn with_provider(config: Configuration, disk: D) -> Self {
        DiskMonitor { config, disk }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Decide what, if anything, to show for `workspace`
    pub fn evaluate(&self, workspace: impl AsRef<Path>) -> Option<Notification> {
        if !self.config.behavior.enabled {
            return None;
        }

        let workspace = workspace.as_ref();
        let snapshot = match self.disk.usage(workspace) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::debug!(error = %e, "skipping disk check");
                return None;
            }
        };

        let severity = Severity::classify(snapshot.usage_percent, &self.config.thresholds);
        tracing::debug!(
            workspace = %workspace.display(),
            usage_percent = snapshot.usage_percent,
            ?severity,
            "disk usage classified"
        );

        let template = self.template_for(severity)?;
        Some(Notification {
            severity,
            header: self.config.header(),
            message: render(template, &snapshot),
        })
    }

    /// Run the check and hand any notification to `out`
    pub fn check<P: Presenter + ?Sized>(&self, workspace: impl AsRef<Path>, out: &mut P) {
        if let Some(notification) = self.evaluate(workspace) {
            out.present(Style::Header, &notification.header);
            out.present(notification.style(), &notification.message);
        }
    }

    fn template_for(&self, severity: Severity) -> Option<&str> {
        match severity {
            Severity::Critical => Some(self.config.messages.critical_template.as_str()),
            Severity::Warning => Some(self.config.messages.warning_template.as_str()),
            Severity::Healthy if self.config.display.show_when_healthy => {
                Some(self.config.display.healthy_template.as_str())
            }
            Severity::Healthy => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::{DiskError, UsageSnapshot};
    use std::cell::Cell;

    fn snapshot(percent: f64) -> UsageSnapshot {
        UsageSnapshot {
            usage_percent: percent,
            used: "480G".to_string(),
            available: "20G".to_string(),
            total: "500G".to_string(),
        }
    }

    struct CountingProvider {
        calls: Cell<usize>,
    }

    impl DiskUsageProvider for CountingProvider {
        fn usage(&self, _path: &Path) -> Result<UsageSnapshot, DiskError> {
            self.calls.set(self.calls.get() + 1);
            Ok(snapshot(99.0))
        }
    }

    #[test]
    fn test_critical_notification() {
        let monitor = DiskMonitor::with_provider(Configuration::default(), snapshot(96.0));
        let n = monitor.evaluate("/work").unwrap();
        assert_eq!(n.severity, Severity::Critical);
        assert_eq!(n.header, "💾 Disk Space Status");
        assert!(n.message.contains("96% used (only 20G remaining)"));
        assert_eq!(n.style(), Style::Failure);
    }

    #[test]
    fn test_warning_notification() {
        let monitor = DiskMonitor::with_provider(Configuration::default(), snapshot(85.0));
        let n = monitor.evaluate("/work").unwrap();
        assert_eq!(n.severity, Severity::Warning);
        assert_eq!(n.message, "Disk space: 85% used (20G available)");
    }

    #[test]
    fn test_healthy_hidden_by_default() {
        let monitor = DiskMonitor::with_provider(Configuration::default(), snapshot(50.0));
        assert_eq!(monitor.evaluate("/work"), None);
    }

    #[test]
    fn test_healthy_shown_when_enabled() {
        let mut config = Configuration::default();
        config.display.show_when_healthy = true;
        config.display.healthy_template = "fine: {used} of {total}".to_string();

        let monitor = DiskMonitor::with_provider(config, snapshot(50.0));
        let mut out: Vec<(Style, String)> = Vec::new();
        monitor.check("/work", &mut out);

        assert_eq!(
            out,
            vec![
                (Style::Header, "💾 Disk Space Status".to_string()),
                (Style::Success, "fine: 480G of 500G".to_string()),
            ]
        );
    }

    #[test]
    fn test_disabled_skips_disk_query() {
        let mut config = Configuration::default();
        config.behavior.enabled = false;

        let monitor = DiskMonitor::with_provider(
            config,
            CountingProvider {
                calls: Cell::new(0),
            },
        );
        let mut out: Vec<(Style, String)> = Vec::new();
        monitor.check("/work", &mut out);

        assert!(out.is_empty());
        assert_eq!(monitor.disk.calls.get(), 0);
    }

    #[test]
    fn test_enabled_queries_disk_once() {
        let monitor = DiskMonitor::with_provider(
            Configuration::default(),
            CountingProvider {
                calls: Cell::new(0),
            },
        );
        let mut out: Vec<(Style, String)> = Vec::new();
        monitor.check("/work", &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(monitor.disk.calls.get(), 1);
    }

    #[test]
    fn test_config_accessor() {
        let monitor = DiskMonitor::new(Configuration::default());
        assert_eq!(monitor.config(), &Configuration::default());
    }
}
