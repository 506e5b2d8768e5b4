//! Disk usage severity classification

use crate::config::ThresholdSet;
use crate::display::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Healthy,
    Warning,
    Critical,
}

/// Levels checked in order; the first whose threshold is met wins.
///
/// Critical comes first so that thresholds configured with
/// `critical_percent <= warning_percent` resolve to the louder level.
pub const EVALUATION_ORDER: [Severity; 2] = [Severity::Critical, Severity::Warning];

impl Severity {
    /// Classify a usage percentage against the configured thresholds
    pub fn classify(usage_percent: f64, thresholds: &ThresholdSet) -> Severity {
        EVALUATION_ORDER
            .into_iter()
            .find(|level| {
                level
                    .threshold(thresholds)
                    .is_some_and(|limit| usage_percent >= limit)
            })
            .unwrap_or(Severity::Healthy)
    }

    fn threshold(self, thresholds: &ThresholdSet) -> Option<f64> {
        match self {
            Severity::Critical => Some(thresholds.critical_percent),
            Severity::Warning => Some(thresholds.warning_percent),
            Severity::Healthy => None,
        }
    }

    /// Presentation style for the notification message
    pub fn style(self) -> Style {
        match self {
            Severity::Healthy => Style::Success,
            Severity::Warning => Style::Warning,
            Severity::Critical => Style::Failure,
        }
    }
}
