//! Widget construction inputs.

use core_types::SlotMode;

/// Static widget configuration, fixed at page load.
#[derive(Clone, Debug, Default)]
pub struct WidgetConfig {
    /// Dual premise slots ("because"/"but") or the single claim slot.
    pub mode: SlotMode,
    /// Placeholder text shown in an unfilled slot box; a highlight that
    /// still equals it cannot be committed.
    pub filler: String,
}

/// Read-once page environment the widget probes at construction.
#[derive(Clone, Debug)]
pub struct PageEnvironment {
    /// Full page URL, carrying the `assignmentId` query parameter.
    pub page_url: String,
    /// `document.referrer`, used to pick the sandbox submit endpoint.
    pub referrer: Option<String>,
    /// `navigator.userAgent`, echoed into the submission and probed for
    /// unsupported legacy engines.
    pub user_agent: String,
}
