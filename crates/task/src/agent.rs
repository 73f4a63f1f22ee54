//! Legacy browser engine detection.

/// `false` for the legacy Trident engine (Internet Explorer), whose
/// selection API the widget does not support.
///
/// Detection is advisory: the widget surfaces a blocking notice at page
/// load but does not structurally prevent interaction afterwards.
pub fn engine_supported(user_agent: &str) -> bool {
    !(user_agent.contains("MSIE") || user_agent.contains("Trident/"))
}
