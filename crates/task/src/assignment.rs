//! HIT acceptance detection and submit-endpoint selection.

use url::Url;

/// Query parameter the platform appends to the task page URL.
pub const ASSIGNMENT_ID_PARAM: &str = "assignmentId";

/// Reserved assignment id the platform sends while a worker is previewing
/// the task without having accepted it.
pub const PREVIEW_SENTINEL: &str = "ASSIGNMENT_ID_NOT_AVAILABLE";

const PRODUCTION_SUBMIT_URL: &str = "https://www.mturk.com/mturk/externalSubmit";
const SANDBOX_SUBMIT_URL: &str = "https://workersandbox.mturk.com/mturk/externalSubmit";

/// Whether the worker has accepted the task or is only previewing it.
///
/// Selections are only processed once the task is accepted; in preview
/// mode the widget surfaces a blocking notice instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignmentStatus {
    Accepted { assignment_id: String },
    Preview,
}

impl AssignmentStatus {
    /// Derive the acceptance state from the page URL.
    ///
    /// A missing or unparseable URL, a missing `assignmentId` parameter,
    /// and the reserved preview sentinel all count as preview: the gate
    /// fails closed.
    pub fn from_page_url(page_url: &str) -> Self {
        let Ok(url) = Url::parse(page_url) else {
            log::debug!("unparseable page url, treating as preview");
            return AssignmentStatus::Preview;
        };
        let Some(id) = url
            .query_pairs()
            .find(|(key, _)| key == ASSIGNMENT_ID_PARAM)
            .map(|(_, value)| value.into_owned())
        else {
            return AssignmentStatus::Preview;
        };
        if id.is_empty() || id == PREVIEW_SENTINEL {
            AssignmentStatus::Preview
        } else {
            AssignmentStatus::Accepted { assignment_id: id }
        }
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, AssignmentStatus::Accepted { .. })
    }

    /// The assignment id to echo into the submission, if accepted.
    pub fn assignment_id(&self) -> Option<&str> {
        match self {
            AssignmentStatus::Accepted { assignment_id } => Some(assignment_id),
            AssignmentStatus::Preview => None,
        }
    }
}

/// Which external-submit endpoint the hosting form should post to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitEndpoint {
    Production,
    Sandbox,
}

impl SubmitEndpoint {
    /// Sandbox when the page was reached from the worker sandbox,
    /// production otherwise.
    pub fn from_referrer(referrer: Option<&str>) -> Self {
        match referrer {
            Some(r) if r.contains("workersandbox") => SubmitEndpoint::Sandbox,
            _ => SubmitEndpoint::Production,
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            SubmitEndpoint::Production => PRODUCTION_SUBMIT_URL,
            SubmitEndpoint::Sandbox => SANDBOX_SUBMIT_URL,
        }
    }
}
