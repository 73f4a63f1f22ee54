//! # task
//!
//! The crowdsourcing-task externals the annotation widget consumes and
//! emits into: HIT acceptance detection from the page URL, the
//! sandbox/production submit endpoint, the legacy-engine user-agent
//! probe, and the hidden-field submission payload.
//!
//! Everything here is read-once page environment or write-once output;
//! no state survives past the form submission.

mod agent;
mod assignment;
mod payload;

pub use agent::engine_supported;
pub use assignment::{
    ASSIGNMENT_ID_PARAM, AssignmentStatus, PREVIEW_SENTINEL, SubmitEndpoint,
};
pub use payload::SubmitPayload;
