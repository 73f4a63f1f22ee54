//! # selection_core
//!
//! UI-agnostic selection snapping for the annotation widget.
//!
//! This crate provides the pure half of the selection pipeline:
//! - [`RawSelection`]: a raw browser selection as normalized byte anchors
//! - [`normalize`]: snaps a raw selection to token boundaries, producing
//!   the trimmed, ordered list of annotatable token ids (or a reason the
//!   selection must be discarded)
//!
//! ## Design Principles
//!
//! This crate does not depend on any DOM, rendering, or event layer. It is
//! a pure function of the raw anchors and the token sequence's current
//! state, so the snapping algorithm can be tested (and fuzzed)
//! independently of the widget controller that applies its outcome.
//!
//! Side effects the original widget performed during snapping — marking
//! highlight classes, clearing the live browser selection — are the
//! caller's job, keyed off the returned [`NormalizeOutcome`].

mod normalize;
mod raw;

pub use normalize::{NormalizeOutcome, normalize};
pub use raw::RawSelection;
