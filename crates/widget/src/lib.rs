//! # widget
//!
//! The annotation widget controller: one event router over the token
//! sequence, the session state machine, and the task externals.
//!
//! Input arrives as [`WidgetEvent`] values from the hosting page — one
//! event per user interaction, dispatched explicitly to the matching
//! handler. Control interactions (add/delete/submit/radio) are distinct
//! event variants, so they can never re-trigger the page-wide pointer-up
//! path; there is no bubbling to stop.
//!
//! Output flows two ways:
//! - immediately, through the [`SelectionHost`] trait the hosting page
//!   implements (clearing the live browser selection, raising blocking
//!   notices), and
//! - per event, as an optional [`WidgetAction`] (the submit payload).
//!
//! What the page should *display* is never pushed anywhere: the
//! [`render`] module projects the current model state into per-token
//! display classes and control visibility on demand.

mod config;
mod controller;
mod event;
mod host;
pub mod render;

pub use config::{PageEnvironment, WidgetConfig};
pub use controller::AnnotationWidget;
pub use event::{Notice, WidgetAction, WidgetEvent};
pub use host::SelectionHost;

pub use core_types::{SlotLabel, SlotMode};
pub use selection_core::RawSelection;
