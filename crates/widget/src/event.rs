//! Widget input events and output actions.

use core_types::SlotLabel;
use selection_core::RawSelection;
use task::{SubmitEndpoint, SubmitPayload};

/// One user interaction, routed by the controller.
///
/// Each interactive element maps to its own variant; the hosting page
/// decides which element was hit and sends exactly one event, so control
/// clicks and text-area pointer-ups are mutually exclusive by
/// construction.
#[derive(Clone, Debug)]
pub enum WidgetEvent {
    /// Pointer released over the token area with the given raw selection.
    PointerUp(RawSelection),
    /// An "add <slot>" control was clicked: commit the in-progress
    /// highlight and open `label` as the next slot.
    Commit(SlotLabel),
    /// The delete control of the committed span at the given display
    /// index was clicked.
    Delete(usize),
    /// The "in text" (`true`) / "not applicable" (`false`) radio changed.
    SetApplicable(bool),
    /// The free-text box content changed.
    FreeTextEdited(String),
    /// The submit control was clicked.
    Submit,
}

/// Blocking notices the hosting page surfaces to the worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The task is being previewed; selections are ignored until it is
    /// accepted.
    AcceptHit,
    /// The browser engine is not supported.
    UnsupportedBrowser,
}

/// An outward action produced by an event.
#[derive(Clone, Debug)]
pub enum WidgetAction {
    /// Populate the hidden fields and submit the hosting form.
    Submit {
        endpoint: SubmitEndpoint,
        payload: SubmitPayload,
    },
}
