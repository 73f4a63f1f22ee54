//! The annotation session state machine.

use core_types::{SlotLabel, SlotMode, SpanKey, TokenId};

use crate::span::{Span, SpanLedger};

/// Free text must exceed this many characters before submission is
/// enabled in the "not applicable" workflow.
pub const MIN_FREE_TEXT_CHARS: usize = 15;

/// Where the session currently is in the select-then-commit cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No selection is highlighted.
    Idle,
    /// A non-empty normalized selection exists but is not yet committed.
    Highlighting,
}

/// Outcome of an "add" action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The highlight was frozen into a committed span.
    Committed { key: SpanKey },
    /// There was nothing (or only placeholder text) to commit; the
    /// pending slot was discarded silently.
    Rejected,
}

/// One page view's annotation state.
///
/// Owns the open-slot label, the in-progress highlight, the committed
/// span ledger, the applicability flag, and the free-text fallback.
/// Constructed once at page load and mutated only by the widget
/// controller's event handlers; reset means constructing a new value.
#[derive(Clone, Debug)]
pub struct Session {
    mode: SlotMode,
    filler: String,
    open_slot: SlotLabel,
    highlight_ids: Vec<TokenId>,
    highlight_text: String,
    ledger: SpanLedger,
    applicable: bool,
    free_text: String,
}

impl Session {
    /// Start a session in the given mode. `filler` is the slot
    /// placeholder text a highlight must differ from to be committable.
    pub fn new(mode: SlotMode, filler: impl Into<String>) -> Self {
        Self {
            mode,
            filler: filler.into(),
            open_slot: mode.initial_slot(),
            highlight_ids: Vec::new(),
            highlight_text: String::new(),
            ledger: SpanLedger::new(),
            applicable: true,
            free_text: String::new(),
        }
    }

    #[inline]
    pub fn mode(&self) -> SlotMode {
        self.mode
    }

    #[inline]
    pub fn open_slot(&self) -> SlotLabel {
        self.open_slot
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        if self.highlight_ids.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::Highlighting
        }
    }

    #[inline]
    pub fn span_count(&self) -> usize {
        self.ledger.len()
    }

    #[inline]
    pub fn ledger(&self) -> &SpanLedger {
        &self.ledger
    }

    /// Token ids of the in-progress highlight; empty while idle.
    #[inline]
    pub fn highlight_ids(&self) -> &[TokenId] {
        &self.highlight_ids
    }

    #[inline]
    pub fn highlight_text(&self) -> &str {
        &self.highlight_text
    }

    /// `true` while the "in text" radio option is selected.
    #[inline]
    pub fn applicable(&self) -> bool {
        self.applicable
    }

    #[inline]
    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    /// Record a non-empty normalized selection as the in-progress
    /// highlight for the open slot. Replaces any previous highlight.
    pub fn set_highlight(&mut self, ids: Vec<TokenId>, text: String) {
        debug_assert!(!ids.is_empty());
        log::trace!("highlight {} token(s) for {}", ids.len(), self.open_slot);
        self.highlight_ids = ids;
        self.highlight_text = text;
    }

    /// Drop the in-progress highlight, returning to `Idle`.
    pub fn clear_highlight(&mut self) {
        self.highlight_ids.clear();
        self.highlight_text.clear();
    }

    /// Commit the in-progress highlight into the open slot and open
    /// `next_slot` (single-slot mode always re-opens "claim").
    ///
    /// An empty highlight — or one that still equals the placeholder
    /// filler — is rejected silently: the pending slot is discarded and
    /// the requested slot opens anyway, matching the original widget's
    /// behavior when an "add" control is clicked with nothing selected.
    pub fn commit(&mut self, next_slot: SlotLabel) -> CommitOutcome {
        let next_slot = match self.mode {
            SlotMode::Dual => next_slot,
            SlotMode::Single => SlotLabel::Claim,
        };

        if self.highlight_ids.is_empty() || self.highlight_text == self.filler {
            log::debug!("commit rejected: nothing highlighted for {}", self.open_slot);
            self.clear_highlight();
            self.open_slot = next_slot;
            return CommitOutcome::Rejected;
        }

        let display_text = match self.mode {
            SlotMode::Dual => self.highlight_text.to_lowercase(),
            SlotMode::Single => self.highlight_text.clone(),
        };
        let ids = std::mem::take(&mut self.highlight_ids);
        self.highlight_text.clear();

        let key = self.ledger.commit(self.open_slot, ids, display_text);
        log::debug!(
            "committed span {} as {} ({} total), next slot {}",
            key.as_raw(),
            self.open_slot,
            self.ledger.len(),
            next_slot
        );
        self.open_slot = next_slot;
        CommitOutcome::Committed { key }
    }

    /// Delete the committed span at display index `index`; every later
    /// span renumbers down by one.
    pub fn delete(&mut self, index: usize) -> Option<Span> {
        let removed = self.ledger.remove_at(index)?;
        log::debug!(
            "deleted span {} at index {index} ({} remain)",
            removed.key().as_raw(),
            self.ledger.len()
        );
        Some(removed)
    }

    /// Flip the "in text" / "not applicable" radio.
    ///
    /// Switching to "not applicable" force-clears the highlight and every
    /// committed span (returned for token-state cleanup) and enables the
    /// free-text box. Switching back clears the free text and restores
    /// span-based gating.
    pub fn set_applicable(&mut self, applicable: bool) -> Vec<Span> {
        if self.applicable == applicable {
            return Vec::new();
        }
        self.applicable = applicable;
        if applicable {
            self.free_text.clear();
            Vec::new()
        } else {
            log::debug!(
                "not applicable: clearing {} committed span(s)",
                self.ledger.len()
            );
            self.clear_highlight();
            self.open_slot = self.mode.initial_slot();
            self.ledger.drain_all()
        }
    }

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
    }

    /// Whether the submit control is enabled for the current state.
    pub fn submit_enabled(&self) -> bool {
        if !self.applicable {
            return self.free_text.chars().count() > MIN_FREE_TEXT_CHARS;
        }
        match self.mode {
            SlotMode::Dual => {
                !self.ledger.is_empty()
                    || (!self.highlight_ids.is_empty() && self.highlight_text != self.filler)
            }
            SlotMode::Single => !self.highlight_ids.is_empty(),
        }
    }
}
