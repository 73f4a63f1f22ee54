//! The widget controller and its event router.

use core_types::{SlotLabel, SlotMode, TokenId};
use selection_core::{NormalizeOutcome, RawSelection, normalize};
use session::{CommitOutcome, Session, serialize_spans, serialize_token_ids};
use task::{AssignmentStatus, SubmitEndpoint, SubmitPayload, engine_supported};
use tokens::TokenSequence;

use crate::config::{PageEnvironment, WidgetConfig};
use crate::event::{Notice, WidgetAction, WidgetEvent};
use crate::host::SelectionHost;

/// The annotation widget: one instance per page view, owning all mutable
/// state and handling one event at a time.
#[derive(Clone, Debug)]
pub struct AnnotationWidget {
    sequence: TokenSequence,
    session: Session,
    assignment: AssignmentStatus,
    endpoint: SubmitEndpoint,
    user_agent: String,
    engine_supported: bool,
}

impl AnnotationWidget {
    /// Construct the widget over a rendered token sequence, probing the
    /// page environment for acceptance state, submit endpoint, and
    /// engine support.
    pub fn new(sequence: TokenSequence, config: WidgetConfig, page: &PageEnvironment) -> Self {
        let assignment = AssignmentStatus::from_page_url(&page.page_url);
        log::debug!(
            "widget over {} token(s), accepted={}",
            sequence.len(),
            assignment.is_accepted()
        );
        Self {
            sequence,
            session: Session::new(config.mode, config.filler),
            assignment,
            endpoint: SubmitEndpoint::from_referrer(page.referrer.as_deref()),
            user_agent: page.user_agent.clone(),
            engine_supported: engine_supported(&page.user_agent),
        }
    }

    /// Page-load hook: surfaces the unsupported-engine notice, if any.
    ///
    /// The warning is advisory; interaction is not structurally blocked
    /// afterwards.
    pub fn on_page_ready<H: SelectionHost>(&self, host: &mut H) {
        if !self.engine_supported {
            host.notify(Notice::UnsupportedBrowser);
        }
    }

    #[inline]
    pub fn sequence(&self) -> &TokenSequence {
        &self.sequence
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn assignment(&self) -> &AssignmentStatus {
        &self.assignment
    }

    /// Route one event to its handler.
    pub fn handle_event<H: SelectionHost>(
        &mut self,
        event: WidgetEvent,
        host: &mut H,
    ) -> Option<WidgetAction> {
        match event {
            WidgetEvent::PointerUp(raw) => self.on_pointer_up(raw, host),
            WidgetEvent::Commit(label) => self.on_commit(label, host),
            WidgetEvent::Delete(index) => self.on_delete(index),
            WidgetEvent::SetApplicable(applicable) => self.on_set_applicable(applicable, host),
            WidgetEvent::FreeTextEdited(text) => self.on_free_text(text),
            WidgetEvent::Submit => self.on_submit(),
        }
    }

    /// Pointer released over the token area: snap the raw selection and
    /// highlight the result for the open slot.
    fn on_pointer_up<H: SelectionHost>(
        &mut self,
        raw: RawSelection,
        host: &mut H,
    ) -> Option<WidgetAction> {
        if !self.assignment.is_accepted() {
            host.notify(Notice::AcceptHit);
            return None;
        }
        if !self.session.applicable() {
            return None;
        }

        // Re-normalizing is idempotent: the previous in-progress
        // highlight goes away before the new outcome is applied.
        self.sequence.clear_highlight();
        self.session.clear_highlight();

        match normalize(raw, &self.sequence) {
            NormalizeOutcome::Empty => {}
            NormalizeOutcome::CrossedLock => {
                log::debug!("selection crossed a committed span, discarded");
                host.clear_live_selection();
            }
            NormalizeOutcome::Tokens(ids) => {
                let Some(window) = self.window_of(&ids) else {
                    return None;
                };
                let text = self.sequence.text_of(window.clone()).to_string();
                self.sequence.highlight(window, self.session.open_slot());
                self.session.set_highlight(ids, text);
                host.clear_live_selection();
            }
        }
        None
    }

    /// "add <slot>" clicked: commit the highlight and open `label` next.
    fn on_commit<H: SelectionHost>(
        &mut self,
        label: SlotLabel,
        host: &mut H,
    ) -> Option<WidgetAction> {
        if !self.session.applicable() {
            return None;
        }
        match self.session.commit(label) {
            CommitOutcome::Committed { key } => self.sequence.lock_highlighted(key),
            CommitOutcome::Rejected => self.sequence.clear_highlight(),
        }
        host.clear_live_selection();
        None
    }

    /// Delete the committed span at `index`; later spans renumber down.
    fn on_delete(&mut self, index: usize) -> Option<WidgetAction> {
        if let Some(span) = self.session.delete(index) {
            self.sequence.unlock(span.key());
        }
        None
    }

    /// Radio change between "in text" and "not applicable".
    fn on_set_applicable<H: SelectionHost>(
        &mut self,
        applicable: bool,
        host: &mut H,
    ) -> Option<WidgetAction> {
        let was = self.session.applicable();
        let cleared = self.session.set_applicable(applicable);
        if was && !applicable {
            for span in &cleared {
                self.sequence.unlock(span.key());
            }
            self.sequence.clear_highlight();
            host.clear_live_selection();
        }
        None
    }

    fn on_free_text(&mut self, text: String) -> Option<WidgetAction> {
        // The free-text box is only live in the "not applicable" workflow.
        if self.session.applicable() {
            return None;
        }
        self.session.set_free_text(text);
        None
    }

    /// Submit clicked: assemble the hidden-field payload.
    fn on_submit(&mut self) -> Option<WidgetAction> {
        if !self.session.submit_enabled() {
            return None;
        }
        let assignment_id = self.assignment.assignment_id()?.to_string();
        let token_data = match self.session.mode() {
            SlotMode::Dual => serialize_spans(self.session.ledger()),
            SlotMode::Single => serialize_token_ids(self.session.highlight_ids()),
        };
        log::debug!("submitting {} byte(s) of token data", token_data.len());
        Some(WidgetAction::Submit {
            endpoint: self.endpoint,
            payload: SubmitPayload {
                assignment_id,
                user_agent: self.user_agent.clone(),
                free_text: self.session.free_text().to_string(),
                token_data,
            },
        })
    }

    /// Contiguous index window spanned by a normalized id list.
    fn window_of(&self, ids: &[TokenId]) -> Option<std::ops::Range<usize>> {
        let first = self.sequence.index_of(ids.first()?)?;
        let last = self.sequence.index_of(ids.last()?)?;
        Some(first..last + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{SlotMode, TokenState};
    use tokens::tokenize;

    struct RecordingHost {
        cleared: usize,
        notices: Vec<Notice>,
    }

    impl RecordingHost {
        fn new() -> Self {
            Self {
                cleared: 0,
                notices: Vec::new(),
            }
        }
    }

    impl SelectionHost for RecordingHost {
        fn clear_live_selection(&mut self) {
            self.cleared += 1;
        }

        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    fn accepted_page() -> PageEnvironment {
        PageEnvironment {
            page_url: "https://worker.mturk.com/task?assignmentId=3XJ9".into(),
            referrer: Some("https://www.mturk.com/".into()),
            user_agent: "Mozilla/5.0 Chrome/120.0".into(),
        }
    }

    fn preview_page() -> PageEnvironment {
        PageEnvironment {
            page_url: "https://worker.mturk.com/task?assignmentId=ASSIGNMENT_ID_NOT_AVAILABLE"
                .into(),
            referrer: None,
            user_agent: "Mozilla/5.0 Chrome/120.0".into(),
        }
    }

    fn dual_widget(sentence: &str) -> AnnotationWidget {
        AnnotationWidget::new(
            tokenize(sentence),
            WidgetConfig {
                mode: SlotMode::Dual,
                filler: String::new(),
            },
            &accepted_page(),
        )
    }

    #[test]
    fn pointer_up_highlights_and_clears_live_selection() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();

        // Bytes 3..8 cover " cat ".
        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(3, 8)), &mut host);

        let ids: Vec<&str> = widget
            .session()
            .highlight_ids()
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(ids, vec!["token_2"]);
        assert_eq!(widget.session().highlight_text(), "cat");
        assert_eq!(host.cleared, 1);
        assert!(widget.sequence().token(2).unwrap().state().is_highlighted());
    }

    #[test]
    fn preview_mode_blocks_selection_with_a_notice() {
        let mut widget = AnnotationWidget::new(
            tokenize("the cat sat"),
            WidgetConfig::default(),
            &preview_page(),
        );
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(0, 7)), &mut host);

        assert_eq!(host.notices, vec![Notice::AcceptHit]);
        assert!(widget.session().highlight_ids().is_empty());
        assert_eq!(host.cleared, 0);
    }

    #[test]
    fn unsupported_engine_raises_a_page_ready_notice() {
        let widget = AnnotationWidget::new(
            tokenize("x"),
            WidgetConfig::default(),
            &PageEnvironment {
                page_url: "https://x.test/?assignmentId=1".into(),
                referrer: None,
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Trident/7.0)".into(),
            },
        );
        let mut host = RecordingHost::new();
        widget.on_page_ready(&mut host);
        assert_eq!(host.notices, vec![Notice::UnsupportedBrowser]);
    }

    #[test]
    fn commit_locks_tokens_and_rotates_the_open_slot() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(3, 8)), &mut host);
        widget.handle_event(WidgetEvent::Commit(SlotLabel::But), &mut host);

        assert_eq!(widget.session().span_count(), 1);
        assert_eq!(widget.session().open_slot(), SlotLabel::But);
        assert!(widget.sequence().token(2).unwrap().state().is_locked());
    }

    #[test]
    fn selection_across_a_committed_span_is_discarded() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(4, 7)), &mut host);
        widget.handle_event(WidgetEvent::Commit(SlotLabel::But), &mut host);
        let cleared_before = host.cleared;

        // "the ... sat" reaches across the locked "cat".
        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(0, 11)), &mut host);

        assert!(widget.session().highlight_ids().is_empty());
        assert_eq!(host.cleared, cleared_before + 1);
    }

    #[test]
    fn delete_unlocks_tokens_again() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(4, 7)), &mut host);
        widget.handle_event(WidgetEvent::Commit(SlotLabel::But), &mut host);
        widget.handle_event(WidgetEvent::Delete(0), &mut host);

        assert_eq!(widget.session().span_count(), 0);
        assert_eq!(widget.sequence().token(2).unwrap().state(), TokenState::Plain);

        // The tokens are selectable again.
        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(0, 11)), &mut host);
        assert_eq!(widget.session().highlight_ids().len(), 3);
    }

    #[test]
    fn not_applicable_resets_all_token_state() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(4, 7)), &mut host);
        widget.handle_event(WidgetEvent::Commit(SlotLabel::But), &mut host);
        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(0, 3)), &mut host);

        widget.handle_event(WidgetEvent::SetApplicable(false), &mut host);

        assert_eq!(widget.session().span_count(), 0);
        assert!(widget.session().highlight_ids().is_empty());
        assert!(
            widget
                .sequence()
                .iter()
                .all(|t| t.state() == TokenState::Plain)
        );
    }

    #[test]
    fn pointer_up_while_not_applicable_is_ignored() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::SetApplicable(false), &mut host);
        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(0, 7)), &mut host);

        assert!(widget.session().highlight_ids().is_empty());
        assert!(host.notices.is_empty());
    }

    #[test]
    fn submit_produces_the_grouped_payload() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(4, 7)), &mut host);
        widget.handle_event(WidgetEvent::Commit(SlotLabel::But), &mut host);
        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(8, 11)), &mut host);
        widget.handle_event(WidgetEvent::Commit(SlotLabel::Because), &mut host);

        let action = widget.handle_event(WidgetEvent::Submit, &mut host);
        let Some(WidgetAction::Submit { endpoint, payload }) = action else {
            panic!("expected a submit action");
        };
        assert_eq!(endpoint, SubmitEndpoint::Production);
        assert_eq!(payload.assignment_id, "3XJ9");
        assert_eq!(
            payload.token_data,
            "[becauseid:0{token_2,}],[butid:1{token_4,}]"
        );
    }

    #[test]
    fn submit_is_refused_while_gated() {
        let mut widget = dual_widget("the cat sat");
        let mut host = RecordingHost::new();
        assert!(widget.handle_event(WidgetEvent::Submit, &mut host).is_none());

        widget.handle_event(WidgetEvent::SetApplicable(false), &mut host);
        widget.handle_event(
            WidgetEvent::FreeTextEdited("too short".into()),
            &mut host,
        );
        assert!(widget.handle_event(WidgetEvent::Submit, &mut host).is_none());

        widget.handle_event(
            WidgetEvent::FreeTextEdited("the review names no reason at all".into()),
            &mut host,
        );
        let action = widget.handle_event(WidgetEvent::Submit, &mut host);
        let Some(WidgetAction::Submit { payload, .. }) = action else {
            panic!("expected a submit action");
        };
        assert_eq!(payload.token_data, "");
        assert_eq!(payload.free_text, "the review names no reason at all");
    }

    #[test]
    fn single_mode_submits_the_flat_highlight_ids() {
        let mut widget = AnnotationWidget::new(
            tokenize("the cat sat"),
            WidgetConfig {
                mode: SlotMode::Single,
                filler: String::new(),
            },
            &accepted_page(),
        );
        let mut host = RecordingHost::new();

        widget.handle_event(WidgetEvent::PointerUp(RawSelection::new(0, 7)), &mut host);
        let action = widget.handle_event(WidgetEvent::Submit, &mut host);
        let Some(WidgetAction::Submit { payload, .. }) = action else {
            panic!("expected a submit action");
        };
        assert_eq!(payload.token_data, "token_0,token_2");
    }
}
