//! Pure projection from model state to display state.
//!
//! The page renders whatever these functions return; nothing ever reads
//! display classes back into the model. Class names follow the original
//! stylesheet contract (`token`, `highlighted_element`, `element_<k>`,
//! `<label>_highlight`, `noselect`).

use core_types::{SlotLabel, SlotMode, TokenState};
use session::{Session, SessionPhase};
use tokens::TokenSequence;

use crate::controller::AnnotationWidget;

/// Visibility and enablement of the widget's controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub add_because: bool,
    pub add_but: bool,
    pub add_claim: bool,
    /// Per-span delete controls on the committed slot boxes.
    pub delete_controls: bool,
    pub submit: bool,
    pub free_text_enabled: bool,
}

/// Display classes for each token, in sequence order.
pub fn token_classes(sequence: &TokenSequence, session: &Session) -> Vec<String> {
    sequence
        .iter()
        .map(|token| {
            let mut classes = String::new();
            if token.annotatable() {
                classes.push_str("token");
            }
            match token.state() {
                TokenState::Plain => {}
                TokenState::Highlighted { slot } => {
                    push_class(&mut classes, "highlighted_element");
                    push_class(&mut classes, &format!("highlighted_{slot}"));
                }
                TokenState::Locked { span } => {
                    push_class(&mut classes, "noselect");
                    if let Some(index) = session.ledger().position(span) {
                        push_class(&mut classes, &format!("element_{index}"));
                        if let Some(span) = session.ledger().get(index) {
                            push_class(&mut classes, &format!("{}_highlight", span.label()));
                        }
                    }
                }
            }
            classes
        })
        .collect()
}

/// Control visibility for the current session state.
///
/// Dual mode: both add controls show while a fresh highlight (or an empty
/// session) invites a choice of label; once spans exist and the session is
/// idle, only the add control for the slot after the open one shows —
/// committing a "because" span leads to "add but" and vice versa.
pub fn control_state(widget: &AnnotationWidget) -> ControlState {
    let session = widget.session();
    let applicable = session.applicable();
    let highlighting = session.phase() == SessionPhase::Highlighting;

    let (add_because, add_but, add_claim) = if !applicable {
        (false, false, false)
    } else {
        match session.mode() {
            SlotMode::Dual => {
                if highlighting || session.span_count() == 0 {
                    (true, true, false)
                } else {
                    let suggested = session.open_slot().rotated();
                    (
                        suggested == SlotLabel::Because,
                        suggested == SlotLabel::But,
                        false,
                    )
                }
            }
            SlotMode::Single => (false, false, highlighting),
        }
    };

    ControlState {
        add_because,
        add_but,
        add_claim,
        delete_controls: applicable && session.span_count() > 0,
        submit: session.submit_enabled(),
        free_text_enabled: !applicable,
    }
}

fn push_class(classes: &mut String, class: &str) {
    if !classes.is_empty() {
        classes.push(' ');
    }
    classes.push_str(class);
}
