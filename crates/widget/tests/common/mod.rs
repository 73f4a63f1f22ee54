//! Shared helpers for widget integration tests.

use widget::{AnnotationWidget, Notice, PageEnvironment, SelectionHost, SlotMode, WidgetConfig};

/// Host double that records the effects the widget requests.
#[derive(Default)]
pub struct RecordingHost {
    pub cleared: usize,
    pub notices: Vec<Notice>,
}

impl SelectionHost for RecordingHost {
    fn clear_live_selection(&mut self) {
        self.cleared += 1;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

pub fn accepted_page() -> PageEnvironment {
    PageEnvironment {
        page_url: "https://worker.mturk.com/task?assignmentId=3XJ9DEMO".into(),
        referrer: Some("https://www.mturk.com/mturk/preview".into()),
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0".into(),
    }
}

pub fn dual_widget(sequence: tokens::TokenSequence) -> AnnotationWidget {
    AnnotationWidget::new(
        sequence,
        WidgetConfig {
            mode: SlotMode::Dual,
            filler: "highlight a passage".into(),
        },
        &accepted_page(),
    )
}

pub fn single_widget(sequence: tokens::TokenSequence) -> AnnotationWidget {
    AnnotationWidget::new(
        sequence,
        WidgetConfig {
            mode: SlotMode::Single,
            filler: String::new(),
        },
        &accepted_page(),
    )
}
