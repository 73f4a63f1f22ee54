//! # session
//!
//! Annotation session state for the widget: which slot is open, the
//! in-progress highlight, the ledger of committed spans, the
//! applicability flag, and the free-text fallback — plus the result
//! serializers that flatten the session into the submission fields.
//!
//! The session is one explicit value object constructed at page load and
//! owned by the widget controller. It replaces the page-global counters
//! the original widget threaded its state through, and it is UI-agnostic:
//! token display state lives in the `TokenSequence`, not here.

mod results;
mod session;
mod span;

pub use results::{serialize_spans, serialize_token_ids};
pub use session::{CommitOutcome, MIN_FREE_TEXT_CHARS, Session, SessionPhase};
pub use span::{Span, SpanLedger};
