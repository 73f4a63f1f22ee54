//! Committed spans and the ledger that owns them.

use core_types::{SlotLabel, SpanKey, TokenId};

/// A committed, labeled, contiguous group of annotatable token ids.
///
/// The label and token ids are frozen at commit time. The span's
/// *display index* is not stored: it is its current position in the
/// ledger, so deleting a span renumbers every later span implicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    key: SpanKey,
    label: SlotLabel,
    token_ids: Vec<TokenId>,
    display_text: String,
}

impl Span {
    #[inline]
    pub fn key(&self) -> SpanKey {
        self.key
    }

    #[inline]
    pub fn label(&self) -> SlotLabel {
        self.label
    }

    /// Ordered annotatable token ids, contiguous in sequence order.
    #[inline]
    pub fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }

    /// Text echoed into the span's slot box.
    #[inline]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }
}

/// Ordered collection of committed spans.
///
/// Spans are keyed by a stable [`SpanKey`] that is never reused; the
/// displayed numbering 0..N-1 is always the current position, so it has
/// no gaps after a deletion.
#[derive(Clone, Debug, Default)]
pub struct SpanLedger {
    spans: Vec<Span>,
    next_key: u64,
}

impl SpanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Span> {
        self.spans.get(index)
    }

    /// Current display index of the span with the given key.
    pub fn position(&self, key: SpanKey) -> Option<usize> {
        self.spans.iter().position(|s| s.key == key)
    }

    /// Append a committed span, freezing its label and token ids.
    pub fn commit(
        &mut self,
        label: SlotLabel,
        token_ids: Vec<TokenId>,
        display_text: String,
    ) -> SpanKey {
        let key = SpanKey::from_raw(self.next_key);
        self.next_key += 1;
        self.spans.push(Span {
            key,
            label,
            token_ids,
            display_text,
        });
        key
    }

    /// Remove the span at display index `index`; later spans shift down.
    pub fn remove_at(&mut self, index: usize) -> Option<Span> {
        if index >= self.spans.len() {
            return None;
        }
        Some(self.spans.remove(index))
    }

    /// Remove every span, returning them for token-state cleanup.
    pub fn drain_all(&mut self) -> Vec<Span> {
        std::mem::take(&mut self.spans)
    }
}
