//! The per-render ordered token run.

use core_types::{SlotLabel, SpanKey, TokenId, TokenState};
use std::ops::Range;

use crate::token::Token;

/// Ordered list of the tokens making up one rendered sentence.
///
/// Built once per render; token identity never changes afterwards. The
/// sequence also records the byte range each token's text occupies inside
/// the rendered sentence string, so raw selections (byte anchors) can be
/// intersected with tokens without touching the DOM.
#[derive(Clone, Debug, Default)]
pub struct TokenSequence {
    tokens: Vec<Token>,
    /// Byte offset of each token's text within `rendered`, plus a final
    /// entry equal to `rendered.len()`.
    offsets: Vec<usize>,
    rendered: String,
}

impl TokenSequence {
    /// Build a sequence from externally tokenized elements.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut offsets = Vec::with_capacity(tokens.len() + 1);
        let mut rendered = String::new();
        for token in &tokens {
            offsets.push(rendered.len());
            rendered.push_str(token.text());
        }
        offsets.push(rendered.len());
        Self {
            tokens,
            offsets,
            rendered,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The rendered sentence text, i.e. the concatenation of all token
    /// texts in order. Raw selection anchors are byte offsets into this.
    #[inline]
    pub fn rendered_text(&self) -> &str {
        &self.rendered
    }

    #[inline]
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Position of the token with the given id, if present.
    pub fn index_of(&self, id: &TokenId) -> Option<usize> {
        self.tokens.iter().position(|t| t.id() == id)
    }

    /// Byte range of the token's text within [`rendered_text`](Self::rendered_text).
    pub fn byte_range(&self, index: usize) -> Option<Range<usize>> {
        if index >= self.tokens.len() {
            return None;
        }
        Some(self.offsets[index]..self.offsets[index + 1])
    }

    /// The rendered text covered by a run of tokens.
    pub fn text_of(&self, indices: Range<usize>) -> &str {
        if indices.start >= indices.end || indices.start >= self.tokens.len() {
            return "";
        }
        let end = indices.end.min(self.tokens.len());
        &self.rendered[self.offsets[indices.start]..self.offsets[end]]
    }

    /// Indices of every token whose byte range overlaps `range`, in
    /// document order. Zero-width tokens never intersect.
    pub fn indices_intersecting(&self, range: Range<usize>) -> Vec<usize> {
        if range.start >= range.end {
            return Vec::new();
        }
        (0..self.tokens.len())
            .filter(|&i| {
                let start = self.offsets[i];
                let end = self.offsets[i + 1];
                start < range.end && end > range.start
            })
            .collect()
    }

    /// Index of the first `Locked` token strictly after `index`, if any.
    ///
    /// Locked tokens are the no-select markers a fresh selection may not
    /// reach across.
    pub fn first_locked_after(&self, index: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, t)| t.state().is_locked())
            .map(|(i, _)| i)
    }

    /// Mark a contiguous run of tokens as the in-progress highlight for
    /// `slot`.
    pub fn highlight(&mut self, indices: Range<usize>, slot: SlotLabel) {
        let end = indices.end.min(self.tokens.len());
        for token in &mut self.tokens[indices.start.min(end)..end] {
            token.set_state(TokenState::Highlighted { slot });
        }
    }

    /// Reset every highlighted token to `Plain`.
    ///
    /// Re-highlighting is idempotent: callers clear before reapplying, so
    /// at most one in-progress highlight exists at a time.
    pub fn clear_highlight(&mut self) {
        for token in &mut self.tokens {
            if token.state().is_highlighted() {
                token.set_state(TokenState::Plain);
            }
        }
    }

    /// Freeze the current highlight into the committed span `span`.
    ///
    /// Every highlighted token (including non-annotatable tokens interior
    /// to the run) becomes `Locked`, so later selections cannot reach
    /// across the committed region.
    pub fn lock_highlighted(&mut self, span: SpanKey) {
        for token in &mut self.tokens {
            if token.state().is_highlighted() {
                token.set_state(TokenState::Locked { span });
            }
        }
    }

    /// Release every token locked by the span `span` back to `Plain`.
    pub fn unlock(&mut self, span: SpanKey) {
        for token in &mut self.tokens {
            if token.state() == (TokenState::Locked { span }) {
                token.set_state(TokenState::Plain);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_sat() -> TokenSequence {
        TokenSequence::from_tokens(vec![
            Token::new("the", "the", true),
            Token::new("sp0", " ", false),
            Token::new("cat", "cat", true),
            Token::new("sp1", " ", false),
            Token::new("sat", "sat", true),
        ])
    }

    #[test]
    fn rendered_text_concatenates_in_order() {
        let seq = cat_sat();
        assert_eq!(seq.rendered_text(), "the cat sat");
        assert_eq!(seq.byte_range(2), Some(4..7));
        assert_eq!(seq.text_of(1..4), " cat ");
    }

    #[test]
    fn intersection_respects_partial_overlap() {
        let seq = cat_sat();
        // Covers " cat " (bytes 3..8): space, cat, space.
        assert_eq!(seq.indices_intersecting(3..8), vec![1, 2, 3]);
        // Mid-token anchors still intersect the token.
        assert_eq!(seq.indices_intersecting(5..6), vec![2]);
        // Collapsed range intersects nothing.
        assert!(seq.indices_intersecting(4..4).is_empty());
    }

    #[test]
    fn empty_sequence_has_no_intersections() {
        let seq = TokenSequence::from_tokens(Vec::new());
        assert!(seq.is_empty());
        assert!(seq.indices_intersecting(0..10).is_empty());
        assert_eq!(seq.rendered_text(), "");
    }

    #[test]
    fn lock_round_trip_restores_plain() {
        let mut seq = cat_sat();
        let span = SpanKey::from_raw(0);
        seq.highlight(2..3, SlotLabel::Because);
        assert!(seq.token(2).unwrap().state().is_highlighted());

        seq.lock_highlighted(span);
        assert!(seq.token(2).unwrap().state().is_locked());
        assert_eq!(seq.first_locked_after(0), Some(2));
        assert_eq!(seq.first_locked_after(2), None);

        seq.unlock(span);
        assert_eq!(seq.token(2).unwrap().state(), TokenState::Plain);
    }

    #[test]
    fn clear_highlight_only_touches_highlighted() {
        let mut seq = cat_sat();
        seq.highlight(0..1, SlotLabel::But);
        seq.highlight(4..5, SlotLabel::But);
        seq.lock_highlighted(SpanKey::from_raw(1));
        seq.highlight(2..3, SlotLabel::Because);

        seq.clear_highlight();
        assert_eq!(seq.token(2).unwrap().state(), TokenState::Plain);
        assert!(seq.token(0).unwrap().state().is_locked());
        assert!(seq.token(4).unwrap().state().is_locked());
    }
}
