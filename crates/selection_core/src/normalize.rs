//! Snapping a raw selection to token boundaries.

use core_types::TokenId;
use tokens::TokenSequence;

use crate::raw::RawSelection;

/// Result of snapping a raw selection against the token sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// Nothing annotatable was selected; the pointer-up is a no-op.
    Empty,
    /// The trimmed, ordered annotatable token ids. Non-empty, distinct,
    /// in original sequence order.
    Tokens(Vec<TokenId>),
    /// The selection reached across a locked (already committed) token
    /// and must be discarded whole; the caller clears the live browser
    /// selection.
    CrossedLock,
}

/// Snap a raw selection to token boundaries.
///
/// 1. Collect every token whose byte range the selection intersects, in
///    document order.
/// 2. If, scanning forward from the first collected token, a locked token
///    is encountered and any collected token lies at or beyond it, the
///    whole collection is invalid (`CrossedLock`).
/// 3. Trim non-annotatable tokens from the trailing edge, then from the
///    leading edge.
/// 4. The result is the annotatable, unlocked tokens of the remaining
///    window; if none remain, `Empty`.
///
/// Pure function of `(raw, seq)` — including each token's current lock
/// state, which is why the sequence and not just its identity is taken.
pub fn normalize(raw: RawSelection, seq: &TokenSequence) -> NormalizeOutcome {
    if seq.is_empty() || raw.is_collapsed() {
        return NormalizeOutcome::Empty;
    }

    let collected = seq.indices_intersecting(raw.start()..raw.end());
    let Some(&first) = collected.first() else {
        return NormalizeOutcome::Empty;
    };

    // A committed span's tokens are locked; a new selection may not reach
    // past the first locked token after its own start.
    if let Some(fence) = seq.first_locked_after(first)
        && collected.iter().any(|&i| i >= fence)
    {
        return NormalizeOutcome::CrossedLock;
    }

    let annotatable = |i: usize| seq.token(i).is_some_and(|t| t.annotatable());

    // Trailing edge first, then leading edge, as the original widget does.
    let mut hi = collected.len();
    while hi > 0 && !annotatable(collected[hi - 1]) {
        hi -= 1;
    }
    let mut lo = 0;
    while lo < hi && !annotatable(collected[lo]) {
        lo += 1;
    }
    if lo >= hi {
        return NormalizeOutcome::Empty;
    }

    let ids: Vec<TokenId> = collected[lo..hi]
        .iter()
        .filter_map(|&i| {
            let token = seq.token(i)?;
            (token.annotatable() && !token.state().is_locked()).then(|| token.id().clone())
        })
        .collect();

    if ids.is_empty() {
        NormalizeOutcome::Empty
    } else {
        NormalizeOutcome::Tokens(ids)
    }
}
