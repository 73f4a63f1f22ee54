use std::fmt;

/// Stable identifier of a rendered token (`token_0`, `token_17`, ...).
///
/// Assigned by the page render in token order and opaque to the engine:
/// ordering authority is always the position inside a
/// `TokenSequence`, never the id text. The id text is what ends up in
/// the serialized submission payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenId(Box<str>);

impl TokenId {
    #[inline]
    pub fn new(raw: impl Into<Box<str>>) -> Self {
        Self(raw.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    #[inline]
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for TokenId {
    #[inline]
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Stable handle of a committed span.
///
/// Allocated monotonically by the span ledger and never reused, unlike the
/// span's display index, which is recomputed from ledger position whenever
/// a span is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpanKey(u64);

impl SpanKey {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// The closed set of annotation slots a span can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotLabel {
    Because,
    But,
    Claim,
}

impl SlotLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotLabel::Because => "because",
            SlotLabel::But => "but",
            SlotLabel::Claim => "claim",
        }
    }

    /// Tag emitted in front of a serialized span group.
    pub fn result_tag(self) -> &'static str {
        match self {
            SlotLabel::Because => "becauseid",
            SlotLabel::But => "butid",
            SlotLabel::Claim => "claimid",
        }
    }

    /// The slot suggested after committing a span of this label.
    ///
    /// The dual-slot workflow alternates "because" and "but"; the
    /// single-slot workflow keeps re-opening "claim".
    pub fn rotated(self) -> SlotLabel {
        match self {
            SlotLabel::Because => SlotLabel::But,
            SlotLabel::But => SlotLabel::Because,
            SlotLabel::Claim => SlotLabel::Claim,
        }
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which slot workflow the widget runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotMode {
    /// Premise annotation: "because" and "but" slots, label rotation on
    /// commit, grouped result serialization.
    #[default]
    Dual,
    /// Claim annotation: one "claim" slot, flat result serialization.
    Single,
}

impl SlotMode {
    /// The slot label open when a session starts.
    pub fn initial_slot(self) -> SlotLabel {
        match self {
            SlotMode::Dual => SlotLabel::Because,
            SlotMode::Single => SlotLabel::Claim,
        }
    }
}

/// Display state of a single token.
///
/// Replaces class-name string matching as the source of truth: rendering
/// is a projection from this state, never the reverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenState {
    /// Selectable, unhighlighted.
    #[default]
    Plain,
    /// Part of the in-progress highlight for `slot`.
    Highlighted { slot: SlotLabel },
    /// Consumed by the committed span `span`; acts as the no-select
    /// marker a new selection may not cross.
    Locked { span: SpanKey },
}

impl TokenState {
    #[inline]
    pub fn is_locked(self) -> bool {
        matches!(self, TokenState::Locked { .. })
    }

    #[inline]
    pub fn is_highlighted(self) -> bool {
        matches!(self, TokenState::Highlighted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_rotation_alternates_premise_slots() {
        assert_eq!(SlotLabel::Because.rotated(), SlotLabel::But);
        assert_eq!(SlotLabel::But.rotated(), SlotLabel::Because);
        assert_eq!(SlotLabel::Claim.rotated(), SlotLabel::Claim);
    }

    #[test]
    fn token_id_preserves_raw_text() {
        let id = TokenId::new("token_17");
        assert_eq!(id.as_str(), "token_17");
        assert_eq!(id.to_string(), "token_17");
        assert_eq!(TokenId::from("token_17"), id);
    }

    #[test]
    fn span_key_round_trip() {
        let key = SpanKey::from_raw(3);
        assert_eq!(key.as_raw(), 3);
        assert_ne!(key, SpanKey::from_raw(4));
    }

    #[test]
    fn default_state_is_plain_and_unlocked() {
        let state = TokenState::default();
        assert!(!state.is_locked());
        assert!(!state.is_highlighted());
    }
}
