//! Flattening committed spans into the submission field format.

use core_types::{SlotLabel, TokenId};
use std::fmt::Write as _;

use crate::span::SpanLedger;

/// Serialize the committed spans into the grouped `tokens` field format
/// used by the dual-slot workflow:
///
/// ```text
/// [becauseid:0{token_3,token_5,}],[butid:1{token_9,}]
/// ```
///
/// Spans are grouped by label ("because" groups first, then "but", then
/// "claim"); each group carries the span's current display index and its
/// member token ids with a trailing comma inside the braces. The final
/// outer separator is stripped. Zero spans serialize to the empty string,
/// and the output is byte-identical across repeated calls on an unchanged
/// ledger.
pub fn serialize_spans(ledger: &SpanLedger) -> String {
    let mut out = String::new();
    for label in [SlotLabel::Because, SlotLabel::But, SlotLabel::Claim] {
        for (index, span) in ledger.iter().enumerate() {
            if span.label() != label {
                continue;
            }
            let _ = write!(out, "[{}:{}{{", label.result_tag(), index);
            for id in span.token_ids() {
                out.push_str(id.as_str());
                out.push(',');
            }
            out.push_str("}],");
        }
    }
    out.pop();
    out
}

/// Serialize a plain token-id list into the flat `tokens` field format
/// used by the single-slot workflow: ids joined with `,`, no tags.
pub fn serialize_token_ids(ids: &[TokenId]) -> String {
    let mut out = String::new();
    for id in ids {
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(id.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<TokenId> {
        raw.iter().map(|&r| TokenId::new(r)).collect()
    }

    #[test]
    fn grouped_format_matches_the_submission_shape() {
        let mut ledger = SpanLedger::new();
        ledger.commit(SlotLabel::Because, ids(&["cat"]), "cat".into());
        ledger.commit(SlotLabel::But, ids(&["sat"]), "sat".into());

        assert_eq!(
            serialize_spans(&ledger),
            "[becauseid:0{cat,}],[butid:1{sat,}]"
        );
    }

    #[test]
    fn groups_order_because_before_but() {
        let mut ledger = SpanLedger::new();
        ledger.commit(SlotLabel::But, ids(&["token_9"]), "x".into());
        ledger.commit(
            SlotLabel::Because,
            ids(&["token_3", "token_5"]),
            "y".into(),
        );

        assert_eq!(
            serialize_spans(&ledger),
            "[becauseid:1{token_3,token_5,}],[butid:0{token_9,}]"
        );
    }

    #[test]
    fn zero_spans_serialize_to_the_empty_string() {
        assert_eq!(serialize_spans(&SpanLedger::new()), "");
    }

    #[test]
    fn serialization_is_stable_across_calls() {
        let mut ledger = SpanLedger::new();
        ledger.commit(SlotLabel::Because, ids(&["token_0"]), "t".into());
        let first = serialize_spans(&ledger);
        let second = serialize_spans(&ledger);
        assert_eq!(first, second);
    }

    #[test]
    fn indices_reflect_positions_after_deletion() {
        let mut ledger = SpanLedger::new();
        ledger.commit(SlotLabel::Because, ids(&["t0"]), "a".into());
        ledger.commit(SlotLabel::Because, ids(&["t2"]), "b".into());
        ledger.commit(SlotLabel::But, ids(&["t4"]), "c".into());
        ledger.remove_at(0);

        assert_eq!(
            serialize_spans(&ledger),
            "[becauseid:0{t2,}],[butid:1{t4,}]"
        );
    }

    #[test]
    fn flat_format_joins_without_trailing_separator() {
        assert_eq!(
            serialize_token_ids(&ids(&["token_1", "token_4"])),
            "token_1,token_4"
        );
        assert_eq!(serialize_token_ids(&[]), "");
    }
}
