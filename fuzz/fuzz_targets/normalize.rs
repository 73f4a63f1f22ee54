#![no_main]

use libfuzzer_sys::fuzz_target;
use selection_core::{NormalizeOutcome, RawSelection, normalize};
use tokens::tokenize;

// Arbitrary sentence + arbitrary byte anchors: normalize must never
// panic, and a Tokens outcome must be non-empty, distinct, ordered, and
// annotatable.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let a = u16::from_le_bytes([data[0], data[1]]) as usize;
    let b = u16::from_le_bytes([data[2], data[3]]) as usize;
    let Ok(text) = std::str::from_utf8(&data[4..]) else {
        return;
    };

    let seq = tokenize(text);
    match normalize(RawSelection::new(a, b), &seq) {
        NormalizeOutcome::Tokens(ids) => {
            assert!(!ids.is_empty());
            let mut last = None;
            for id in &ids {
                let index = seq.index_of(id).expect("id from this sequence");
                if let Some(prev) = last {
                    assert!(index > prev, "ids out of order or duplicated");
                }
                last = Some(index);
                assert!(seq.token(index).unwrap().annotatable());
            }
        }
        NormalizeOutcome::Empty | NormalizeOutcome::CrossedLock => {}
    }
});
