#![no_main]

use libfuzzer_sys::fuzz_target;
use tokens::tokenize;

// Tokenization must round-trip the input text exactly and produce unique
// ids in render order.
fuzz_target!(|text: &str| {
    let seq = tokenize(text);
    assert_eq!(seq.rendered_text(), text);

    let rebuilt: String = seq.iter().map(|t| t.text()).collect();
    assert_eq!(rebuilt, text);

    for (i, token) in seq.iter().enumerate() {
        assert_eq!(token.id().as_str(), format!("token_{i}"));
        assert!(!token.text().is_empty());
    }
});
