//! Sentence segmentation into rendered tokens.
//!
//! The widget normally receives a pre-tokenized render, but the engine can
//! also build one from raw text. Unlike HTML whitespace collapsing, the
//! widget must render text verbatim, so whitespace runs are preserved as
//! their own (non-annotatable) tokens.

use crate::sequence::TokenSequence;
use crate::token::Token;

// Token classes:
// - a word is a maximal run of alphanumeric characters,
// - a whitespace run is a single token,
// - every other character is a punctuation token of its own.
#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Punct,
}

fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Space
    } else if ch.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// Segment raw sentence text into a [`TokenSequence`].
///
/// Ids are `token_0..token_N-1` in render order; a token is annotatable
/// iff it is a word.
pub fn tokenize(sentence: &str) -> TokenSequence {
    let mut tokens: Vec<Token> = Vec::new();
    let mut current = String::new();
    let mut current_class = CharClass::Space;

    let flush = |text: &mut String, class: CharClass, tokens: &mut Vec<Token>| {
        if text.is_empty() {
            return;
        }
        let id = format!("token_{}", tokens.len());
        let annotatable = class == CharClass::Word;
        tokens.push(Token::new(id, std::mem::take(text), annotatable));
    };

    for ch in sentence.chars() {
        let class = classify(ch);
        // Punctuation marks never merge; word/space runs do.
        if class != current_class || class == CharClass::Punct {
            flush(&mut current, current_class, &mut tokens);
            current_class = class;
        }
        current.push(ch);
    }
    flush(&mut current, current_class, &mut tokens);

    TokenSequence::from_tokens(tokens)
}
