//! Unicode word tokenizer implementation.
//!
//! This module provides a tokenizer that splits text using Unicode word
//! boundary rules (UAX #29). It handles international text and filters out
//! non-word segments like punctuation and whitespace. Word tokens never
//! overlap, so the `overlapping` flag is always false.
//!
//! # Examples
//!
//! ```
//! use lampas::analysis::tokenizer::Tokenizer;
//! use lampas::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//!
//! // Punctuation and whitespace are automatically filtered out
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// This tokenizer uses the Unicode Text Segmentation algorithm (UAX #29) to
/// identify word boundaries. It keeps only segments containing at least one
/// alphanumeric character.
///
/// # Examples
///
/// ```
/// use lampas::analysis::tokenizer::Tokenizer;
/// use lampas::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
///
/// let tokenizer = UnicodeWordTokenizer::new();
/// let tokens: Vec<_> = tokenizer.tokenize("café résumé").unwrap().collect();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].text, "café");
/// assert_eq!(tokens[1].text, "résumé");
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut position = 0;
        let tokens: Vec<Token> = text
            .split_word_bound_indices()
            .filter_map(|(start_offset, word)| {
                // Only keep actual words (not whitespace or punctuation)
                if word.chars().any(|c| c.is_alphanumeric()) {
                    let token = Token::with_offsets(
                        word,
                        position,
                        start_offset,
                        start_offset + word.len(),
                    );
                    position += 1;
                    Some(token)
                } else {
                    None
                }
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
