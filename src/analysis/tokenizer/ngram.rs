//! N-gram tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{LampasError, Result};

/// A tokenizer that generates character n-grams.
///
/// N-grams are useful for:
/// - CJK (Chinese, Japanese, Korean) language processing
/// - Substring matching
/// - Keyword highlighting over unsegmented text
///
/// Adjacent grams share source characters, so emitted tokens carry the
/// `overlapping` flag whenever their source spans intersect a neighbor's.
/// Downstream consumers use the flag to avoid double-counting the shared
/// bytes when reassembling covering spans.
///
/// # Examples
///
/// ```
/// use lampas::analysis::tokenizer::ngram::NgramTokenizer;
/// use lampas::analysis::tokenizer::Tokenizer;
///
/// // Bigram (n=2)
/// let tokenizer = NgramTokenizer::new(2, 2).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("hello").unwrap()
///     .map(|t| t.text.to_string())
///     .collect();
/// assert_eq!(tokens, vec!["he", "el", "ll", "lo"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    /// Minimum n-gram size
    min_gram: usize,
    /// Maximum n-gram size
    max_gram: usize,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Arguments
    ///
    /// * `min_gram` - Minimum n-gram size (must be >= 1)
    /// * `max_gram` - Maximum n-gram size (must be >= min_gram)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `min_gram` is 0
    /// - `max_gram` is less than `min_gram`
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        if min_gram == 0 {
            return Err(LampasError::analysis("min_gram must be at least 1"));
        }
        if max_gram < min_gram {
            return Err(LampasError::analysis(format!(
                "max_gram ({max_gram}) must be >= min_gram ({min_gram})"
            )));
        }
        Ok(Self { min_gram, max_gram })
    }

    /// Create a unigram tokenizer (n=1).
    pub fn unigram() -> Self {
        Self {
            min_gram: 1,
            max_gram: 1,
        }
    }

    /// Create a bigram tokenizer (n=2).
    pub fn bigram() -> Self {
        Self {
            min_gram: 2,
            max_gram: 2,
        }
    }

    /// Create a trigram tokenizer (n=3).
    pub fn trigram() -> Self {
        Self {
            min_gram: 3,
            max_gram: 3,
        }
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let chars: Vec<char> = text.chars().collect();

        // Cumulative byte offset of each character boundary.
        let mut boundaries = Vec::with_capacity(chars.len() + 1);
        let mut offset = 0;
        boundaries.push(0);
        for c in &chars {
            offset += c.len_utf8();
            boundaries.push(offset);
        }

        let mut tokens = Vec::new();
        let mut token_position = 0;

        for start in 0..chars.len() {
            for gram_size in self.min_gram..=self.max_gram {
                let end = start + gram_size;
                if end > chars.len() {
                    break;
                }

                let ngram: String = chars[start..end].iter().collect();

                tokens.push(Token::with_offsets(
                    &ngram,
                    token_position,
                    boundaries[start],
                    boundaries[end],
                ));
                token_position += 1;
            }
        }

        // Mark tokens whose source spans intersect a neighbor's.
        for i in 0..tokens.len() {
            let overlaps_previous = i > 0 && tokens[i - 1].end_offset > tokens[i].start_offset;
            let overlaps_next =
                i + 1 < tokens.len() && tokens[i + 1].start_offset < tokens[i].end_offset;
            tokens[i].overlapping = overlaps_previous || overlaps_next;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}
