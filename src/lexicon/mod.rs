//! Tokenizer-backed term dictionary.
//!
//! A [`Lexicon`] pairs a tokenizer with an interning table that maps each
//! distinct token text to a dense [`TermId`]. Tokenizing in
//! [`TokenizeMode::Register`] assigns fresh ids to unknown terms; tokenizing
//! in [`TokenizeMode::Lookup`] leaves unknown terms id-less. The
//! highlighting engine matches keyword occurrences over these id sequences
//! instead of raw bytes when a lexicon is attached.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::analysis::tokenizer::{NgramTokenizer, Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// Identifier assigned to a distinct token text by a lexicon.
///
/// Ids are dense and start at 1; 0 is never issued.
pub type TermId = u32;

/// Shared handle to a lexicon.
///
/// Engines compare handles by identity (`Arc::ptr_eq`) to detect
/// re-attachment of the same lexicon.
pub type LexiconRef = Arc<Mutex<Lexicon>>;

/// How tokenization treats terms that are not yet in the dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizeMode {
    /// Intern unknown terms, assigning fresh ids.
    Register,
    /// Leave unknown terms without an id.
    Lookup,
}

/// A token joined with its dictionary id and source location.
#[derive(Clone, Debug, PartialEq)]
pub struct LexiconToken {
    /// Dictionary id, `None` when tokenizing in lookup mode over an unknown
    /// term.
    pub id: Option<TermId>,
    /// The token's text content.
    pub text: String,
    /// Byte offset where the token starts in the source text.
    pub start_offset: usize,
    /// Byte offset where the token ends in the source text.
    pub end_offset: usize,
    /// Whether the token's source span overlaps another token's span.
    pub overlapping: bool,
}

impl LexiconToken {
    /// Byte length of the token's source span.
    pub fn source_len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Byte length of the first decoded character of the token text.
    pub fn first_char_len(&self) -> usize {
        self.text.chars().next().map_or(0, char::len_utf8)
    }
}

/// A term dictionary built around a tokenizer.
pub struct Lexicon {
    tokenizer: Box<dyn Tokenizer>,
    terms: AHashMap<String, TermId>,
    next_id: TermId,
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexicon")
            .field("tokenizer", &self.tokenizer.name())
            .field("terms", &self.terms.len())
            .finish()
    }
}

impl Lexicon {
    /// Create a new empty lexicon over the given tokenizer.
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        Lexicon {
            tokenizer,
            terms: AHashMap::new(),
            next_id: 1,
        }
    }

    /// Create a lexicon over a character bigram tokenizer.
    pub fn bigram() -> Self {
        Self::new(Box::new(NgramTokenizer::bigram()))
    }

    /// Create a lexicon over a Unicode word tokenizer.
    pub fn unicode_word() -> Self {
        Self::new(Box::new(UnicodeWordTokenizer::new()))
    }

    /// Wrap this lexicon in a shared handle.
    pub fn into_ref(self) -> LexiconRef {
        Arc::new(Mutex::new(self))
    }

    /// Name of the underlying tokenizer.
    pub fn tokenizer_name(&self) -> &'static str {
        self.tokenizer.name()
    }

    /// Number of distinct terms interned so far.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Look up the id of a term without interning it.
    pub fn term_id(&self, text: &str) -> Option<TermId> {
        self.terms.get(text).copied()
    }

    fn intern(&mut self, text: &str) -> TermId {
        if let Some(&id) = self.terms.get(text) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.terms.insert(text.to_string(), id);
        id
    }

    /// Tokenize `text` and resolve each token against the dictionary.
    ///
    /// In [`TokenizeMode::Register`] every token comes back with an id; in
    /// [`TokenizeMode::Lookup`] unknown terms yield `id: None`. Tokenizer
    /// failures propagate to the caller.
    pub fn tokenize(&mut self, text: &str, mode: TokenizeMode) -> Result<Vec<LexiconToken>> {
        let tokens = self.tokenizer.tokenize(text)?;
        let mut resolved = Vec::new();
        for token in tokens {
            let id = match mode {
                TokenizeMode::Register => Some(self.intern(&token.text)),
                TokenizeMode::Lookup => self.terms.get(&token.text).copied(),
            };
            resolved.push(LexiconToken {
                id,
                text: token.text,
                start_offset: token.start_offset,
                end_offset: token.end_offset,
                overlapping: token.overlapping,
            });
        }
        Ok(resolved)
    }
}
