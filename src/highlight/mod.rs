//! Keyword highlighting engine.
//!
//! The [`Highlighter`] owns a registry of keywords and wraps every keyword
//! occurrence in an input document with markup, merging overlapping or
//! touching matches into single spans. All other bytes pass through escaped,
//! so stripping the tags and un-escaping the literals reconstructs the input
//! exactly.
//!
//! Two matching strategies are used, selected at prepare time:
//!
//! - **Lexicon mode** (a [`Lexicon`] is attached): the input is tokenized
//!   and keyword occurrences are found by longest-common-prefix matching of
//!   token-id sequences, which resolves ambiguous or overlapping
//!   tokenizations into covering byte spans.
//! - **Standalone mode** (no lexicon): keywords are matched directly against
//!   the raw text with a multi-pattern scanner.
//!
//! # Examples
//!
//! ```
//! use lampas::highlight::Highlighter;
//!
//! let mut highlighter = Highlighter::new();
//! highlighter.add_keyword("rust");
//!
//! let mut output = String::new();
//! highlighter.highlight("rust is fast", &mut output).unwrap();
//! assert_eq!(output, "<span class=\"keyword\">rust</span> is fast");
//! ```

pub mod escape;

use std::sync::Arc;

use crate::error::{LampasError, Result};
use crate::index::{KeywordScanner, Normalization, PrefixIndex};
use crate::lexicon::{Lexicon, LexiconRef, TermId, TokenizeMode};

/// Maximum number of hits requested from the scanner per batch.
const MAX_HITS_PER_SCAN: usize = 16;

/// Open/close markup wrapped around each highlighted span.
// TODO: support non-HTML output with caller-provided delimiters.
#[derive(Clone, Debug)]
pub struct TagPair {
    open: String,
    close: String,
}

impl Default for TagPair {
    fn default() -> Self {
        TagPair {
            open: "<span class=\"keyword\">".to_string(),
            close: "</span>".to_string(),
        }
    }
}

impl TagPair {
    /// The opening tag.
    pub fn open(&self) -> &str {
        &self.open
    }

    /// The closing tag.
    pub fn close(&self) -> &str {
        &self.close
    }
}

/// Location of one token in the input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TokenLocation {
    offset: usize,
    length: usize,
    overlapping: bool,
    first_char_len: usize,
}

/// A matched span, before and after merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    offset: usize,
    length: usize,
}

impl Candidate {
    fn reach(&self) -> usize {
        self.offset + self.length
    }
}

/// Prepared match structure, selected by lexicon attachment.
#[derive(Debug)]
enum MatchIndex {
    Chunks(PrefixIndex<TermId>),
    Keywords(KeywordScanner),
}

#[derive(Debug)]
enum EngineState {
    Stale,
    Prepared(MatchIndex),
}

/// Per-call scratch buffers. Truncated at the start of each call; capacity
/// is kept so repeated calls do not reallocate.
#[derive(Debug, Default)]
struct Scratch {
    token_ids: Vec<TermId>,
    locations: Vec<TokenLocation>,
    candidates: Vec<Candidate>,
}

impl Scratch {
    fn clear(&mut self) {
        self.token_ids.clear();
        self.locations.clear();
        self.candidates.clear();
    }
}

/// A keyword highlighting engine.
///
/// Keywords are registered with [`add_keyword`](Highlighter::add_keyword);
/// any registry mutation or lexicon change marks the engine stale, and the
/// next [`highlight`](Highlighter::highlight) call rebuilds the match index
/// before matching.
#[derive(Debug)]
pub struct Highlighter {
    html_mode: bool,
    tag: TagPair,
    keywords: Vec<String>,
    lexicon: Option<LexiconRef>,
    state: EngineState,
    scratch: Scratch,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Create a new highlighter with no keywords and no lexicon.
    pub fn new() -> Self {
        Highlighter {
            html_mode: true,
            tag: TagPair::default(),
            keywords: Vec::new(),
            lexicon: None,
            state: EngineState::Stale,
            scratch: Scratch::default(),
        }
    }

    /// Register a keyword. A zero-length keyword is a silent no-op.
    pub fn add_keyword(&mut self, keyword: &str) {
        if keyword.is_empty() {
            return;
        }
        self.keywords.push(keyword.to_string());
        self.state = EngineState::Stale;
    }

    /// The registered keywords, in insertion order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Attach or detach a lexicon.
    ///
    /// Passing the handle already attached (or `None` when none is attached)
    /// is a no-op; otherwise the engine is marked stale and re-prepares on
    /// the next call.
    pub fn set_lexicon(&mut self, lexicon: Option<LexiconRef>) {
        let unchanged = match (&self.lexicon, &lexicon) {
            (None, None) => true,
            (Some(current), Some(new)) => Arc::ptr_eq(current, new),
            _ => false,
        };
        if unchanged {
            return;
        }
        self.lexicon = lexicon;
        self.state = EngineState::Stale;
    }

    /// The currently attached lexicon, if any.
    pub fn lexicon(&self) -> Option<LexiconRef> {
        self.lexicon.clone()
    }

    /// The markup wrapped around each highlighted span.
    pub fn tag(&self) -> &TagPair {
        &self.tag
    }

    /// Rebuild the match index if the engine is stale.
    ///
    /// With a lexicon attached this tokenizes every keyword and stores its
    /// token-id chunk in a prefix index; otherwise it builds a multi-pattern
    /// scanner over the raw keywords. On failure the engine stays stale, so
    /// a later call retries the build.
    pub fn prepare(&mut self) -> Result<()> {
        if matches!(self.state, EngineState::Prepared(_)) {
            return Ok(());
        }
        let index = match &self.lexicon {
            Some(lexicon) => {
                let mut lexicon = lexicon.lock();
                MatchIndex::Chunks(build_chunk_index(&mut lexicon, &self.keywords))
            }
            None => MatchIndex::Keywords(KeywordScanner::build(
                &self.keywords,
                Normalization::CaseInsensitive,
            )?),
        };
        self.state = EngineState::Prepared(index);
        Ok(())
    }

    /// Highlight every keyword occurrence in `text`, appending to `output`.
    ///
    /// With no registered keywords the text passes through escaped (HTML
    /// mode) or verbatim. Output already appended before a mid-call
    /// tokenization failure remains in the sink; a prepare failure leaves
    /// the sink untouched.
    pub fn highlight(&mut self, text: &str, output: &mut String) -> Result<()> {
        if self.keywords.is_empty() {
            if self.html_mode {
                escape::push_escaped(output, text);
            } else {
                output.push_str(text);
            }
            return Ok(());
        }

        self.prepare()?;

        let Highlighter {
            state,
            lexicon,
            tag,
            scratch,
            ..
        } = self;
        match state {
            EngineState::Prepared(MatchIndex::Chunks(chunks)) => {
                let lexicon = lexicon
                    .as_ref()
                    .ok_or_else(|| LampasError::highlight("chunk index prepared without a lexicon"))?;
                let mut lexicon = lexicon.lock();
                highlight_lexicon(&mut lexicon, chunks, tag, scratch, text, output)
            }
            EngineState::Prepared(MatchIndex::Keywords(scanner)) => {
                highlight_standalone(scanner, tag, text, output);
                Ok(())
            }
            EngineState::Stale => Err(LampasError::highlight("engine not prepared")),
        }
    }
}

/// Tokenize every keyword against the lexicon and collect its token-id
/// chunk. A keyword whose tokenization fails is skipped; keywords producing
/// no ids contribute no entry.
fn build_chunk_index(lexicon: &mut Lexicon, keywords: &[String]) -> PrefixIndex<TermId> {
    let mut chunks = PrefixIndex::new();
    for keyword in keywords {
        // First pass interns every sub-token so the lookup pass sees them.
        if lexicon.tokenize(keyword, TokenizeMode::Register).is_err() {
            continue;
        }
        let Ok(tokens) = lexicon.tokenize(keyword, TokenizeMode::Lookup) else {
            continue;
        };
        let chunk: Vec<TermId> = tokens.iter().map_while(|token| token.id).collect();
        chunks.insert(chunk);
    }
    chunks
}

/// Effective byte length of a token inside a matched chunk: overlapping
/// tokens count only their first character unless they close the chunk.
fn effective_len(location: &TokenLocation, interior: bool) -> usize {
    if location.overlapping && interior {
        location.first_char_len
    } else {
        location.length
    }
}

fn highlight_lexicon(
    lexicon: &mut Lexicon,
    chunks: &PrefixIndex<TermId>,
    tag: &TagPair,
    scratch: &mut Scratch,
    text: &str,
    output: &mut String,
) -> Result<()> {
    scratch.clear();
    let Scratch {
        token_ids,
        locations,
        candidates,
    } = scratch;

    let tokens = lexicon.tokenize(text, TokenizeMode::Register)?;
    for token in tokens {
        let Some(id) = token.id else { continue };
        token_ids.push(id);
        locations.push(TokenLocation {
            offset: token.start_offset,
            length: token.source_len(),
            overlapping: token.overlapping,
            first_char_len: token.first_char_len(),
        });
    }

    let mut i = 0;
    while i < token_ids.len() {
        let Some(n) = chunks.lcp_search(&token_ids[i..]) else {
            i += 1;
            continue;
        };
        let span = &locations[i..i + n];
        let first = &span[0];
        let mut candidate = Candidate {
            offset: first.offset,
            length: if first.overlapping && n > 1 {
                first.first_char_len
            } else {
                first.length
            },
        };
        for j in 1..n {
            let current = &span[j];
            let previous = &span[j - 1];
            let current_len = effective_len(current, j + 1 < n);
            let previous_len = effective_len(previous, j + 1 < n);
            if current.offset == previous.offset {
                // Alternate decompositions of the same span: count only the
                // bytes the longer reading adds.
                candidate.length += current_len.saturating_sub(previous_len);
            } else {
                candidate.length += current_len;
            }
        }
        candidates.push(candidate);
        i += n;
    }

    if candidates.is_empty() {
        escape::push_escaped(output, text);
        return Ok(());
    }

    candidates.sort_unstable_by_key(|candidate| (candidate.offset, candidate.length));

    let mut emitted = 0;
    let mut previous = candidates[0];
    for &current in candidates[1..].iter() {
        if previous.reach() >= current.offset {
            // Touching or overlapping spans collapse into one.
            let length = if previous.reach() > current.reach() {
                previous.length
            } else {
                current.length + (current.offset - previous.offset)
            };
            previous = Candidate {
                offset: previous.offset,
                length,
            };
            continue;
        }
        emit_tagged(tag, text, previous, &mut emitted, output);
        previous = current;
    }
    emit_tagged(tag, text, previous, &mut emitted, output);

    if emitted < text.len() {
        escape::push_escaped(output, &text[emitted..]);
    }
    Ok(())
}

/// Emit the gap since the last emitted byte, then the tagged span.
fn emit_tagged(
    tag: &TagPair,
    text: &str,
    span: Candidate,
    emitted: &mut usize,
    output: &mut String,
) {
    if span.offset > *emitted {
        escape::push_escaped(output, &text[*emitted..span.offset]);
    }
    let end = span.reach().min(text.len());
    output.push_str(tag.open());
    escape::push_escaped(output, &text[span.offset..end]);
    output.push_str(tag.close());
    *emitted = end;
}

fn highlight_standalone(scanner: &KeywordScanner, tag: &TagPair, text: &str, output: &mut String) {
    let mut base = 0;
    while base < text.len() {
        let window = &text[base..];
        let batch = scanner.scan(window, MAX_HITS_PER_SCAN);

        let mut last_end = 0;
        for hit in &batch.hits {
            if hit.start > last_end {
                escape::push_escaped(output, &window[last_end..hit.start]);
            }
            output.push_str(tag.open());
            escape::push_escaped(output, &window[hit.start..hit.end]);
            output.push_str(tag.close());
            last_end = hit.end;
        }
        if batch.cursor > last_end {
            escape::push_escaped(output, &window[last_end..batch.cursor]);
        }

        if batch.cursor == 0 {
            break;
        }
        base += batch.cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(highlighter: &mut Highlighter, text: &str) -> String {
        let mut output = String::new();
        highlighter.highlight(text, &mut output).unwrap();
        output
    }

    #[test]
    fn test_default_tag() {
        let tag = TagPair::default();
        assert_eq!(tag.open(), "<span class=\"keyword\">");
        assert_eq!(tag.close(), "</span>");
    }

    #[test]
    fn test_no_keywords_escapes_text() {
        let mut highlighter = Highlighter::new();
        assert_eq!(highlight(&mut highlighter, "a<b"), "a&lt;b");
    }

    #[test]
    fn test_empty_keyword_ignored() {
        let mut highlighter = Highlighter::new();
        highlighter.add_keyword("");
        assert!(highlighter.keywords().is_empty());
        assert_eq!(highlight(&mut highlighter, "text"), "text");
    }

    #[test]
    fn test_standalone_basic_match() {
        let mut highlighter = Highlighter::new();
        highlighter.add_keyword("cat");
        assert_eq!(
            highlight(&mut highlighter, "the cat sat"),
            "the <span class=\"keyword\">cat</span> sat"
        );
    }

    #[test]
    fn test_standalone_many_hits_cross_batches() {
        let mut highlighter = Highlighter::new();
        highlighter.add_keyword("x");

        // More occurrences than one scan batch holds
        let text = "x ".repeat(40);
        let output = highlight(&mut highlighter, &text);
        assert_eq!(
            output,
            "<span class=\"keyword\">x</span> ".repeat(40)
        );
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let mut highlighter = Highlighter::new();
        highlighter.add_keyword("cat");
        highlighter.prepare().unwrap();
        assert!(matches!(highlighter.state, EngineState::Prepared(_)));
        highlighter.prepare().unwrap();
        assert!(matches!(highlighter.state, EngineState::Prepared(_)));
    }

    #[test]
    fn test_mutation_marks_stale() {
        let mut highlighter = Highlighter::new();
        highlighter.add_keyword("cat");
        highlighter.prepare().unwrap();

        highlighter.add_keyword("dog");
        assert!(matches!(highlighter.state, EngineState::Stale));

        // The new keyword is picked up on the next call
        assert_eq!(
            highlight(&mut highlighter, "dog"),
            "<span class=\"keyword\">dog</span>"
        );
    }

    #[test]
    fn test_set_lexicon_same_handle_is_noop() {
        let mut highlighter = Highlighter::new();
        highlighter.add_keyword("cat");

        let lexicon = Lexicon::bigram().into_ref();
        highlighter.set_lexicon(Some(lexicon.clone()));
        highlighter.prepare().unwrap();

        highlighter.set_lexicon(Some(lexicon));
        assert!(matches!(highlighter.state, EngineState::Prepared(_)));

        highlighter.set_lexicon(None);
        assert!(matches!(highlighter.state, EngineState::Stale));
    }

    #[test]
    fn test_lexicon_accessor_returns_attached_handle() {
        let mut highlighter = Highlighter::new();
        assert!(highlighter.lexicon().is_none());

        let lexicon = Lexicon::bigram().into_ref();
        highlighter.set_lexicon(Some(lexicon.clone()));
        let attached = highlighter.lexicon().unwrap();
        assert!(Arc::ptr_eq(&attached, &lexicon));
    }

    #[test]
    fn test_lexicon_mode_single_keyword() {
        let mut highlighter = Highlighter::new();
        highlighter.set_lexicon(Some(Lexicon::bigram().into_ref()));
        highlighter.add_keyword("cat");

        assert_eq!(
            highlight(&mut highlighter, "the cat sat"),
            "the <span class=\"keyword\">cat</span> sat"
        );
    }

    #[test]
    fn test_lexicon_mode_covers_whole_text() {
        let mut highlighter = Highlighter::new();
        highlighter.set_lexicon(Some(Lexicon::bigram().into_ref()));
        highlighter.add_keyword("abc");

        assert_eq!(
            highlight(&mut highlighter, "abc"),
            "<span class=\"keyword\">abc</span>"
        );
    }

    #[test]
    fn test_lexicon_mode_merges_touching_matches() {
        let mut highlighter = Highlighter::new();
        highlighter.set_lexicon(Some(Lexicon::bigram().into_ref()));
        highlighter.add_keyword("ab");
        highlighter.add_keyword("cd");

        // "abcd" tokenizes to ab/bc/cd; both keyword chunks match and the
        // resulting spans touch, so one merged span is emitted.
        let output = highlight(&mut highlighter, "abcd");
        assert_eq!(output.matches("<span").count(), 1);
        assert!(output.contains(">ab"));
    }

    #[test]
    fn test_lexicon_mode_no_match_passthrough() {
        let mut highlighter = Highlighter::new();
        highlighter.set_lexicon(Some(Lexicon::bigram().into_ref()));
        highlighter.add_keyword("cat");

        assert_eq!(highlight(&mut highlighter, "dog & pony"), "dog &amp; pony");
    }

    #[test]
    fn test_candidate_reach() {
        let candidate = Candidate {
            offset: 4,
            length: 3,
        };
        assert_eq!(candidate.reach(), 7);
    }

    #[test]
    fn test_effective_len_interior_overlap() {
        let location = TokenLocation {
            offset: 0,
            length: 6,
            overlapping: true,
            first_char_len: 3,
        };
        assert_eq!(effective_len(&location, true), 3);
        assert_eq!(effective_len(&location, false), 6);

        let plain = TokenLocation {
            overlapping: false,
            ..location
        };
        assert_eq!(effective_len(&plain, true), 6);
    }
}
