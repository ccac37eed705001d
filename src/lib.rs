//! # Lampas
//!
//! A tokenizer-aware keyword highlighting library for text search.
//!
//! Lampas takes a set of registered keywords and an input document and
//! produces a copy of the document with every keyword occurrence wrapped in
//! markup. Overlapping or touching matches are merged into single spans and
//! every other byte is preserved unchanged, escaped for safe embedding.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Two matching strategies: raw multi-pattern scanning and
//!   tokenizer-aware lexicon matching
//! - Overlap-aware span resolution for ambiguous tokenizations
//! - Lossless output: stripping tags and un-escaping literals reconstructs
//!   the input exactly
//!
//! ## Example
//!
//! ```
//! use lampas::highlight::Highlighter;
//!
//! let mut highlighter = Highlighter::new();
//! highlighter.add_keyword("cat");
//!
//! let mut output = String::new();
//! highlighter.highlight("the cat sat", &mut output).unwrap();
//! assert_eq!(output, "the <span class=\"keyword\">cat</span> sat");
//! ```

pub mod analysis;
pub mod error;
pub mod highlight;
pub mod index;
pub mod lexicon;

pub mod prelude {
    pub use crate::analysis::token::{Token, TokenStream};
    pub use crate::analysis::tokenizer::Tokenizer;
    pub use crate::error::{LampasError, Result};
    pub use crate::highlight::Highlighter;
    pub use crate::lexicon::{Lexicon, LexiconRef, TokenizeMode};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
