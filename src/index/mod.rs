//! Match index structures for the highlighting engine.
//!
//! Two structurally different indexes back the two matching strategies:
//! [`PrefixIndex`] answers longest-common-prefix queries over token-id
//! sequences, and [`KeywordScanner`] performs left-to-right multi-pattern
//! scanning over raw text.

pub mod prefix;
pub mod scan;

pub use prefix::PrefixIndex;
pub use scan::{KeywordScanner, Normalization, ScanBatch, ScanHit};
