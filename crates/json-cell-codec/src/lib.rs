//! Incremental text and binary codecs for [`json_cell`] values.
//!
//! Both directions work in bounded chunks: the parsers are push-based
//! (`write` arbitrary byte slices until a value is ready) and the
//! serializers pull-based (`read` chunks until exhausted), so neither the
//! complete input nor the complete output ever has to sit in memory. The
//! incremental protocols exist for interleaving I/O with codec work on one
//! thread; no operation suspends or blocks.
//!
//! The one-shot entry points [`parse`], [`stringify`], [`binarize`] and
//! [`unbinarize`] wrap the incremental types for whole-buffer use.

pub mod binary;
pub mod error;
pub mod text;

pub use binary::{binarize, unbinarize, BinParser, BinSerializer};
pub use error::ParseError;
pub use text::{parse, stringify, TextParser, TextSerializer};
