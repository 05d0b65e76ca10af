//! Compact self-describing binary codec.
//!
//! Unlike the text codec this format is lossless: undefined entries are
//! encoded with an explicit tag, numbers keep their sign/magnitude shape
//! and numeric literals their exact text.

pub mod constants;
mod parser;
mod serializer;

pub use parser::BinParser;
pub use serializer::BinSerializer;

use json_cell::Value;

use crate::error::ParseError;

/// One-shot binary encoding of a whole tree.
pub fn binarize(value: &Value) -> Vec<u8> {
    let mut ser = BinSerializer::new(value.clone());
    let mut out = Vec::new();
    while let Some(chunk) = ser.read() {
        out.extend_from_slice(chunk);
    }
    out
}

/// One-shot binary decode of a complete document.
pub fn unbinarize(data: &[u8]) -> Result<Value, ParseError> {
    let mut parser = BinParser::new();
    if parser.write(data) {
        return Err(ParseError::UnexpectedEnd(data.len()));
    }
    if parser.is_error() {
        return Err(ParseError::Syntax(data.len() - parser.unconsumed()));
    }
    Ok(parser.result())
}
