//! Human-readable text codec: standard JSON with two documented
//! extensions — the bare literal `Infinity` (optionally negated) is
//! accepted on input, and non-finite doubles serialize as quoted `"∞"` /
//! `"-∞"` tokens (NaN as `null`).
//!
//! Undefined entries inside arrays/objects are dropped on output, which is
//! what makes sparse "delete this key" patches expressible.

mod number;
mod parser;
mod serializer;
mod string;

pub use parser::TextParser;
pub use serializer::TextSerializer;

use json_cell::Value;

use crate::error::ParseError;

/// One-shot parse of a complete document.
///
/// The reported offset is where consumption stopped, computed from the
/// unconsumed remainder. Content after a complete value is ignored.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    let mut parser = TextParser::new();
    if parser.write(text.as_bytes()) {
        // the machine still wants input; only a pending number token can
        // complete at end-of-input
        if parser.finish() {
            return Ok(parser.result());
        }
        return Err(ParseError::UnexpectedEnd(text.len()));
    }
    if parser.is_error() {
        return Err(ParseError::Syntax(text.len() - parser.unconsumed()));
    }
    Ok(parser.result())
}

/// One-shot serialization of a whole tree.
pub fn stringify(value: &Value) -> String {
    let mut ser = TextSerializer::new(value.clone());
    let mut out = String::new();
    while let Some(chunk) = ser.read() {
        out.push_str(chunk);
    }
    out
}
