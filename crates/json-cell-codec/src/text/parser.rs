//! [`TextParser`] — incremental push-based JSON parser.
//!
//! The parser is a state machine over an explicit stack instead of
//! recursive calls: a container state that starts reading a child value
//! pushes a fresh detect state and hands control back to the driver loop.
//! Input arrives in arbitrary byte chunks; nothing unconsumed is retained
//! between calls, and nesting depth never touches the native call stack.

use json_cell::{Key, KeyValue, Kind, Value};

use super::{number, string};

enum State {
    /// Initial and re-entrant: decides what the next value is.
    Detect,
    Str(StrState),
    Number(NumberState),
    Array(ArrayState),
    Object(ObjectState),
    /// Literal-token matcher for `true` / `false` / `null`.
    Check(CheckState),
}

#[derive(Default)]
struct StrState {
    escape: bool,
    data: Vec<u8>,
}

#[derive(Default)]
struct NumberState {
    data: String,
}

#[derive(Default)]
struct ArrayState {
    items: Vec<Value>,
}

struct ObjectState {
    reading_key: bool,
    key: Key,
    items: Vec<KeyValue>,
}

impl ObjectState {
    fn new() -> Self {
        Self {
            reading_key: true,
            key: Key::default(),
            items: Vec::new(),
        }
    }
}

struct CheckState {
    what: &'static str,
    result: Value,
    pos: usize,
}

impl CheckState {
    fn new(what: &'static str, result: Value) -> Self {
        Self {
            what,
            result,
            pos: 0,
        }
    }
}

pub struct TextParser {
    stack: Vec<State>,
    result: Value,
    error: bool,
    unconsumed: usize,
}

impl Default for TextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TextParser {
    pub fn new() -> Self {
        Self {
            stack: vec![State::Detect],
            result: Value::UNDEFINED,
            error: false,
            unconsumed: 0,
        }
    }

    /// Advances the machine over one input chunk.
    ///
    /// Returns `true` when more input is needed, `false` once a value (or
    /// an error) is ready. Bytes after a completed document are left
    /// unconsumed; see [`unconsumed`](Self::unconsumed).
    pub fn write(&mut self, chunk: &[u8]) -> bool {
        if self.error {
            self.unconsumed = chunk.len();
            return false;
        }
        let mut pos = 0;
        while pos < chunk.len() {
            if !self.cycle(chunk, &mut pos) {
                self.unconsumed = chunk.len() - pos;
                return false;
            }
        }
        self.unconsumed = 0;
        !self.stack.is_empty()
    }

    /// Signals end-of-input. A pending top-level number token completes
    /// here (numbers have no terminator of their own); any other open
    /// state makes the document incomplete and errors the machine.
    /// Returns whether a result is ready.
    pub fn finish(&mut self) -> bool {
        if self.error {
            return false;
        }
        if self.stack.is_empty() {
            return true;
        }
        let mut pending = None;
        if let Some(State::Number(st)) = self.stack.last_mut() {
            pending = Some(std::mem::take(&mut st.data));
        }
        if let Some(data) = pending {
            let step = if number::is_valid(&data) {
                self.result = Value::number(data);
                false
            } else {
                self.error = true;
                false
            };
            self.unwind(step);
        }
        if !self.stack.is_empty() {
            self.error = true;
        }
        !self.error
    }

    /// True once the machine has hit a syntax error; no further input is
    /// consumed meaningfully.
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The parsed value; undefined while pending or after an error.
    pub fn result(&self) -> Value {
        if self.error {
            Value::UNDEFINED
        } else {
            self.result.clone()
        }
    }

    /// Bytes of the most recent chunk left unprocessed, for error-offset
    /// computation.
    pub fn unconsumed(&self) -> usize {
        self.unconsumed
    }

    fn cycle(&mut self, input: &[u8], pos: &mut usize) -> bool {
        if self.stack.is_empty() {
            return false;
        }
        let step = self.parse_top(input, pos);
        self.unwind(step)
    }

    /// Pops completed states, feeding each result to the parent's finish
    /// step; one physical cycle can resolve several nested completions.
    fn unwind(&mut self, mut need_more: bool) -> bool {
        while !need_more {
            if self.error {
                return false;
            }
            self.stack.pop();
            if self.stack.is_empty() {
                return false;
            }
            need_more = self.finish_top();
        }
        true
    }

    fn parse_top(&mut self, input: &[u8], pos: &mut usize) -> bool {
        let mut push: Option<State> = None;
        let state = match self.stack.last_mut() {
            Some(s) => s,
            None => return false,
        };
        let need_more = match state {
            State::Detect => {
                while *pos < input.len() && input[*pos].is_ascii_whitespace() {
                    *pos += 1;
                }
                if *pos >= input.len() {
                    true
                } else {
                    match input[*pos] {
                        b'[' => {
                            *pos += 1;
                            push = Some(State::Array(ArrayState::default()));
                            true
                        }
                        b'{' => {
                            *pos += 1;
                            push = Some(State::Object(ObjectState::new()));
                            true
                        }
                        b'"' => {
                            *pos += 1;
                            push = Some(State::Str(StrState::default()));
                            true
                        }
                        b't' => {
                            push = Some(State::Check(CheckState::new("true", Value::from(true))));
                            true
                        }
                        b'f' => {
                            push = Some(State::Check(CheckState::new("false", Value::from(false))));
                            true
                        }
                        b'n' => {
                            push = Some(State::Check(CheckState::new("null", Value::NULL)));
                            true
                        }
                        b'0'..=b'9' | b'-' | b'+' | b'I' => {
                            push = Some(State::Number(NumberState::default()));
                            true
                        }
                        _ => {
                            self.error = true;
                            false
                        }
                    }
                }
            }
            State::Str(st) => {
                let mut completed = false;
                while *pos < input.len() {
                    let c = input[*pos];
                    if !st.escape {
                        if c == b'"' {
                            *pos += 1;
                            completed = true;
                            break;
                        }
                        if c == b'\\' {
                            st.escape = true;
                        }
                    } else {
                        st.escape = false;
                    }
                    st.data.push(c);
                    *pos += 1;
                }
                if completed {
                    let mut data = std::mem::take(&mut st.data);
                    string::decode_in_place(&mut data);
                    let text = match String::from_utf8(data) {
                        Ok(s) => s,
                        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    };
                    self.result = Value::from(text);
                    false
                } else {
                    true
                }
            }
            State::Number(st) => {
                let mut boundary = false;
                while *pos < input.len() {
                    let c = input[*pos];
                    if number::is_token_byte(c) {
                        st.data.push(c as char);
                        *pos += 1;
                    } else {
                        boundary = true;
                        break;
                    }
                }
                if !boundary {
                    true
                } else if number::is_valid(&st.data) {
                    self.result = Value::number(std::mem::take(&mut st.data));
                    false
                } else {
                    self.error = true;
                    false
                }
            }
            State::Array(st) => {
                let mut outcome = None;
                while *pos < input.len() {
                    let c = input[*pos];
                    if c.is_ascii_whitespace() {
                        *pos += 1;
                        continue;
                    }
                    outcome = Some(match c {
                        b',' if !st.items.is_empty() => {
                            *pos += 1;
                            push = Some(State::Detect);
                            true
                        }
                        b']' => {
                            *pos += 1;
                            self.result = Value::from(std::mem::take(&mut st.items));
                            false
                        }
                        _ if st.items.is_empty() && c != b',' => {
                            push = Some(State::Detect);
                            true
                        }
                        _ => {
                            self.error = true;
                            false
                        }
                    });
                    break;
                }
                outcome.unwrap_or(true)
            }
            State::Object(st) => {
                let mut outcome = None;
                while *pos < input.len() {
                    let c = input[*pos];
                    if c.is_ascii_whitespace() {
                        *pos += 1;
                        continue;
                    }
                    outcome = Some(match c {
                        b',' if st.reading_key && !st.items.is_empty() => {
                            *pos += 1;
                            push = Some(State::Detect);
                            true
                        }
                        b':' if !st.reading_key => {
                            *pos += 1;
                            push = Some(State::Detect);
                            true
                        }
                        b'}' if st.reading_key => {
                            *pos += 1;
                            self.result = Value::from(std::mem::take(&mut st.items));
                            false
                        }
                        _ if st.reading_key
                            && st.items.is_empty()
                            && !matches!(c, b',' | b':' | b'}') =>
                        {
                            push = Some(State::Detect);
                            true
                        }
                        _ => {
                            self.error = true;
                            false
                        }
                    });
                    break;
                }
                outcome.unwrap_or(true)
            }
            State::Check(st) => {
                let mut outcome = None;
                while *pos < input.len() {
                    if input[*pos] == st.what.as_bytes()[st.pos] {
                        st.pos += 1;
                        *pos += 1;
                        if st.pos == st.what.len() {
                            self.result = st.result.clone();
                            outcome = Some(false);
                            break;
                        }
                    } else {
                        self.error = true;
                        outcome = Some(false);
                        break;
                    }
                }
                outcome.unwrap_or(true)
            }
        };
        if let Some(s) = push {
            self.stack.push(s);
        }
        need_more
    }

    /// Integrates a completed child value into the parent state.
    fn finish_top(&mut self) -> bool {
        let v = std::mem::replace(&mut self.result, Value::UNDEFINED);
        match self.stack.last_mut() {
            Some(State::Detect) => {
                self.result = v;
                false
            }
            Some(State::Array(st)) => {
                st.items.push(v);
                true
            }
            Some(State::Object(st)) => {
                if st.reading_key {
                    if v.kind() != Kind::String {
                        self.error = true;
                        false
                    } else {
                        st.key = Key::from_value(v);
                        st.reading_key = false;
                        true
                    }
                } else {
                    let key = std::mem::take(&mut st.key);
                    st.items.push(KeyValue { key, value: v });
                    st.reading_key = true;
                    true
                }
            }
            _ => {
                self.result = v;
                false
            }
        }
    }
}
