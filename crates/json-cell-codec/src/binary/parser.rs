//! [`BinParser`] — incremental push-based binary decoder.
//!
//! Same driver shape as the text parser: an explicit state stack, a parse
//! step that consumes what it can of the current chunk, and a finish step
//! that folds completed child values into the parent. The magnitude/length
//! field accumulates byte-at-a-time, so tags, lengths and payloads may all
//! straddle chunk boundaries.

use json_cell::{Key, KeyValue, Kind, Value};

use super::constants;

#[derive(Clone, Copy)]
enum Then {
    PNumber,
    NNumber,
    Text,
    NumberText,
    Array,
    Object,
}

struct MagnitudeState {
    remaining: u8,
    acc: u64,
    then: Then,
}

struct DoubleState {
    remaining: u8,
    acc: u64,
}

struct StrState {
    remaining: usize,
    numeric: bool,
    data: Vec<u8>,
}

struct ArrayState {
    count: u64,
    items: Vec<Value>,
}

struct ObjectState {
    count: u64,
    reading_key: bool,
    key: Key,
    items: Vec<KeyValue>,
}

enum State {
    /// Reads the next tag byte; the value-slot state then morphs in place
    /// through magnitude/payload stages until the node is complete.
    Detect,
    Magnitude(MagnitudeState),
    DoubleBits(DoubleState),
    Str(StrState),
    Array(ArrayState),
    Object(ObjectState),
}

pub struct BinParser {
    stack: Vec<State>,
    result: Value,
    error: bool,
    unconsumed: usize,
}

impl Default for BinParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BinParser {
    pub fn new() -> Self {
        Self {
            stack: vec![State::Detect],
            result: Value::UNDEFINED,
            error: false,
            unconsumed: 0,
        }
    }

    /// Advances the machine over one input chunk. Returns `true` when more
    /// input is needed, `false` once a value (or an error) is ready.
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

    /// Signals end-of-input; an incomplete document errors the machine.
    /// Returns whether a result is ready.
    pub fn finish(&mut self) -> bool {
        if self.error {
            return false;
        }
        if !self.stack.is_empty() {
            self.error = true;
        }
        !self.error
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The decoded value; undefined while pending or after an error.
    pub fn result(&self) -> Value {
        if self.error {
            Value::UNDEFINED
        } else {
            self.result.clone()
        }
    }

    /// Bytes of the most recent chunk left unprocessed.
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
        let mut push_child = false;
        let need_more = loop {
            let state = match self.stack.last_mut() {
                Some(s) => s,
                None => break true,
            };
            match state {
                State::Detect => {
                    if *pos >= input.len() {
                        break true;
                    }
                    let tag = input[*pos];
                    *pos += 1;
                    let category = tag & constants::CATEGORY_MASK;
                    if category == constants::SIMPLE {
                        match tag {
                            constants::TAG_NULL => {
                                self.result = Value::NULL;
                                break false;
                            }
                            constants::TAG_TRUE => {
                                self.result = Value::from(true);
                                break false;
                            }
                            constants::TAG_FALSE => {
                                self.result = Value::from(false);
                                break false;
                            }
                            constants::TAG_UNDEFINED => {
                                self.result = Value::UNDEFINED;
                                break false;
                            }
                            constants::TAG_DOUBLE => {
                                *state = State::DoubleBits(DoubleState {
                                    remaining: 8,
                                    acc: 0,
                                });
                            }
                            _ => {
                                self.error = true;
                                break false;
                            }
                        }
                    } else {
                        let then = match category {
                            constants::P_NUMBER => Then::PNumber,
                            constants::N_NUMBER => Then::NNumber,
                            constants::STRING => Then::Text,
                            constants::STRING_NUMBER => Then::NumberText,
                            constants::ARRAY => Then::Array,
                            constants::OBJECT => Then::Object,
                            _ => {
                                self.error = true;
                                break false;
                            }
                        };
                        *state = State::Magnitude(MagnitudeState {
                            remaining: (tag & constants::SIZE_MASK) + 1,
                            acc: 0,
                            then,
                        });
                    }
                }
                State::Magnitude(st) => {
                    while st.remaining > 0 && *pos < input.len() {
                        st.acc = (st.acc << 8) | input[*pos] as u64;
                        *pos += 1;
                        st.remaining -= 1;
                    }
                    if st.remaining > 0 {
                        break true;
                    }
                    let acc = st.acc;
                    let then = st.then;
                    match then {
                        Then::PNumber => {
                            self.result = if acc <= i64::MAX as u64 {
                                Value::from(acc as i64)
                            } else {
                                Value::from(acc)
                            };
                            break false;
                        }
                        Then::NNumber => {
                            // magnitudes beyond 2^63 have no signed storage
                            self.result = if acc <= (i64::MAX as u64) + 1 {
                                Value::from((-(acc as i128)) as i64)
                            } else {
                                Value::from(-(acc as f64))
                            };
                            break false;
                        }
                        Then::Text | Then::NumberText => {
                            *state = State::Str(StrState {
                                remaining: acc as usize,
                                numeric: matches!(then, Then::NumberText),
                                data: Vec::with_capacity(acc.min(4096) as usize),
                            });
                        }
                        Then::Array => {
                            if acc == 0 {
                                self.result = Value::from(Vec::<Value>::new());
                                break false;
                            }
                            *state = State::Array(ArrayState {
                                count: acc,
                                items: Vec::with_capacity(acc.min(4096) as usize),
                            });
                        }
                        Then::Object => {
                            if acc == 0 {
                                self.result = Value::from(Vec::<KeyValue>::new());
                                break false;
                            }
                            *state = State::Object(ObjectState {
                                count: acc,
                                reading_key: true,
                                key: Key::default(),
                                items: Vec::with_capacity(acc.min(4096) as usize),
                            });
                        }
                    }
                }
                State::DoubleBits(st) => {
                    while st.remaining > 0 && *pos < input.len() {
                        st.acc = (st.acc << 8) | input[*pos] as u64;
                        *pos += 1;
                        st.remaining -= 1;
                    }
                    if st.remaining > 0 {
                        break true;
                    }
                    self.result = Value::from(f64::from_bits(st.acc));
                    break false;
                }
                State::Str(st) => {
                    let take = st.remaining.min(input.len() - *pos);
                    st.data.extend_from_slice(&input[*pos..*pos + take]);
                    *pos += take;
                    st.remaining -= take;
                    if st.remaining > 0 {
                        break true;
                    }
                    let numeric = st.numeric;
                    let data = std::mem::take(&mut st.data);
                    let text = match String::from_utf8(data) {
                        Ok(s) => s,
                        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    };
                    self.result = if numeric {
                        Value::number(text)
                    } else {
                        Value::from(text)
                    };
                    break false;
                }
                State::Array(_) | State::Object(_) => {
                    // completion happens in finish_top when the last child
                    // lands; this state only ever asks for the next one
                    push_child = true;
                    break true;
                }
            }
        };
        if push_child {
            self.stack.push(State::Detect);
        }
        need_more
    }

    /// Folds a completed child into the parent container. Containers are
    /// count-prefixed with no terminator, so the declared count reached
    /// here is what completes them, cascading further up the stack.
    fn finish_top(&mut self) -> bool {
        let v = std::mem::replace(&mut self.result, Value::UNDEFINED);
        match self.stack.last_mut() {
            Some(State::Array(st)) => {
                st.items.push(v);
                if st.items.len() as u64 == st.count {
                    self.result = Value::from(std::mem::take(&mut st.items));
                    false
                } else {
                    true
                }
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
                    if st.items.len() as u64 == st.count {
                        self.result = Value::from(std::mem::take(&mut st.items));
                        false
                    } else {
                        true
                    }
                }
            }
            _ => {
                self.result = v;
                false
            }
        }
    }
}
