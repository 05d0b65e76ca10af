//! [`BinSerializer`] — incremental pull-based binary encoder.
//!
//! Same frame-stack shape as the text serializer. Unlike the text codec,
//! undefined entries are emitted explicitly, so every element and key
//! survives a round trip byte-for-byte. Containers are count-prefixed and
//! have no terminator, so an exhausted cursor emits nothing.

use std::collections::HashMap;

use json_cell::{CustomValue, Key, Value, ValueView};

use super::constants;

enum Frame {
    Value(Value),
    Array { owner: Value, pos: usize },
    Object { owner: Value, pos: usize },
}

pub struct BinSerializer {
    stack: Vec<Frame>,
    out: Vec<u8>,
    expansions: HashMap<usize, Value>,
}

impl BinSerializer {
    pub fn new(value: Value) -> Self {
        Self {
            stack: vec![Frame::Value(value)],
            out: Vec::new(),
            expansions: HashMap::new(),
        }
    }

    /// Next bounded chunk of encoded bytes; `None` once complete.
    pub fn read(&mut self) -> Option<&[u8]> {
        self.out.clear();
        while self.out.is_empty() {
            if self.stack.is_empty() {
                return None;
            }
            self.step();
        }
        Some(&self.out)
    }

    fn step(&mut self) {
        let frame = match self.stack.pop() {
            Some(f) => f,
            None => return,
        };
        match frame {
            Frame::Value(v) => self.render_value(v),
            Frame::Array { owner, pos } => {
                if pos < owner.values().len() {
                    let item = owner.values()[pos].clone();
                    self.stack.push(Frame::Array {
                        owner,
                        pos: pos + 1,
                    });
                    self.render_value(item);
                }
            }
            Frame::Object { owner, pos } => {
                if pos < owner.entries().len() {
                    let kv = owner.entries()[pos].clone();
                    self.stack.push(Frame::Object {
                        owner,
                        pos: pos + 1,
                    });
                    self.render_key(&kv.key);
                    self.render_value(kv.value);
                }
            }
        }
    }

    fn render_value(&mut self, value: Value) {
        let mut current = value;
        loop {
            let next = match current.view() {
                ValueView::Undefined => {
                    self.out.push(constants::TAG_UNDEFINED);
                    None
                }
                ValueView::Null => {
                    self.out.push(constants::TAG_NULL);
                    None
                }
                ValueView::Bool(true) => {
                    self.out.push(constants::TAG_TRUE);
                    None
                }
                ValueView::Bool(false) => {
                    self.out.push(constants::TAG_FALSE);
                    None
                }
                ValueView::I32(n) => {
                    self.integer(n as i64);
                    None
                }
                ValueView::I64(n) => {
                    self.integer(n);
                    None
                }
                ValueView::U32(n) => {
                    self.header(constants::P_NUMBER, n as u64);
                    None
                }
                ValueView::U64(n) => {
                    self.header(constants::P_NUMBER, n);
                    None
                }
                ValueView::F64(d) => {
                    self.out.push(constants::TAG_DOUBLE);
                    self.out.extend_from_slice(&d.to_be_bytes());
                    None
                }
                ValueView::NumberText(t) => {
                    self.header(constants::STRING_NUMBER, t.len() as u64);
                    self.out.extend_from_slice(t.as_bytes());
                    None
                }
                ValueView::Str(s) => {
                    self.header(constants::STRING, s.len() as u64);
                    self.out.extend_from_slice(s.as_bytes());
                    None
                }
                ValueView::Array(items) => {
                    self.header(constants::ARRAY, items.len() as u64);
                    if !items.is_empty() {
                        self.stack.push(Frame::Array {
                            owner: current.clone(),
                            pos: 0,
                        });
                    }
                    None
                }
                ValueView::Object(entries) => {
                    self.header(constants::OBJECT, entries.len() as u64);
                    if !entries.is_empty() {
                        self.stack.push(Frame::Object {
                            owner: current.clone(),
                            pos: 0,
                        });
                    }
                    None
                }
                ValueView::Custom(c) => {
                    let id = (c as *const dyn CustomValue).cast::<()>() as usize;
                    Some(
                        self.expansions
                            .entry(id)
                            .or_insert_with(|| c.to_json())
                            .clone(),
                    )
                }
            };
            match next {
                Some(v) => current = v,
                None => return,
            }
        }
    }

    fn render_key(&mut self, key: &Key) {
        let s = key.as_str();
        self.header(constants::STRING, s.len() as u64);
        self.out.extend_from_slice(s.as_bytes());
    }

    fn integer(&mut self, n: i64) {
        if n < 0 {
            self.header(constants::N_NUMBER, n.unsigned_abs());
        } else {
            self.header(constants::P_NUMBER, n as u64);
        }
    }

    /// Tag byte (category | minimal byte count) plus the big-endian
    /// magnitude in exactly that many bytes.
    fn header(&mut self, category: u8, magnitude: u64) {
        let n = constants::magnitude_len(magnitude);
        self.out.push(category | (n as u8 - 1));
        self.out.extend_from_slice(&magnitude.to_be_bytes()[8 - n..]);
    }
}
