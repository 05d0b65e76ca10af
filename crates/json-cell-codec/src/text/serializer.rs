//! [`TextSerializer`] — incremental pull-based JSON encoder.
//!
//! Mirrors the parser's explicit stack: a frame is either a pending value
//! or a cursor over an in-progress container. Each `read` emits one bounded
//! chunk, so a fixed-size output buffer can drain arbitrarily large trees.

use std::collections::HashMap;

use json_cell::{CustomValue, Key, Value, ValueView, INFINITY_TEXT, NEG_INFINITY_TEXT};

use super::{number, string};

enum Frame {
    Value(Value),
    Array { owner: Value, pos: usize },
    Object { owner: Value, pos: usize },
}

pub struct TextSerializer {
    stack: Vec<Frame>,
    out: String,
    /// One `to_json` expansion per custom-value identity per pass.
    expansions: HashMap<usize, Value>,
}

impl TextSerializer {
    pub fn new(value: Value) -> Self {
        Self {
            stack: vec![Frame::Value(value)],
            out: String::new(),
            expansions: HashMap::new(),
        }
    }

    /// Next bounded chunk of encoded output; `None` once complete.
    pub fn read(&mut self) -> Option<&str> {
        if self.stack.is_empty() {
            return None;
        }
        self.out.clear();
        self.next();
        Some(self.out.as_str())
    }

    fn next(&mut self) {
        loop {
            let frame = match self.stack.pop() {
                Some(f) => f,
                None => return,
            };
            match frame {
                Frame::Value(v) => {
                    self.render_value(v);
                    return;
                }
                Frame::Array { owner, pos } => {
                    let mut p = pos;
                    let len = owner.values().len();
                    let mut advanced = false;
                    while p < len {
                        let item = owner.values()[p].clone();
                        p += 1;
                        // tombstones vanish, comma included
                        if item.defined() {
                            self.out.push(',');
                            self.stack.push(Frame::Array { owner, pos: p });
                            self.render_value(item);
                            advanced = true;
                            break;
                        }
                    }
                    if advanced {
                        return;
                    }
                    self.out.push(']');
                    // closed: keep going on the parent frame
                }
                Frame::Object { owner, pos } => {
                    let mut p = pos;
                    let len = owner.entries().len();
                    let mut advanced = false;
                    while p < len {
                        let kv = owner.entries()[p].clone();
                        p += 1;
                        if kv.value.defined() {
                            self.out.push(',');
                            self.render_key(&kv.key);
                            self.out.push(':');
                            self.stack.push(Frame::Object { owner, pos: p });
                            self.render_value(kv.value);
                            advanced = true;
                            break;
                        }
                    }
                    if advanced {
                        return;
                    }
                    self.out.push('}');
                }
            }
        }
    }

    /// Renders one value; compound values emit their opener plus first
    /// child and leave a cursor frame behind. The descent into first
    /// children is a loop, not recursion, so nesting depth stays off the
    /// native call stack.
    fn render_value(&mut self, value: Value) {
        let mut current = value;
        loop {
            let next = match current.view() {
                ValueView::Undefined => {
                    self.out.push_str("\"undefined\"");
                    None
                }
                ValueView::Null => {
                    self.out.push_str("null");
                    None
                }
                ValueView::Bool(true) => {
                    self.out.push_str("true");
                    None
                }
                ValueView::Bool(false) => {
                    self.out.push_str("false");
                    None
                }
                ValueView::I32(n) => {
                    number::write_i64(n as i64, &mut self.out);
                    None
                }
                ValueView::U32(n) => {
                    number::write_u64(n as u64, &mut self.out);
                    None
                }
                ValueView::I64(n) => {
                    number::write_i64(n, &mut self.out);
                    None
                }
                ValueView::U64(n) => {
                    number::write_u64(n, &mut self.out);
                    None
                }
                ValueView::F64(d) => {
                    self.render_f64(d);
                    None
                }
                ValueView::NumberText(t) => {
                    self.out.push_str(t);
                    None
                }
                ValueView::Str(s) => {
                    self.out.push('"');
                    string::encode_into(s, &mut self.out);
                    self.out.push('"');
                    None
                }
                ValueView::Array(items) => {
                    self.out.push('[');
                    let mut p = 0;
                    while p < items.len() && !items[p].defined() {
                        p += 1;
                    }
                    if p >= items.len() {
                        self.out.push(']');
                        None
                    } else {
                        let child = items[p].clone();
                        self.stack.push(Frame::Array {
                            owner: current.clone(),
                            pos: p + 1,
                        });
                        Some(child)
                    }
                }
                ValueView::Object(entries) => {
                    self.out.push('{');
                    let mut p = 0;
                    while p < entries.len() && !entries[p].value.defined() {
                        p += 1;
                    }
                    if p >= entries.len() {
                        self.out.push('}');
                        None
                    } else {
                        let kv = entries[p].clone();
                        self.render_key(&kv.key);
                        self.out.push(':');
                        self.stack.push(Frame::Object {
                            owner: current.clone(),
                            pos: p + 1,
                        });
                        Some(kv.value)
                    }
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
        self.out.push('"');
        string::encode_into(key.as_str(), &mut self.out);
        self.out.push('"');
    }

    /// NaN degrades to `null`; infinities become the quoted glyph tokens.
    fn render_f64(&mut self, v: f64) {
        if v.is_nan() {
            self.out.push_str("null");
        } else if v.is_infinite() {
            self.out.push('"');
            self.out
                .push_str(if v > 0.0 { INFINITY_TEXT } else { NEG_INFINITY_TEXT });
            self.out.push('"');
        } else {
            number::format_f64(v, &mut self.out);
        }
    }
}
