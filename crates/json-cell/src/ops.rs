//! Sequence and object transforms over the container abstraction.
//!
//! Every operation here produces a fresh container and reassigns the
//! handle; shared storage is never mutated in place. Builders allocate
//! worst-case capacity and commit however many elements survive.

use std::ops::Range;

use crate::container::ContainerBuilder;
use crate::key::KeyValue;
use crate::value::Value;

impl Value {
    /// Merges another object's keys into this one.
    ///
    /// Equal keys are replaced by the values from `changes`; a key mapped
    /// to undefined is erased. Both entry runs are already sorted, so this
    /// is a two-way merge, not a sort-after-append.
    pub fn merge_keys(&mut self, changes: &Value) {
        let a = self.entries();
        let b = changes.entries();
        let mut out = ContainerBuilder::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].key.cmp(&b[j].key) {
                std::cmp::Ordering::Less => {
                    out.push(a[i].clone());
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    if b[j].value.defined() {
                        out.push(b[j].clone());
                    }
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    if b[j].value.defined() {
                        out.push(b[j].clone());
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        while i < a.len() {
            out.push(a[i].clone());
            i += 1;
        }
        while j < b.len() {
            if b[j].value.defined() {
                out.push(b[j].clone());
            }
            j += 1;
        }
        *self = Value::from_object_container(out.finish());
    }

    /// Sets (or erases, via undefined) keys on this object.
    pub fn set_keys<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = KeyValue>,
    {
        let changes: Value = entries.into_iter().collect();
        self.merge_keys(&changes);
    }

    /// Appends items to this array.
    pub fn append<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let base = self.values();
        let mut out = Vec::with_capacity(base.len());
        out.extend_from_slice(base);
        out.extend(items);
        *self = Value::from(out);
    }

    /// Copies out a sub-range of this array; the range is clamped.
    pub fn slice(&self, range: Range<usize>) -> Value {
        let src = self.values();
        let start = range.start.min(src.len());
        let end = range.end.clamp(start, src.len());
        Value::from(src[start..end].to_vec())
    }

    /// Replaces a sub-range of this array with new items and returns the
    /// erased run.
    pub fn splice<I>(&mut self, range: Range<usize>, items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        let src = self.values();
        let start = range.start.min(src.len());
        let end = range.end.clamp(start, src.len());
        let erased = Value::from(src[start..end].to_vec());
        let mut out = Vec::with_capacity(src.len() - (end - start));
        out.extend_from_slice(&src[..start]);
        out.extend(items);
        out.extend_from_slice(&src[end..]);
        *self = Value::from(out);
        erased
    }

    /// Inserts items before position `at`.
    pub fn insert<I>(&mut self, at: usize, items: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.splice(at..at, items);
    }

    /// Erases a sub-range of this array.
    pub fn erase(&mut self, range: Range<usize>) {
        self.splice(range, std::iter::empty());
    }

    /// Keeps array elements the predicate accepts.
    pub fn filter<F>(&self, mut f: F) -> Value
    where
        F: FnMut(&Value) -> bool,
    {
        let src = self.values();
        let mut out = ContainerBuilder::with_capacity(src.len());
        for v in src {
            if f(v) {
                out.push(v.clone());
            }
        }
        Value::from_array_container(out.finish())
    }

    /// Keeps object entries the predicate accepts; sortedness is preserved
    /// since entries are visited in order.
    pub fn filter_entries<F>(&self, mut f: F) -> Value
    where
        F: FnMut(&KeyValue) -> bool,
    {
        let src = self.entries();
        let mut out = ContainerBuilder::with_capacity(src.len());
        for kv in src {
            if f(kv) {
                out.push(kv.clone());
            }
        }
        Value::from_object_container(out.finish())
    }

    /// Maps contained values (array elements, or an object's values) into a
    /// new array; undefined results are dropped.
    pub fn map<F>(&self, mut f: F) -> Value
    where
        F: FnMut(&Value) -> Value,
    {
        let mut out = ContainerBuilder::with_capacity(self.len());
        for v in self.iter() {
            let w = f(v);
            if w.defined() {
                out.push(w);
            }
        }
        Value::from_array_container(out.finish())
    }

    /// Maps object entries into new entries; entries mapped to an undefined
    /// value are dropped, and the result is re-sorted.
    pub fn map_entries<F>(&self, mut f: F) -> Value
    where
        F: FnMut(&KeyValue) -> KeyValue,
    {
        let mut out = Vec::with_capacity(self.len());
        for kv in self.entries() {
            let w = f(kv);
            if w.value.defined() {
                out.push(w);
            }
        }
        Value::from(out)
    }

    /// Maps contained values into object entries; the result is sorted.
    pub fn map_to_entries<F>(&self, mut f: F) -> Value
    where
        F: FnMut(&Value) -> KeyValue,
    {
        let mut out = Vec::with_capacity(self.len());
        for v in self.iter() {
            let w = f(v);
            if w.value.defined() {
                out.push(w);
            }
        }
        Value::from(out)
    }
}
