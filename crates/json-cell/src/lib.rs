//! Immutable, structurally-shared JSON value model.
//!
//! [`Value`] is a fixed-size tagged cell covering undefined, null, booleans,
//! four integer widths, doubles, strings, textual numbers (exact literals),
//! shared arrays/objects and user-extensible custom values. Arrays and
//! objects are backed by reference-counted [`Container`]s, so sharing a
//! subtree never deep-copies and read-only access is safe across threads.
//!
//! Undefined is distinct from null and acts as a tombstone inside
//! containers: the text codec drops such entries, the binary codec keeps
//! them (see the `json-cell-codec` crate).

mod container;
mod convert;
mod custom;
mod key;
mod ops;
mod serde;
mod value;

pub use container::{Container, ContainerBuilder};
pub use convert::{INFINITY_TEXT, NEG_INFINITY_TEXT};
pub use custom::CustomValue;
pub use key::{Key, KeyValue};
pub use value::{Iter, Kind, Value, ValueView, UNDEFINED};
