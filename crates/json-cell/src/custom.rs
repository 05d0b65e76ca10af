//! [`CustomValue`] — user-defined values embedded in the tree.

use std::fmt;

use crate::value::{Kind, Value, UNDEFINED};

/// A polymorphic value stored inside a [`Value`] tree.
///
/// Implementations should be immutable. The declared [`kind`](Self::kind)
/// controls how the value is accessed; string, array and object are the
/// most meaningful choices. During serialization the value is expanded
/// through [`to_json`](Self::to_json), and the expansion is cached per
/// custom-value identity for the duration of one serialization pass.
///
/// Only `kind` and `to_text` are mandatory; the rest of the capability set
/// defaults to empty/undefined/identity behavior.
pub trait CustomValue: fmt::Debug + Send + Sync {
    /// Compatible JSON kind this value presents as.
    fn kind(&self) -> Kind;

    /// String rendition, used by `Display`.
    fn to_text(&self) -> String;

    /// String content, when the value acts as a string.
    fn get_string(&self) -> &str {
        ""
    }

    /// Item count, when the value acts as a container.
    fn len(&self) -> usize {
        0
    }

    /// Plain JSON expansion used by the codecs.
    fn to_json(&self) -> Value {
        Value::NULL
    }

    /// Positional lookup, when the value acts as an array.
    fn index(&self, _index: usize) -> &Value {
        &UNDEFINED
    }

    /// Keyed lookup, when the value acts as an object.
    fn key(&self, _key: &str) -> &Value {
        &UNDEFINED
    }

    /// Equality between custom values; identity unless overridden.
    fn eq_custom(&self, other: &dyn CustomValue) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn CustomValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyValue;

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl CustomValue for Point {
        fn kind(&self) -> Kind {
            Kind::Object
        }

        fn to_text(&self) -> String {
            format!("({},{})", self.x, self.y)
        }

        fn to_json(&self) -> Value {
            vec![
                KeyValue::new("x", Value::from(self.x)),
                KeyValue::new("y", Value::from(self.y)),
            ]
            .into()
        }
    }

    #[test]
    fn defaults_apply() {
        let v = Value::custom(Point { x: 1, y: 2 });
        assert_eq!(v.kind(), Kind::Object);
        assert!(!v[0].defined());
        assert!(!v["x"].defined());
        assert_eq!(v.to_string(), "(1,2)");
    }

    #[test]
    fn equality_is_identity() {
        let v = Value::custom(Point { x: 1, y: 2 });
        let w = Value::custom(Point { x: 1, y: 2 });
        let v2 = v.clone();
        assert_eq!(v, v2);
        assert_ne!(v, w);
    }
}
