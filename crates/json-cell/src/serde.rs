//! Conversions between [`Value`] and `serde_json::Value`.

use crate::key::KeyValue;
use crate::value::{Value, ValueView};

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::NULL,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    Value::from(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(arr) => arr.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(obj) => obj
                .into_iter()
                .map(|(k, v)| KeyValue::new(k, Value::from(v)))
                .collect(),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v.view() {
            ValueView::Undefined | ValueView::Null => serde_json::Value::Null,
            ValueView::Bool(b) => serde_json::Value::Bool(b),
            ValueView::I32(n) => serde_json::json!(n),
            ValueView::U32(n) => serde_json::json!(n),
            ValueView::I64(n) => serde_json::json!(n),
            ValueView::U64(n) => serde_json::json!(n),
            ValueView::F64(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ValueView::Str(s) => serde_json::Value::String(s.to_owned()),
            ValueView::NumberText(t) => {
                // keep the literal a number where the target model can hold
                // it; otherwise carry it as a string
                if let Ok(i) = t.parse::<i64>() {
                    serde_json::json!(i)
                } else if let Ok(u) = t.parse::<u64>() {
                    serde_json::json!(u)
                } else if let Ok(f) = t.parse::<f64>() {
                    serde_json::Number::from_f64(f)
                        .map(serde_json::Value::Number)
                        .unwrap_or_else(|| serde_json::Value::String(t.to_owned()))
                } else {
                    serde_json::Value::String(t.to_owned())
                }
            }
            ValueView::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            ValueView::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|kv| (kv.key.as_str().to_owned(), serde_json::Value::from(&kv.value)))
                    .collect(),
            ),
            ValueView::Custom(c) => serde_json::Value::from(&c.to_json()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        serde_json::Value::from(&v)
    }
}
