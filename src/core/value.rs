//! Purpose: Domain value tree reconstructed from a serialized route stream.
//! Exports: `Value`.
//! Role: Tagged variant shared by the deserializer, renderer, and tests.
//! Invariants: Table pair insertion order is preserved for stable re-emission.
//! Invariants: String payloads are raw byte sequences, not required to be UTF-8.
use bstr::BString;

#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    String(BString),
    Table(Vec<(Value, Value)>),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Table(_) => "table",
        }
    }

    /// Looks up a table entry by string key. Returns `None` for non-tables.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let Self::Table(pairs) = self else {
            return None;
        };
        pairs.iter().find_map(|(entry_key, entry_value)| {
            matches!(entry_key, Self::String(text) if text == key).then_some(entry_value)
        })
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&BString> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Table(a), Self::Table(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}
