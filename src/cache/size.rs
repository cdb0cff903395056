//! Size Estimation Module
//!
//! Approximate memory footprint of cached values.
//!
//! Strings count two bytes per UTF-16 code unit, numbers eight bytes, nulls
//! and booleans four. Composite values are the sum of their parts, with map
//! keys counted as strings.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Size charged for null / absent values
pub const NULL_SIZE: usize = 4;

/// Size charged for booleans
pub const BOOL_SIZE: usize = 4;

/// Size charged for numbers
pub const NUMBER_SIZE: usize = 8;

// == Size Estimate Trait ==
/// Values that can report an approximate in-memory size in bytes.
pub trait SizeEstimate {
    fn estimated_size(&self) -> usize;
}

fn string_size(s: &str) -> usize {
    s.encode_utf16().count() * 2
}

impl SizeEstimate for serde_json::Value {
    fn estimated_size(&self) -> usize {
        use serde_json::Value;

        match self {
            Value::Null => NULL_SIZE,
            Value::Bool(_) => BOOL_SIZE,
            Value::Number(_) => NUMBER_SIZE,
            Value::String(s) => string_size(s),
            Value::Array(items) => items.iter().map(SizeEstimate::estimated_size).sum(),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| string_size(k) + v.estimated_size())
                .sum(),
        }
    }
}

impl SizeEstimate for str {
    fn estimated_size(&self) -> usize {
        string_size(self)
    }
}

impl SizeEstimate for String {
    fn estimated_size(&self) -> usize {
        string_size(self)
    }
}

impl SizeEstimate for bool {
    fn estimated_size(&self) -> usize {
        BOOL_SIZE
    }
}

impl SizeEstimate for () {
    fn estimated_size(&self) -> usize {
        NULL_SIZE
    }
}

macro_rules! impl_number_size {
    ($($t:ty),*) => {
        $(impl SizeEstimate for $t {
            fn estimated_size(&self) -> usize {
                NUMBER_SIZE
            }
        })*
    };
}

impl_number_size!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T: SizeEstimate> SizeEstimate for Option<T> {
    fn estimated_size(&self) -> usize {
        match self {
            Some(v) => v.estimated_size(),
            None => NULL_SIZE,
        }
    }
}

impl<T: SizeEstimate> SizeEstimate for Vec<T> {
    fn estimated_size(&self) -> usize {
        self.iter().map(SizeEstimate::estimated_size).sum()
    }
}

impl<T: SizeEstimate> SizeEstimate for HashMap<String, T> {
    fn estimated_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| string_size(k) + v.estimated_size())
            .sum()
    }
}

impl<T: SizeEstimate> SizeEstimate for BTreeMap<String, T> {
    fn estimated_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| string_size(k) + v.estimated_size())
            .sum()
    }
}

// == Byte Buffer ==
/// Raw binary payload, charged at its byte length.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteBuf(pub Vec<u8>);

impl SizeEstimate for ByteBuf {
    fn estimated_size(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_sizes() {
        assert_eq!(json!(null).estimated_size(), 4);
        assert_eq!(json!(true).estimated_size(), 4);
        assert_eq!(json!(42).estimated_size(), 8);
        assert_eq!(json!(1.5).estimated_size(), 8);
    }

    #[test]
    fn test_string_counts_utf16_units() {
        assert_eq!(json!("abc").estimated_size(), 6);
        assert_eq!("".estimated_size(), 0);
        // One code point outside the BMP is two UTF-16 units
        assert_eq!("\u{1F600}".estimated_size(), 4);
    }

    #[test]
    fn test_array_sums_elements() {
        assert_eq!(json!([1, "ab", null]).estimated_size(), 8 + 4 + 4);
    }

    #[test]
    fn test_object_counts_keys_and_values() {
        // "id" -> 4 + 8, "name" -> 8 + 6
        let value = json!({"id": 7, "name": "bob"});
        assert_eq!(value.estimated_size(), 12 + 14);
    }

    #[test]
    fn test_nested_composites() {
        let value = json!({"a": [true, {"b": 1}]});
        // "a" = 2, true = 4, "b" = 2, 1 = 8
        assert_eq!(value.estimated_size(), 16);
    }

    #[test]
    fn test_byte_buffer_uses_length() {
        assert_eq!(ByteBuf(vec![0; 128]).estimated_size(), 128);
    }

    #[test]
    fn test_rust_collections() {
        let mut map = HashMap::new();
        map.insert("k".to_string(), vec![1u32, 2u32]);
        assert_eq!(map.estimated_size(), 2 + 16);
        assert_eq!(None::<String>.estimated_size(), NULL_SIZE);
    }
}
