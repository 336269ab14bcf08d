use serde_yaml::{Mapping, Value};
use std::fmt;

/// A single frontmatter value
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Null,
    Text(String),
    Integer(i64),
    List(Vec<String>),
    /// Anything else found in a note (booleans, floats, nested maps, mixed lists)
    Other(Value),
}

impl MetadataValue {
    /// True for null, the empty string and the empty list only.
    /// A list holding an empty string is not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            MetadataValue::Null => true,
            MetadataValue::Text(s) => s.is_empty(),
            MetadataValue::List(items) => items.is_empty(),
            MetadataValue::Integer(_) | MetadataValue::Other(_) => false,
        }
    }

    /// Coerce to an integer the way JavaScript's `parseInt` reads text:
    /// leading whitespace, an optional sign, then as many digits as follow.
    /// Digit runs beyond the `i64` range saturate.
    pub fn coerce_integer(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(n) => Some(*n),
            MetadataValue::Text(s) => parse_int_prefix(s),
            MetadataValue::Other(Value::Number(n)) => {
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
            }
            _ => None,
        }
    }

    pub fn from_yaml(value: Value) -> Self {
        match value {
            Value::Null => MetadataValue::Null,
            Value::String(s) => MetadataValue::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => MetadataValue::Integer(i),
                None => MetadataValue::Other(Value::Number(n)),
            },
            Value::Sequence(items) if items.iter().all(Value::is_string) => MetadataValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => MetadataValue::Other(other),
        }
    }

    pub fn to_yaml(&self) -> Value {
        match self {
            MetadataValue::Null => Value::Null,
            MetadataValue::Text(s) => Value::String(s.clone()),
            MetadataValue::Integer(n) => Value::Number((*n).into()),
            MetadataValue::List(items) => {
                Value::Sequence(items.iter().cloned().map(Value::String).collect())
            }
            MetadataValue::Other(v) => v.clone(),
        }
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }

    // Parse with the sign attached so i64::MIN fits; overlong runs saturate
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    Some(signed.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Null => Ok(()),
            MetadataValue::Text(s) => write!(f, "{}", s),
            MetadataValue::Integer(n) => write!(f, "{}", n),
            MetadataValue::List(items) => write!(f, "[{}]", items.join(", ")),
            MetadataValue::Other(v) => match serde_json::to_string(v) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "{:?}", v),
            },
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Text(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Text(s)
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::Integer(n)
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(items: Vec<String>) -> Self {
        MetadataValue::List(items)
    }
}

impl From<Vec<&str>> for MetadataValue {
    fn from(items: Vec<&str>) -> Self {
        MetadataValue::List(items.into_iter().map(String::from).collect())
    }
}

/// Frontmatter fields in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataRecord {
    entries: Vec<(String, MetadataValue)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a value. Replacing an existing key keeps its position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_mapping(mapping: Mapping) -> Self {
        mapping
            .into_iter()
            .map(|(k, v)| (key_to_string(k), MetadataValue::from_yaml(v)))
            .collect()
    }

    pub fn to_mapping(&self) -> Mapping {
        self.entries
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.to_yaml()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = MetadataRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

fn key_to_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(MetadataValue::Null.is_empty());
        assert!(MetadataValue::from("").is_empty());
        assert!(MetadataValue::List(vec![]).is_empty());

        assert!(!MetadataValue::from(vec![""]).is_empty());
        assert!(!MetadataValue::from(0i64).is_empty());
        assert!(!MetadataValue::from(" ").is_empty());
        assert!(!MetadataValue::Other(Value::Bool(false)).is_empty());
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(MetadataValue::from(5i64).coerce_integer(), Some(5));
        assert_eq!(MetadataValue::from("4").coerce_integer(), Some(4));
        assert_eq!(MetadataValue::from("  42 stars").coerce_integer(), Some(42));
        assert_eq!(MetadataValue::from("-3").coerce_integer(), Some(-3));
        assert_eq!(MetadataValue::from("4.5").coerce_integer(), Some(4));
        assert_eq!(MetadataValue::from("").coerce_integer(), None);
        assert_eq!(MetadataValue::from("five").coerce_integer(), None);
        assert_eq!(MetadataValue::from("-").coerce_integer(), None);
        assert_eq!(MetadataValue::Null.coerce_integer(), None);

        let float: Value = serde_yaml::from_str("3.9").unwrap();
        assert_eq!(MetadataValue::from_yaml(float).coerce_integer(), Some(3));
    }

    #[test]
    fn test_coerce_integer_saturates() {
        assert_eq!(
            MetadataValue::from("99999999999999999999").coerce_integer(),
            Some(i64::MAX)
        );
        assert_eq!(
            MetadataValue::from("-99999999999999999999").coerce_integer(),
            Some(i64::MIN)
        );
        assert_eq!(
            MetadataValue::from("-9223372036854775808").coerce_integer(),
            Some(i64::MIN)
        );
    }

    #[test]
    fn test_from_yaml_shapes() {
        let mapping: Mapping = serde_yaml::from_str(
            r#"
title: Dune
rating: 5
tags: [books, scifi]
empty: []
owned: true
score: 4.5
mixed: [1, two]
missing:
"#,
        )
        .unwrap();

        let record = MetadataRecord::from_mapping(mapping);
        assert_eq!(record.get("title"), Some(&MetadataValue::from("Dune")));
        assert_eq!(record.get("rating"), Some(&MetadataValue::Integer(5)));
        assert_eq!(
            record.get("tags"),
            Some(&MetadataValue::from(vec!["books", "scifi"]))
        );
        assert_eq!(record.get("empty"), Some(&MetadataValue::List(vec![])));
        assert!(matches!(record.get("owned"), Some(MetadataValue::Other(_))));
        assert!(matches!(record.get("score"), Some(MetadataValue::Other(_))));
        assert!(matches!(record.get("mixed"), Some(MetadataValue::Other(_))));
        assert_eq!(record.get("missing"), Some(&MetadataValue::Null));
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut record: MetadataRecord = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();

        let old = record.insert("b", "changed");
        assert_eq!(old, Some(MetadataValue::from("2")));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(record.get("b"), Some(&MetadataValue::from("changed")));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let mapping: Mapping = serde_yaml::from_str("1984: novel\ntrue: yes\n").unwrap();
        let record = MetadataRecord::from_mapping(mapping);
        assert!(record.contains_key("1984"));
        assert!(record.contains_key("true"));
    }

    #[test]
    fn test_mapping_keeps_order() {
        let record: MetadataRecord = [
            ("zeta", MetadataValue::from("last")),
            ("alpha", MetadataValue::from(1i64)),
        ]
        .into_iter()
        .collect();

        let yaml = serde_yaml::to_string(&record.to_mapping()).unwrap();
        assert_eq!(yaml, "zeta: last\nalpha: 1\n");
    }

    #[test]
    fn test_display() {
        assert_eq!(MetadataValue::Null.to_string(), "");
        assert_eq!(MetadataValue::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(MetadataValue::from(7i64).to_string(), "7");
        assert_eq!(MetadataValue::Other(Value::Bool(true)).to_string(), "true");
    }
}
