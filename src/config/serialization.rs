//! Order-preserving deserialization for catalog mappings
//!
//! Catalog order decides the order of resolver roots, so YAML mappings are read
//! into a vector of entries instead of a hash map.

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

/// A string-keyed mapping that remembers the order keys appeared in
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de, V> Deserialize<'de> for OrderedMap<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for OrderedMapVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping")
            }

            fn visit_unit<E>(self) -> std::result::Result<OrderedMap<V>, E>
            where
                E: serde::de::Error,
            {
                Ok(OrderedMap::default())
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<OrderedMap<V>, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries: Vec<(String, V)> = Vec::with_capacity(map.size_hint().unwrap_or(0));

                while let Some(key) = map.next_key::<String>()? {
                    let value = map.next_value()?;
                    // Repeated keys behave like a later assignment
                    if let Some(existing) = entries.iter_mut().find(|(k, _)| *k == key) {
                        existing.1 = value;
                    } else {
                        entries.push((key, value));
                    }
                }

                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Either a single value or a list of values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_preserves_order() {
        let yaml = "zeta: 1\nalpha: 2\nmid: 3\n";
        let map: OrderedMap<u32> = serde_yaml::from_str(yaml).expect("valid yaml");
        let keys: Vec<&str> = map.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_ordered_map_null_entries() {
        let yaml = "git: ~\nnode: 2\n";
        let map: OrderedMap<Option<u32>> = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(map.0.len(), 2);
        assert_eq!(map.0[0], ("git".to_string(), None));
        assert_eq!(map.0[1], ("node".to_string(), Some(2)));
    }

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany = serde_yaml::from_str("https://example.com").expect("valid yaml");
        assert_eq!(one.into_vec(), vec!["https://example.com"]);

        let many: OneOrMany = serde_yaml::from_str("[a, b]").expect("valid yaml");
        assert_eq!(many.into_vec(), vec!["a", "b"]);
    }
}
