//! Ordered, string-keyed role maps

use std::fmt;
use std::marker::PhantomData;

use ahash::AHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shadeplate_color::HexColor;

/// The reserved name of the primary role
pub const BASE_ROLE: &str = "Base";

/// Role name -> color set exchanged with the document indexer
pub type Palette = RoleMap<HexColor>;

/// Role name -> labeled color, the input to template capture
pub type Analysis = RoleMap<LabeledColor>;

/// A captured color with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledColor {
    pub label: String,
    pub color: HexColor,
}

impl LabeledColor {
    pub fn new(label: impl Into<String>, color: HexColor) -> Self {
        LabeledColor {
            label: label.into(),
            color,
        }
    }
}

/// Mapping from role name to a value, keeping insertion order
///
/// Role names are case-sensitive. Re-inserting an existing role replaces its
/// value in place.
#[derive(Clone)]
pub struct RoleMap<V> {
    entries: Vec<(String, V)>,
    by_name: AHashMap<String, usize>,
}

impl<V> RoleMap<V> {
    pub fn new() -> Self {
        RoleMap {
            entries: Vec::new(),
            by_name: AHashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RoleMap {
            entries: Vec::with_capacity(capacity),
            by_name: AHashMap::with_capacity(capacity),
        }
    }

    /// Insert or replace a role, returning the previous value
    pub fn insert(&mut self, role: impl Into<String>, value: V) -> Option<V> {
        let role = role.into();
        if let Some(&idx) = self.by_name.get(&role) {
            return Some(std::mem::replace(&mut self.entries[idx].1, value));
        }
        self.by_name.insert(role.clone(), self.entries.len());
        self.entries.push((role, value));
        None
    }

    pub fn get(&self, role: &str) -> Option<&V> {
        self.by_name.get(role).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.by_name.contains_key(role)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Role names in insertion order
    pub fn roles(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(role, _)| role.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.entries.iter().map(|(role, v)| (role.as_str(), v))
    }

    /// Transform every value, keeping roles and order
    pub fn map_values<U>(&self, mut f: impl FnMut(&str, &V) -> U) -> RoleMap<U> {
        RoleMap {
            entries: self
                .entries
                .iter()
                .map(|(role, v)| (role.clone(), f(role, v)))
                .collect(),
            by_name: self.by_name.clone(),
        }
    }
}

impl<V> Default for RoleMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for RoleMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: fmt::Debug> fmt::Debug for RoleMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for RoleMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = RoleMap::new();
        for (role, value) in iter {
            map.insert(role, value);
        }
        map
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for RoleMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (role, value) in iter {
            self.insert(role, value);
        }
    }
}

impl<V> IntoIterator for RoleMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Palette {
    /// Attach labels, defaulting each label to its role name
    pub fn to_analysis(&self) -> Analysis {
        self.map_values(|role, &color| LabeledColor::new(role, color))
    }
}

impl<V: Serialize> Serialize for RoleMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (role, value) in &self.entries {
            map.serialize_entry(role, value)?;
        }
        map.end()
    }
}

struct RoleMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for RoleMapVisitor<V> {
    type Value = RoleMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from role name to value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = RoleMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((role, value)) = access.next_entry::<String, V>()? {
            if map.insert(role.clone(), value).is_some() {
                return Err(serde::de::Error::custom(format!("duplicate role '{}'", role)));
            }
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for RoleMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RoleMapVisitor(PhantomData))
    }
}
