//! Career interest and specialization tags.
//!
//! Tags are free text entered by people, so two spellings of the same tag
//! (`" investment/REPE"` and `"Investment/REPE"`) must compare equal. The
//! display form keeps the first spelling seen; comparison uses a normalized
//! key: trimmed, internal whitespace collapsed to one space, lowercased.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};

/// A single normalized tag.
#[derive(Debug, Clone)]
pub struct InterestTag {
    display: String,
    key: String,
}

impl InterestTag {
    /// Builds a tag, returning `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let display = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if display.is_empty() {
            return None;
        }
        let key = display.to_lowercase();
        Some(Self { display, key })
    }

    /// The cleaned-up form shown to users.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// The comparison key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for InterestTag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for InterestTag {}

impl Hash for InterestTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl std::fmt::Display for InterestTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for InterestTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for InterestTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        InterestTag::new(&raw).ok_or_else(|| serde::de::Error::custom("tag must not be blank"))
    }
}

/// An ordered, duplicate-free list of tags.
///
/// Insertion order is kept so responses echo tags the way they were entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestSet {
    tags: Vec<InterestTag>,
}

impl InterestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw strings, dropping blanks and duplicates.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for value in raw {
            if let Some(tag) = InterestTag::new(value.as_ref()) {
                set.insert(tag);
            }
        }
        set
    }

    /// Adds a tag unless an equal one is present. Returns whether it was added.
    pub fn insert(&mut self, tag: InterestTag) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn contains(&self, tag: &InterestTag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterestTag> {
        self.tags.iter()
    }

    /// Tags of `self` also present in `other`, in `self`'s order.
    pub fn intersection(&self, other: &InterestSet) -> Vec<InterestTag> {
        self.tags
            .iter()
            .filter(|tag| other.contains(tag))
            .cloned()
            .collect()
    }

    /// Display strings in insertion order.
    pub fn to_strings(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl FromIterator<InterestTag> for InterestSet {
    fn from_iter<T: IntoIterator<Item = InterestTag>>(iter: T) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl Serialize for InterestSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tags.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InterestSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(InterestSet::from_raw(raw))
    }
}
