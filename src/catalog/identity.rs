use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Caller-supplied identifier for a record (typically a UUID string).
///
/// Products reference categories through the same type in `category_id`; the
/// store never checks that such a reference resolves.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a collection inside the journal.
///
/// The store only knows `products` and `categories`; `Other` lets the journal
/// reader carry entries written by a newer binary without failing the replay.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CollectionName {
    Products,
    Categories,
    Other(String),
}

impl CollectionName {
    pub fn as_str(&self) -> &str {
        match self {
            CollectionName::Products => "products",
            CollectionName::Categories => "categories",
            CollectionName::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "products" => CollectionName::Products,
            "categories" => CollectionName::Categories,
            other => CollectionName::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CollectionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CollectionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}
