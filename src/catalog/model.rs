//! Typed records stored in the catalog.
//!
//! `Product` and `Category` name the fields the store relies on and keep every
//! other caller-supplied field in an open `extra` side-table, so records round
//! trip through the journal without loss. Missing fields stay missing on the
//! wire instead of being defaulted.

use crate::catalog::identity::{CollectionName, RecordId};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output-only field stamped onto every record returned by a list or create.
pub const GENERATED_FIELD: &str = "generated";

/// Behaviour shared by the record types held in a [`crate::Collection`].
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Journal collection the record type lives in.
    fn collection() -> CollectionName;

    fn name(&self) -> Option<&str>;

    fn id(&self) -> Option<&RecordId>;

    /// Look up a string field by name, falling back to the side-table.
    ///
    /// Non-string side-table values yield `None`, so filters over them simply
    /// do not match.
    fn field(&self, field: &str) -> Option<&str>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// A category label that products point at through `category_id`.
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// A catalog product. `name` is unique across the `products` collection.
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: Some(RecordId(id.into())),
            extra: Map::new(),
        }
    }
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            id: Some(RecordId(id.into())),
            category_id: Some(RecordId(category_id.into())),
            extra: Map::new(),
        }
    }
}

fn side_table_str<'a>(extra: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    extra.get(field).and_then(Value::as_str)
}

impl Record for Category {
    fn collection() -> CollectionName {
        CollectionName::Categories
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name(),
            "id" => self.id().map(RecordId::as_str),
            other => side_table_str(&self.extra, other),
        }
    }
}

impl Record for Product {
    fn collection() -> CollectionName {
        CollectionName::Products
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name(),
            "id" => self.id().map(RecordId::as_str),
            "category_id" => self.category_id.as_ref().map(RecordId::as_str),
            other => side_table_str(&self.extra, other),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
/// A record prepared for output, stamped with the moment it was rendered.
///
/// The timestamp is UTC and serializes as RFC 3339. It exists only on this
/// wrapper; the stored record never carries it.
pub struct Generated<R> {
    #[serde(flatten)]
    pub record: R,
    pub generated: DateTime<Utc>,
}

impl<R: Record> Generated<R> {
    /// Stamp `record` with the current time.
    pub fn now(record: R) -> Self {
        Self {
            record,
            generated: Utc::now(),
        }
    }
}
