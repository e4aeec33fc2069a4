//! Normalized output records.

use serde::Serialize;

/// Caller-supplied item identifier (the catalog's `appid`).
pub type ItemId = i64;

/// Surrogate key assigned by a [`crate::Lookup`].
pub type AttributeId = u32;

/// One many-to-many edge between an item and an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct JunctionEntry {
    pub item_id: ItemId,
    pub attribute_id: AttributeId,
}

/// Positive vote count of one tag for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoteFact {
    pub item_id: ItemId,
    pub attribute_id: AttributeId,
    pub votes: f64,
}
