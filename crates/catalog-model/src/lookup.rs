//! Surrogate-key lookup tables.
//!
//! A [`Lookup`] maps every distinct value of one attribute domain to a dense
//! integer ID. IDs start at 1 and follow byte-wise lexical order of the
//! values, so the mapping depends only on the set of values observed.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::records::AttributeId;

/// Bijection between the distinct values of one domain and `1..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lookup {
    /// Sorted, unique values; the value at index `i` has ID `i + 1`.
    names: Vec<String>,
}

impl Lookup {
    /// Builds a lookup from an already-distinct value set.
    ///
    /// Values are trimmed and empty values are discarded before numbering.
    pub fn from_values(values: BTreeSet<String>) -> Self {
        let names: BTreeSet<String> = values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// Returns the surrogate key of a value, if the value was observed.
    pub fn id_of(&self, value: &str) -> Option<AttributeId> {
        let value = value.trim();
        self.names
            .binary_search_by(|name| name.as_str().cmp(value))
            .ok()
            .and_then(|idx| AttributeId::try_from(idx + 1).ok())
    }

    /// Returns the value that owns a surrogate key.
    pub fn name_of(&self, id: AttributeId) -> Option<&str> {
        let idx = usize::try_from(id).ok()?.checked_sub(1)?;
        self.names.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Sorted values, in ID order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterates `(id, value)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx as AttributeId + 1, name.as_str()))
    }
}
