//! Destination stores for assembled tables.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use crate::assemble::OutputTables;
use crate::error::Result;

/// A destination that replaces named tables.
///
/// `replace_tables` is all-or-nothing: either every table in the set replaces
/// its same-named predecessor, or the store is left as it was.
pub trait TableStore {
    fn replace_tables(&mut self, tables: &OutputTables) -> Result<()>;
}

/// Store that keeps tables in memory. Used by dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, DataFrame>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.tables.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableStore for MemoryStore {
    fn replace_tables(&mut self, tables: &OutputTables) -> Result<()> {
        for (name, frame) in tables.iter() {
            self.tables.insert(name.to_string(), frame.clone());
        }
        Ok(())
    }
}
