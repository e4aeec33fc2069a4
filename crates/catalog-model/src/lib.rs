//! Data model for the catalog normalization pipeline.
//!
//! - **domain**: the multi-valued attribute domains and their table naming
//! - **lookup**: dense surrogate-key tables for one domain
//! - **records**: junction edges and vote facts
//! - **audit**: the append-only cleaning audit log

pub mod audit;
pub mod domain;
pub mod lookup;
pub mod records;

pub use audit::{AuditEntry, AuditLog, CleanAction};
pub use domain::AttributeDomain;
pub use lookup::Lookup;
pub use records::{AttributeId, ItemId, JunctionEntry, VoteFact};
