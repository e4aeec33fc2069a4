//! Record cleaning for raw catalog sources.
//!
//! The [`Cleaner`] wraps one working copy of a source DataFrame together with
//! an [`AuditLog`](catalog_model::AuditLog). Every operation consumes the
//! cleaner and returns a new one, so a cleaning recipe reads as a chain:
//!
//! ```ignore
//! use catalog_clean::Cleaner;
//!
//! let (frame, log) = Cleaner::new(&raw)
//!     .standardize_columns()?
//!     .drop_duplicates()?
//!     .fill_missing(["name", "developer"])?
//!     .coerce_numeric(["price"])?
//!     .coerce_datetime(["release_date"])?
//!     .finish();
//! ```
//!
//! The same operations are available as free functions in [`ops`], each
//! taking a DataFrame snapshot and returning a [`Step`] with the new frame
//! and the audit entries it produced.
//!
//! Operations never fail on malformed cells: unparseable numbers become `0`,
//! unparseable dates become null, and both are counted in the log. Absent
//! columns are skipped unless [`CleanOptions::strict`] is set.

mod datetime;
mod engine;
mod error;
mod markup;
pub mod ops;

pub use datetime::parse_date;
pub use engine::{CleanOptions, Cleaner, DEFAULT_FILL_VALUE};
pub use error::{CleanError, Result};
pub use markup::strip_markup_text;
pub use ops::Step;
