//! Normalization of cleaned catalog frames.
//!
//! - **extract**: split delimited attribute cells into token lists
//! - **keys**: dense, order-independent surrogate keys per domain
//! - **junction**: item-to-value edge lists
//! - **wide**: wide-to-long reshaping of the tag vote matrix
//! - **frames**: DataFrame builders for the normalized tables
//! - **normalize**: the whole stage over one catalog and its tag matrix

mod error;
pub mod extract;
pub mod frames;
pub mod junction;
pub mod keys;
mod normalize;
pub mod wide;

pub use error::{Result, TransformError};
pub use extract::{extract_tokens, item_ids, split_tokens};
pub use frames::{VOTE_COLUMN, VOTE_TABLE, junction_frame, lookup_frame, vote_frame};
pub use junction::build_junction;
pub use keys::{assign_keys, distinct_tokens, merge_domains};
pub use normalize::{NormalizeOptions, Normalized, normalize};
pub use wide::{LongCell, melt_wide, resolve_votes, wide_attribute_names};
