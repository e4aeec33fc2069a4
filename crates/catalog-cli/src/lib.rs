//! Library side of the catalog normalizer CLI.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod recipes;
