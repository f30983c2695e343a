//! API module grouping the HTTP surface by domain.

pub mod common;
pub mod films;
