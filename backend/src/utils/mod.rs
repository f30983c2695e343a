//! Collection of small, reusable helpers.
//!
//! This module holds the cryptographic utilities that do not belong to a
//! specific domain module: bearer token handling and password hashing.

pub mod jwt;
pub mod password;
