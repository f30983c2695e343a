//! Authentication module for managing accounts and access control.
//!
//! This module provides the public interface for account-related
//! functionality such as registration, login, token issuance, and the
//! authorization middleware protecting mutating routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
