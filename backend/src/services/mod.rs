//! Module for core business logic services.
//!
//! This module encapsulates the services that perform domain operations and
//! orchestrate the repositories, keeping HTTP handlers thin.

pub mod film_service;
