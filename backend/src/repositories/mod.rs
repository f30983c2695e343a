//! Data access layer for the document store.

pub mod document_repository;
