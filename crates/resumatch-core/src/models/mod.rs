//! Data models for documents, extracted records, and job profiles.

pub mod config;
pub mod document;
pub mod profile;
pub mod record;
