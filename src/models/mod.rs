//! Data models representing database entities.

/// Classified ad model
pub mod ad;
