//! Storage collaborators used by the request handlers.

/// Record-store operations for ads
pub mod ads;
/// Blob store for uploaded images
pub mod images;
