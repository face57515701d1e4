//! Shared data models for the Vox clip supplier.
//!
//! This crate provides Serde-serializable types for:
//! - Catalog clip records
//! - Client-facing clip descriptors

pub mod clip;

pub use clip::{strip_media_suffix, ClipDescriptor, ClipId, ClipIdError, ClipRecord, SentenceRef};
