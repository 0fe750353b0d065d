//! Vupi Storage Library
//!
//! This crate provides the object store abstraction used to persist
//! submitted images, with implementations for Supabase Storage, S3-compatible
//! stores and the local filesystem.
//!
//! # Object names
//!
//! Every backend is bound to one bucket at construction time and addresses
//! objects by a flat name inside it (e.g. `{question_id}_1.png`). Names must
//! be non-empty and must not contain `..`, `\` or a leading `/`; validation
//! lives in the `keys` module so all backends agree.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
#[cfg(feature = "storage-supabase")]
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
#[cfg(feature = "storage-supabase")]
pub use supabase::SupabaseStorage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vupi_core::StorageBackend;
