//! visio2xml storage library
//!
//! Storage abstraction and the local filesystem implementation. The service
//! uses two independent stores: one rooted at the uploads directory for raw
//! uploads, one rooted at the outputs directory for converted artifacts. Keys
//! are flat filenames (`{id}.{ext}` / `{id}.xml`) namespaced by the file id,
//! so concurrent conversions never contend on the same key.
//!
//! Keys must not contain `..`, a leading `/`, or path separators. Key
//! generation is centralized in the `keys` module.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
