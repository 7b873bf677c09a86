//! Shared key generation for storage backends.
//!
//! Raw uploads are keyed `{id}.{ext}` under the uploads root; artifacts are
//! keyed `{id}.xml` under the outputs root.

use uuid::Uuid;

/// Key for a raw upload: `{id}.{ext}`.
pub fn upload_key(id: Uuid, extension: &str) -> String {
    format!("{}.{}", id, extension.to_lowercase())
}

/// Key for a converted artifact: `{id}.xml`.
pub fn artifact_key(id: Uuid) -> String {
    format!("{}.xml", id)
}
