pub mod file_entry;
pub mod responses;

pub use file_entry::{FileEntry, FileStatus};
pub use responses::{
    ConversionResponse, DeleteResponse, FileListResponse, StatusResponse, UploadResponse,
};
