//! OpenAPI document assembly.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use visio2xml_core::models::{
    ConversionResponse, DeleteResponse, FileEntry, FileListResponse, FileStatus, StatusResponse,
    UploadResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visio to XML Converter API",
        description = "Convert Microsoft Visio files to XML format"
    ),
    paths(
        crate::handlers::upload::upload_file,
        crate::handlers::files::list_files,
        crate::handlers::files::delete_file,
        crate::handlers::convert::start_conversion,
        crate::handlers::convert::conversion_status,
        crate::handlers::download::download_file
    ),
    components(schemas(
        FileEntry,
        FileStatus,
        UploadResponse,
        ConversionResponse,
        StatusResponse,
        FileListResponse,
        DeleteResponse,
        ErrorResponse
    )),
    tags(
        (name = "upload", description = "File upload"),
        (name = "files", description = "Registry listing and deletion"),
        (name = "convert", description = "Conversion lifecycle"),
        (name = "download", description = "Artifact retrieval")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
