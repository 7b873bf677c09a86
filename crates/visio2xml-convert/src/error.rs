use thiserror::Error;

/// Errors from parsing a Visio document.
///
/// Malformed containers are typed failures; the parser never falls back to a
/// default document for input it cannot read.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("not an OLE compound document")]
    InvalidOleSignature,

    #[error("invalid VSDX archive: {0}")]
    BadArchive(String),

    #[error("malformed page XML in {part}: {source}")]
    MalformedXml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from rendering the XML artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("rendered artifact is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
