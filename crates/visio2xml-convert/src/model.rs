//! Structural document model.
//!
//! Format-agnostic representation of the coarse structure extracted from a
//! Visio file: pages, shapes, and basic geometry. This is the contract
//! between the parser and the renderer.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Source document format, derived from the stored file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Legacy OLE compound document (`.vsd`).
    Vsd,
    /// ZIP-based Open Packaging container (`.vsdx`).
    Vsdx,
}

impl DocumentFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "vsd" => Some(DocumentFormat::Vsd),
            "vsdx" => Some(DocumentFormat::Vsdx),
            _ => None,
        }
    }

    /// Human-readable format label used in artifact metadata.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentFormat::Vsd => "Microsoft Visio Drawing (.vsd)",
            DocumentFormat::Vsdx => "Microsoft Visio Drawing (.vsdx)",
        }
    }
}

impl Display for DocumentFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentFormat::Vsd => write!(f, "vsd"),
            DocumentFormat::Vsdx => write!(f, "vsdx"),
        }
    }
}

/// Pin position and extent of a shape, in the drawing's units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct Shape {
    pub id: String,
    pub shape_type: String,
    pub text: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub shapes: Vec<Shape>,
}

impl Page {
    /// Placeholder page used when a document carries no page parts.
    pub fn default_page() -> Self {
        Page {
            id: "page1".to_string(),
            name: "Page-1".to_string(),
            shapes: Vec::new(),
        }
    }
}

/// The coarse structural model of a parsed Visio document.
#[derive(Debug, Clone)]
pub struct VisioDocument {
    pub format: DocumentFormat,
    pub pages: Vec<Page>,
}

impl VisioDocument {
    /// Total number of shapes across all pages.
    pub fn shape_count(&self) -> usize {
        self.pages.iter().map(|p| p.shapes.len()).sum()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
