//! Coarse Visio document parsing.
//!
//! `.vsdx` files are Open Packaging ZIP containers; the parser walks the
//! `visio/pages/page{N}.xml` parts and collects every `Shape` element (nested
//! shapes included, document order) with its text and pin geometry. `.vsd`
//! files are OLE compound documents; only the signature is verified and a
//! placeholder page is produced, since legacy stream parsing is out of scope.
//!
//! Container-level problems are typed errors - a malformed archive or a bad
//! OLE signature never degrades into an empty document.

use std::io::{Cursor, Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::ParseError;
use crate::model::{DocumentFormat, Geometry, Page, Shape, VisioDocument};

/// OLE compound document signature, the first 8 bytes of every `.vsd` file.
const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const PAGES_PART: &str = "visio/pages/pages.xml";

/// Parser capability: raw bytes plus a format hint in, structural model out.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, data: &[u8], format: DocumentFormat) -> Result<VisioDocument, ParseError>;
}

/// The bundled coarse parser for both Visio formats.
#[derive(Debug, Default, Clone)]
pub struct VisioParser;

impl VisioParser {
    pub fn new() -> Self {
        VisioParser
    }

    fn parse_vsd(&self, data: &[u8]) -> Result<VisioDocument, ParseError> {
        if data.len() < OLE_SIGNATURE.len() || data[..OLE_SIGNATURE.len()] != OLE_SIGNATURE {
            return Err(ParseError::InvalidOleSignature);
        }

        Ok(VisioDocument {
            format: DocumentFormat::Vsd,
            pages: vec![Page::default_page()],
        })
    }

    fn parse_vsdx(&self, data: &[u8]) -> Result<VisioDocument, ParseError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| ParseError::BadArchive(e.to_string()))?;

        let mut page_parts: Vec<(u32, String)> =
            archive.file_names().filter_map(page_part_index).collect();
        page_parts.sort_by_key(|(index, _)| *index);

        let page_names = read_page_names(&mut archive);

        let mut pages = Vec::with_capacity(page_parts.len());
        for (i, (_, part)) in page_parts.iter().enumerate() {
            let xml = read_part(&mut archive, part)?;
            let shapes = parse_page_xml(part, &xml)?;
            let name = page_names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Page-{}", i + 1));

            tracing::debug!(part = %part, page = %name, shapes = shapes.len(), "Parsed page part");

            pages.push(Page {
                id: format!("page{}", i + 1),
                name,
                shapes,
            });
        }

        if pages.is_empty() {
            pages.push(Page::default_page());
        }

        Ok(VisioDocument {
            format: DocumentFormat::Vsdx,
            pages,
        })
    }
}

impl DocumentParser for VisioParser {
    fn parse(&self, data: &[u8], format: DocumentFormat) -> Result<VisioDocument, ParseError> {
        match format {
            DocumentFormat::Vsd => self.parse_vsd(data),
            DocumentFormat::Vsdx => self.parse_vsdx(data),
        }
    }
}

/// Match `visio/pages/page{N}.xml` parts, returning the page index.
///
/// The index must be numeric, which keeps the page table (`pages.xml`) from
/// being mistaken for a page part.
fn page_part_index(name: &str) -> Option<(u32, String)> {
    let stem = name
        .strip_prefix("visio/pages/page")?
        .strip_suffix(".xml")?;
    let index = stem.parse::<u32>().ok()?;
    Some((index, name.to_string()))
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    part: &str,
) -> Result<String, ParseError> {
    let mut file = archive
        .by_name(part)
        .map_err(|e| ParseError::BadArchive(e.to_string()))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Page display names from the page table, in document order.
///
/// Names are cosmetic; a missing or unreadable table falls back to
/// positional `Page-{N}` names.
fn read_page_names<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Vec<String> {
    let Ok(xml) = read_part(archive, PAGES_PART) else {
        return Vec::new();
    };

    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);

    let mut names = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Page" => {
                let mut name = None;
                let mut name_universal = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Name" => name = attr.unescape_value().ok().map(|v| v.into_owned()),
                        b"NameU" => {
                            name_universal = attr.unescape_value().ok().map(|v| v.into_owned())
                        }
                        _ => {}
                    }
                }
                names.push(
                    name.or(name_universal)
                        .unwrap_or_else(|| format!("Page-{}", names.len() + 1)),
                );
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }
    names
}

/// Single streaming pass over one page part, collecting every `Shape`
/// element in document order. A stack of open shapes routes text and cell
/// values to the innermost shape, so groups nest correctly.
fn parse_page_xml(part: &str, xml: &str) -> Result<Vec<Shape>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut shapes: Vec<Shape> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut in_text = false;
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"Shape" => {
                    shapes.push(shape_from_attrs(&e, shapes.len()));
                    open.push(shapes.len() - 1);
                }
                b"Text" if !open.is_empty() => {
                    in_text = true;
                    text_buf.clear();
                }
                b"Cell" => apply_cell(&e, &mut shapes, &open),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"Shape" => shapes.push(shape_from_attrs(&e, shapes.len())),
                b"Cell" => apply_cell(&e, &mut shapes, &open),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                if let Ok(fragment) = t.unescape() {
                    text_buf.push_str(&fragment);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"Shape" => {
                    open.pop();
                }
                b"Text" if in_text => {
                    in_text = false;
                    if let Some(&index) = open.last() {
                        let text = text_buf.trim();
                        if !text.is_empty() {
                            shapes[index].text = Some(text.to_string());
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(source) => {
                return Err(ParseError::MalformedXml {
                    part: part.to_string(),
                    source,
                })
            }
        }
    }

    Ok(shapes)
}

fn shape_from_attrs(element: &BytesStart<'_>, ordinal: usize) -> Shape {
    let mut id = None;
    let mut shape_type = None;
    for attr in element.attributes().flatten() {
        match attr.key.as_ref() {
            b"ID" => id = attr.unescape_value().ok().map(|v| v.into_owned()),
            b"Type" => shape_type = attr.unescape_value().ok().map(|v| v.to_lowercase()),
            _ => {}
        }
    }

    Shape {
        id: id
            .map(|v| format!("shape{v}"))
            .unwrap_or_else(|| format!("shape{}", ordinal + 1)),
        shape_type: shape_type.unwrap_or_else(|| "shape".to_string()),
        text: None,
        geometry: Geometry::default(),
    }
}

/// Apply a `<Cell N=... V=...>` value to the innermost open shape.
fn apply_cell(element: &BytesStart<'_>, shapes: &mut [Shape], open: &[usize]) {
    let Some(&index) = open.last() else {
        return;
    };

    let mut name = None;
    let mut value = None;
    for attr in element.attributes().flatten() {
        match attr.key.as_ref() {
            b"N" => name = attr.unescape_value().ok().map(|v| v.into_owned()),
            b"V" => value = attr.unescape_value().ok().and_then(|v| v.parse::<f64>().ok()),
            _ => {}
        }
    }

    let (Some(name), Some(value)) = (name, value) else {
        return;
    };

    let geometry = &mut shapes[index].geometry;
    match name.as_str() {
        "PinX" => geometry.x = value,
        "PinY" => geometry.y = value,
        "Width" => geometry.width = value,
        "Height" => geometry.height = value,
        _ => {}
    }
}
