//! XML artifact rendering
//!
//! Serializes a [`VisioDocument`] into the normalized artifact format: a
//! `VisioDocument` root with metadata, pages/shapes, and processing-info
//! blocks, indented two spaces with no blank lines. All text and attribute
//! values go through the writer's escaping, so the output is well-formed for
//! any input strings.

use std::io::Cursor;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::RenderError;
use crate::model::VisioDocument;

/// Artifact schema namespace.
pub const SCHEMA_NAMESPACE: &str = "http://visio-converter.com/schema/2025";

/// Renderer capability: structural model in, XML artifact string out.
///
/// Deterministic given identical input; the generation timestamp is an input,
/// not ambient state.
pub trait XmlRenderer: Send + Sync {
    fn render(
        &self,
        document: &VisioDocument,
        original_filename: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<String, RenderError>;
}

/// The bundled artifact renderer.
#[derive(Debug, Default, Clone)]
pub struct VisioXmlRenderer;

impl VisioXmlRenderer {
    pub fn new() -> Self {
        VisioXmlRenderer
    }
}

impl XmlRenderer for VisioXmlRenderer {
    fn render(
        &self,
        document: &VisioDocument,
        original_filename: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new("VisioDocument");
        root.push_attribute(("xmlns", SCHEMA_NAMESPACE));
        root.push_attribute(("version", "1.0"));
        root.push_attribute(("generated", timestamp.as_str()));
        writer.write_event(Event::Start(root))?;

        // Metadata
        writer.write_event(Event::Start(BytesStart::new("Metadata")))?;
        write_simple_element(&mut writer, "OriginalFilename", original_filename)?;
        write_simple_element(&mut writer, "OriginalFormat", document.format.label())?;
        write_simple_element(&mut writer, "ConvertedFormat", "XML")?;
        write_simple_element(&mut writer, "ConversionTime", &timestamp)?;
        writer.write_event(Event::End(BytesEnd::new("Metadata")))?;

        // Pages
        let mut pages_elem = BytesStart::new("Pages");
        pages_elem.push_attribute(("count", document.page_count().to_string().as_str()));
        if document.pages.is_empty() {
            writer.write_event(Event::Empty(pages_elem))?;
        } else {
            writer.write_event(Event::Start(pages_elem))?;
            for page in &document.pages {
                let mut page_elem = BytesStart::new("Page");
                page_elem.push_attribute(("id", page.id.as_str()));
                page_elem.push_attribute(("name", page.name.as_str()));
                writer.write_event(Event::Start(page_elem))?;

                let mut shapes_elem = BytesStart::new("Shapes");
                shapes_elem.push_attribute(("count", page.shapes.len().to_string().as_str()));
                if page.shapes.is_empty() {
                    writer.write_event(Event::Empty(shapes_elem))?;
                } else {
                    writer.write_event(Event::Start(shapes_elem))?;
                    for shape in &page.shapes {
                        let mut shape_elem = BytesStart::new("Shape");
                        shape_elem.push_attribute(("id", shape.id.as_str()));
                        shape_elem.push_attribute(("type", shape.shape_type.as_str()));
                        writer.write_event(Event::Start(shape_elem))?;

                        if let Some(ref text) = shape.text {
                            write_simple_element(&mut writer, "Text", text)?;
                        }

                        let mut geometry_elem = BytesStart::new("Geometry");
                        geometry_elem.push_attribute(("x", format_number(shape.geometry.x).as_str()));
                        geometry_elem.push_attribute(("y", format_number(shape.geometry.y).as_str()));
                        geometry_elem
                            .push_attribute(("width", format_number(shape.geometry.width).as_str()));
                        geometry_elem
                            .push_attribute(("height", format_number(shape.geometry.height).as_str()));
                        writer.write_event(Event::Empty(geometry_elem))?;

                        writer.write_event(Event::End(BytesEnd::new("Shape")))?;
                    }
                    writer.write_event(Event::End(BytesEnd::new("Shapes")))?;
                }

                writer.write_event(Event::End(BytesEnd::new("Page")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("Pages")))?;
        }

        // Processing information
        writer.write_event(Event::Start(BytesStart::new("ProcessingInfo")))?;
        write_simple_element(&mut writer, "Status", "completed")?;
        write_simple_element(&mut writer, "ShapeCount", &document.shape_count().to_string())?;
        write_simple_element(&mut writer, "PageCount", &document.page_count().to_string())?;
        writer.write_event(Event::End(BytesEnd::new("ProcessingInfo")))?;

        writer.write_event(Event::End(BytesEnd::new("VisioDocument")))?;

        let result = writer.into_inner().into_inner();
        Ok(String::from_utf8(result)?)
    }
}

fn write_simple_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Format coordinates the short way: whole numbers without a trailing `.0`.
fn format_number(value: f64) -> String {
    format!("{}", value)
}
