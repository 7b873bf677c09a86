//! Fixture builders: in-memory VSDX archives and OLE-signature VSD stubs.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;

/// OLE compound document signature (`.vsd` magic bytes).
const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Build a VSDX container with the given `(page_name, shape_count)` pages.
///
/// Each shape gets an id, pin geometry, and a text label, so conversions
/// exercise the full shape extraction path.
pub fn build_vsdx(pages: &[(&str, usize)]) -> Vec<u8> {
    let mut parts: Vec<(String, String)> = Vec::new();

    let mut table = String::from("<?xml version=\"1.0\"?>\n<Pages>\n");
    for (i, (name, shape_count)) in pages.iter().enumerate() {
        table.push_str(&format!("  <Page ID=\"{}\" Name=\"{}\"/>\n", i, name));

        let mut page = String::from("<?xml version=\"1.0\"?>\n<PageContents>\n  <Shapes>\n");
        for j in 0..*shape_count {
            page.push_str(&format!(
                concat!(
                    "    <Shape ID=\"{id}\" Type=\"Shape\">\n",
                    "      <Cell N=\"PinX\" V=\"{x}\"/>\n",
                    "      <Cell N=\"PinY\" V=\"1.5\"/>\n",
                    "      <Cell N=\"Width\" V=\"2\"/>\n",
                    "      <Cell N=\"Height\" V=\"1\"/>\n",
                    "      <Text>Step {id}</Text>\n",
                    "    </Shape>\n",
                ),
                id = j + 1,
                x = j + 1,
            ));
        }
        page.push_str("  </Shapes>\n</PageContents>\n");

        parts.push((format!("visio/pages/page{}.xml", i + 1), page));
    }
    table.push_str("</Pages>\n");
    parts.push(("visio/pages/pages.xml".to_string(), table));

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for (name, content) in &parts {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A small valid `.vsd`: the OLE signature plus padding.
pub fn build_vsd() -> Vec<u8> {
    let mut data = OLE_SIGNATURE.to_vec();
    data.extend_from_slice(&[0u8; 512]);
    data
}

/// Bytes that are not a ZIP archive - passes upload validation as `.vsdx`,
/// fails at parse time.
pub fn not_a_zip() -> Vec<u8> {
    b"this is definitely not a zip archive".to_vec()
}
