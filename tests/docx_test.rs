//! Integration tests for the Word output.

use std::io::{Cursor, Read};

use mdexport::render::docx::{build_flow, to_docx, FlowNode, FlowRun};
use mdexport::ExportOptions;
use zip::ZipArchive;

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

fn document_xml(md: &str) -> String {
    let result = to_docx(md, &ExportOptions::default()).unwrap();
    read_part(&result.bytes, "word/document.xml")
}

#[test]
fn test_package_parts() {
    let result = to_docx("# T", &ExportOptions::default()).unwrap();
    let archive = ZipArchive::new(Cursor::new(&result.bytes)).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
    ] {
        assert!(names.contains(&part), "missing {}", part);
    }
}

#[test]
fn test_heading_and_paragraph_scenario() {
    let doc = build_flow("# Title\nHello world", &ExportOptions::default()).unwrap();
    assert_eq!(doc.heading_count(), 1);
    assert_eq!(doc.table_count(), 0);
    assert_eq!(doc.nodes.len(), 2);

    let xml = document_xml("# Title\nHello world");
    assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(xml.contains("Hello world"));
    assert!(!xml.contains("<w:tbl>"));
}

#[test]
fn test_heading_levels_clamped_to_three() {
    let xml = document_xml("# One\n## Two\n### Three\n#### Four");
    assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
    assert_eq!(xml.matches(r#"<w:pStyle w:val="Heading3"/>"#).count(), 2);
    assert!(!xml.contains("Heading4"));
}

#[test]
fn test_single_hyperlink_scenario() {
    let result = to_docx("[Buy](http://shop.test/x)", &ExportOptions::default()).unwrap();
    let xml = read_part(&result.bytes, "word/document.xml");
    assert_eq!(xml.matches("<w:hyperlink ").count(), 1);

    let rels = read_part(&result.bytes, "word/_rels/document.xml.rels");
    assert!(rels.contains(r#"Target="http://shop.test/x""#));
    assert!(rels.contains(r#"TargetMode="External""#));
}

#[test]
fn test_table_header_shaded_and_blank_after() {
    let md = "| A | B |\n| --- | --- |\n| 1 | 2 |\n| 3 | 4 |\nafter";
    let doc = build_flow(md, &ExportOptions::default()).unwrap();
    assert!(matches!(doc.nodes[0], FlowNode::Table(_)));
    assert_eq!(doc.nodes[1], FlowNode::Blank);

    let xml = document_xml(md);
    assert_eq!(xml.matches("<w:tr>").count(), 3);
    assert_eq!(xml.matches(r#"w:fill="D9D9D9""#).count(), 2);
    assert_eq!(xml.matches("<w:tblHeader/>").count(), 1);
    assert!(xml.contains("<w:p/>"));
}

#[test]
fn test_equal_width_per_row() {
    let doc = build_flow("| A | B | C | D |\n| 1 | 2 |", &ExportOptions::default()).unwrap();
    let FlowNode::Table(table) = &doc.nodes[0] else {
        panic!("expected a table");
    };
    for row in &table.rows {
        assert!(row.cells.iter().all(|c| c.width == 1250));
    }
}

#[test]
fn test_short_row_padded_not_shifted() {
    let doc = build_flow("| A | B | C |\n| 1 | 2 |", &ExportOptions::default()).unwrap();
    let FlowNode::Table(table) = &doc.nodes[0] else {
        panic!("expected a table");
    };
    let body = &table.rows[1];
    assert_eq!(body.cells.len(), 3);
    assert_eq!(
        body.cells[0].runs,
        vec![FlowRun::Text { text: "1".into() }]
    );
    assert!(body.cells[2].runs.is_empty());
}

#[test]
fn test_whole_cell_link_in_table() {
    let result = to_docx(
        "| Item | Link |\n| Shoe | [Buy](http://shop.test/x) |",
        &ExportOptions::default(),
    )
    .unwrap();
    let xml = read_part(&result.bytes, "word/document.xml");
    assert_eq!(xml.matches("<w:hyperlink ").count(), 1);
    assert_eq!(result.stats.link_count, 1);
}

#[test]
fn test_output_is_idempotent() {
    let md = "# R\n[a](http://a) and [b](http://b)\n| X |\n| [c](http://c) |";
    let a = to_docx(md, &ExportOptions::default()).unwrap();
    let b = to_docx(md, &ExportOptions::default()).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn test_text_is_escaped() {
    let xml = document_xml("Tom & Jerry <3");
    assert!(xml.contains("Tom &amp; Jerry &lt;3"));
}

fn assert_well_formed(xml: &str) {
    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(quick_xml::events::Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed xml at {}: {}", reader.buffer_position(), e),
        }
    }
    for c in xml.chars() {
        assert!(
            c >= '\u{20}' || matches!(c, '\t' | '\n' | '\r'),
            "illegal character {:?}",
            c
        );
    }
}

#[test]
fn test_control_characters_stay_well_formed() {
    let md = "Total\u{0008} due\n| A |\n| x\u{0001}y |\n[pay\u{001b}](http://pay.test/\u{0007}now)";
    let result = to_docx(md, &ExportOptions::default()).unwrap();
    let xml = read_part(&result.bytes, "word/document.xml");
    let rels = read_part(&result.bytes, "word/_rels/document.xml.rels");
    assert_well_formed(&xml);
    assert_well_formed(&rels);
    assert!(xml.contains("Total due"));
    assert!(xml.contains(">xy<"));
    assert!(rels.contains(r#"Target="http://pay.test/now""#));
}
