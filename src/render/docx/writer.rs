//! OOXML packaging of a [`FlowDocument`].
//!
//! The package holds the minimum set of parts Word needs: content types,
//! package relationships, the main document, its relationships (styles and
//! external hyperlinks) and a style sheet. No document properties are
//! written, so the archive bytes depend only on the tree.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

use super::node::{FlowDocument, FlowNode, FlowRow, FlowRun, FULL_WIDTH_PCT};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Header row background.
const HEADER_FILL: &str = "D9D9D9";

/// Page margin in twips (1 inch).
const PAGE_MARGIN: u32 = 1440;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="264" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:pBdr><w:bottom w:val="single" w:sz="6" w:space="4" w:color="999999"/></w:pBdr><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:sz w:val="36"/><w:szCs w:val="36"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="200" w:after="100"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="160" w:after="80"/><w:outlineLvl w:val="2"/></w:pPr><w:rPr><w:b/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr></w:style><w:style w:type="character" w:styleId="Hyperlink"><w:name w:val="Hyperlink"/><w:rPr><w:color w:val="0563C1"/><w:u w:val="single"/></w:rPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="999999"/><w:left w:val="single" w:sz="4" w:space="0" w:color="999999"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="999999"/><w:right w:val="single" w:sz="4" w:space="0" w:color="999999"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="999999"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="999999"/></w:tblBorders><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style></w:styles>"#;

/// Package `doc` as `.docx` bytes.
pub fn write_docx(doc: &FlowDocument) -> Result<Vec<u8>> {
    let mut links = HyperlinkRels::default();
    let document = document_xml(doc, &mut links)?;
    let document_rels = document_rels_xml(&links)?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/document.xml", document.as_slice()),
        ("word/_rels/document.xml.rels", document_rels.as_slice()),
        ("word/styles.xml", STYLES.as_bytes()),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(data)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Relationship ids of external hyperlinks, one per distinct URL.
#[derive(Debug, Default)]
struct HyperlinkRels {
    ids: HashMap<String, String>,
    order: Vec<(String, String)>,
}

impl HyperlinkRels {
    /// rId1 is the style sheet.
    const FIRST_ID: usize = 2;

    fn id_for(&mut self, url: &str) -> String {
        if let Some(id) = self.ids.get(url) {
            return id.clone();
        }
        let id = format!("rId{}", self.order.len() + Self::FIRST_ID);
        self.ids.insert(url.to_string(), id.clone());
        self.order.push((id.clone(), url.to_string()));
        id
    }
}

/// Thin wrapper mapping quick-xml failures into [`Error::Xml`].
struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new() -> Result<Self> {
        let mut writer = Self {
            inner: Writer::new(Vec::new()),
        };
        writer.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(writer)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.event(Event::Start(element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.event(Event::Empty(element(name, attrs)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(&xml_safe(text))))
    }

    fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        start.push_attribute((*key, xml_safe(value).as_ref()));
    }
    start
}

/// Drops characters XML 1.0 cannot carry. quick-xml escapes markup but
/// passes control characters through, which Word rejects as corrupt.
fn xml_safe(text: &str) -> Cow<'_, str> {
    fn legal(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{fffe}' && c != '\u{ffff}')
    }
    if text.chars().all(legal) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| legal(c)).collect())
    }
}

fn document_xml(doc: &FlowDocument, links: &mut HyperlinkRels) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("w:document", &[("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)])?;
    w.start("w:body", &[])?;

    if !doc.title.is_empty() {
        let title = [FlowRun::Text {
            text: doc.title.clone(),
        }];
        write_paragraph(&mut w, Some("Title"), &title, false, links)?;
    }

    let (page_width, page_height) = doc.page_size.twips();
    let content_width = page_width.saturating_sub(2 * PAGE_MARGIN);

    for node in &doc.nodes {
        match node {
            FlowNode::Heading { level, runs } => {
                let style = format!("Heading{}", level);
                write_paragraph(&mut w, Some(style.as_str()), runs, false, links)?;
            }
            FlowNode::Paragraph { runs } => {
                write_paragraph(&mut w, None, runs, false, links)?;
            }
            FlowNode::Table(table) => {
                let columns = table.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
                if columns == 0 {
                    continue;
                }
                write_table_start(&mut w, columns, content_width)?;
                for row in &table.rows {
                    write_row(&mut w, row, links)?;
                }
                w.end("w:tbl")?;
            }
            FlowNode::Blank => w.empty("w:p", &[])?,
        }
    }

    let width = page_width.to_string();
    let height = page_height.to_string();
    let margin = PAGE_MARGIN.to_string();
    w.start("w:sectPr", &[])?;
    w.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    w.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    w.end("w:sectPr")?;

    w.end("w:body")?;
    w.end("w:document")?;
    Ok(w.into_bytes())
}

fn write_paragraph(
    w: &mut XmlWriter,
    style: Option<&str>,
    runs: &[FlowRun],
    bold: bool,
    links: &mut HyperlinkRels,
) -> Result<()> {
    w.start("w:p", &[])?;
    if let Some(style) = style {
        w.start("w:pPr", &[])?;
        w.empty("w:pStyle", &[("w:val", style)])?;
        w.end("w:pPr")?;
    }

    for run in runs {
        match run {
            FlowRun::Text { text } => write_run(w, text, bold, None)?,
            FlowRun::Hyperlink { text, url } => {
                let id = links.id_for(url);
                w.start("w:hyperlink", &[("r:id", id.as_str()), ("w:history", "1")])?;
                write_run(w, text, bold, Some("Hyperlink"))?;
                w.end("w:hyperlink")?;
            }
        }
    }

    w.end("w:p")
}

fn write_run(w: &mut XmlWriter, text: &str, bold: bool, char_style: Option<&str>) -> Result<()> {
    w.start("w:r", &[])?;
    if bold || char_style.is_some() {
        w.start("w:rPr", &[])?;
        if let Some(style) = char_style {
            w.empty("w:rStyle", &[("w:val", style)])?;
        }
        if bold {
            w.empty("w:b", &[])?;
        }
        w.end("w:rPr")?;
    }
    w.start("w:t", &[("xml:space", "preserve")])?;
    w.text(text)?;
    w.end("w:t")?;
    w.end("w:r")
}

fn write_table_start(w: &mut XmlWriter, columns: usize, content_width: u32) -> Result<()> {
    let full = FULL_WIDTH_PCT.to_string();
    w.start("w:tbl", &[])?;
    w.start("w:tblPr", &[])?;
    w.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
    w.empty("w:tblW", &[("w:w", full.as_str()), ("w:type", "pct")])?;
    w.end("w:tblPr")?;

    let grid = (content_width / columns as u32).to_string();
    w.start("w:tblGrid", &[])?;
    for _ in 0..columns {
        w.empty("w:gridCol", &[("w:w", grid.as_str())])?;
    }
    w.end("w:tblGrid")
}

fn write_row(w: &mut XmlWriter, row: &FlowRow, links: &mut HyperlinkRels) -> Result<()> {
    w.start("w:tr", &[])?;
    if row.header {
        w.start("w:trPr", &[])?;
        w.empty("w:tblHeader", &[])?;
        w.end("w:trPr")?;
    }

    for cell in &row.cells {
        let width = cell.width.to_string();
        w.start("w:tc", &[])?;
        w.start("w:tcPr", &[])?;
        w.empty("w:tcW", &[("w:w", width.as_str()), ("w:type", "pct")])?;
        if row.header {
            w.empty(
                "w:shd",
                &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", HEADER_FILL)],
            )?;
        }
        w.end("w:tcPr")?;
        write_paragraph(w, None, &cell.runs, row.header, links)?;
        w.end("w:tc")?;
    }

    w.end("w:tr")
}

fn document_rels_xml(links: &HyperlinkRels) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("Relationships", &[("xmlns", NS_PACKAGE_REL)])?;
    w.empty(
        "Relationship",
        &[("Id", "rId1"), ("Type", REL_STYLES), ("Target", "styles.xml")],
    )?;
    for (id, url) in &links.order {
        w.empty(
            "Relationship",
            &[
                ("Id", id.as_str()),
                ("Type", REL_HYPERLINK),
                ("Target", url.as_str()),
                ("TargetMode", "External"),
            ],
        )?;
    }
    w.end("Relationships")?;
    Ok(w.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PageSize;
    use std::io::Read;

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    fn sample() -> FlowDocument {
        let mut doc = FlowDocument::new("Report", PageSize::A4);
        doc.nodes.push(FlowNode::Heading {
            level: 2,
            runs: vec![FlowRun::Text {
                text: "Prices & <stock>".into(),
            }],
        });
        doc.nodes.push(FlowNode::Paragraph {
            runs: vec![
                FlowRun::Hyperlink {
                    text: "Buy".into(),
                    url: "http://shop.test/x?a=1&b=2".into(),
                },
                FlowRun::Hyperlink {
                    text: "Again".into(),
                    url: "http://shop.test/x?a=1&b=2".into(),
                },
            ],
        });
        doc
    }

    #[test]
    fn test_package_parts() {
        let bytes = write_docx(&sample()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = part(&write_docx(&sample()).unwrap(), "word/document.xml");
        assert!(xml.contains("Prices &amp; &lt;stock&gt;"));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
    }

    #[test]
    fn test_same_url_shares_relationship() {
        let bytes = write_docx(&sample()).unwrap();
        let rels = part(&bytes, "word/_rels/document.xml.rels");
        assert_eq!(rels.matches("TargetMode=\"External\"").count(), 1);
        let xml = part(&bytes, "word/document.xml");
        assert_eq!(xml.matches(r#"<w:hyperlink r:id="rId2""#).count(), 2);
    }

    #[test]
    fn test_control_characters_are_dropped() {
        assert_eq!(xml_safe("a\u{0008}b\tc\u{ffff}"), "ab\tc");
        assert!(matches!(xml_safe("plain text"), Cow::Borrowed(_)));

        let mut doc = FlowDocument::new("Bad\u{0001}Title", PageSize::A4);
        doc.nodes.push(FlowNode::Paragraph {
            runs: vec![FlowRun::Hyperlink {
                text: "go\u{001b}".into(),
                url: "http://x.test/\u{0007}p".into(),
            }],
        });
        let bytes = write_docx(&doc).unwrap();
        let xml = part(&bytes, "word/document.xml");
        let rels = part(&bytes, "word/_rels/document.xml.rels");
        assert!(xml.contains("BadTitle"));
        assert!(xml.contains(">go<"));
        assert!(rels.contains(r#"Target="http://x.test/p""#));
        for c in xml.chars().chain(rels.chars()) {
            assert!(c >= ' ' || matches!(c, '\t' | '\n' | '\r'), "{:?}", c);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(write_docx(&sample()).unwrap(), write_docx(&sample()).unwrap());
    }
}
