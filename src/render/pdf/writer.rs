//! Serialization of a laid-out [`Canvas`] with lopdf.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::Result;

use super::canvas::{Canvas, CanvasPage, DrawOp, LinkArea};
use super::metrics::{encode_win_ansi, unencodable_count};
use super::style::{FontFace, Rgb};

/// Value of the `Producer` entry in the document information dictionary.
pub const PRODUCER: &str = concat!("mdexport ", env!("CARGO_PKG_VERSION"));

const PDF_VERSION: &str = "1.5";

/// Serialize `canvas` into PDF bytes.
///
/// The output depends only on the canvas: no timestamps or random
/// identifiers are written, so equal canvases give equal bytes.
pub fn write_pdf(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(font_dictionary(FontFace::Regular));
    let bold = doc.add_object(font_dictionary(FontFace::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Regular.resource_name() => regular,
            FontFace::Bold.resource_name() => bold,
        },
    });

    let substituted: usize = canvas
        .pages()
        .iter()
        .flat_map(|page| page.texts())
        .map(unencodable_count)
        .sum();
    if substituted > 0 {
        log::warn!(
            "{} character(s) have no WinAnsi code and were drawn as '?'",
            substituted
        );
    }

    let mut kids: Vec<Object> = Vec::with_capacity(canvas.page_count());
    for page in canvas.pages() {
        let page_id = write_page(&mut doc, canvas, page, pages_id, resources_id)?;
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&canvas.title),
        "Producer" => text_string(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn font_dictionary(face: FontFace) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn write_page(
    doc: &mut Document,
    canvas: &Canvas,
    page: &CanvasPage,
    pages_id: ObjectId,
    resources_id: ObjectId,
) -> Result<ObjectId> {
    let content = Content {
        operations: page_operations(page, canvas.height),
    };
    let stream = Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        deflate(&content.encode()?)?,
    );
    let content_id = doc.add_object(stream);

    let annots: Vec<Object> = page
        .links
        .iter()
        .map(|link| doc.add_object(link_annotation(link, canvas.height)).into())
        .collect();

    let mut page_dict = dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => numbers(&[0.0, 0.0, canvas.width, canvas.height]),
        "Contents" => content_id,
        "Resources" => resources_id,
    };
    if !annots.is_empty() {
        page_dict.set("Annots", annots);
    }

    Ok(doc.add_object(page_dict))
}

fn page_operations(page: &CanvasPage, height: f32) -> Vec<Operation> {
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                face,
                size,
                color,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "Tf",
                    vec![face.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new("Td", vec![(*x).into(), (height - y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(stroke_color(*color));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (height - y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (height - y2).into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Rect {
                x,
                y,
                w,
                h,
                fill,
                stroke,
            } => {
                let paint = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    (None, Some(_)) => "S",
                    (None, None) => continue,
                };
                ops.push(Operation::new("q", vec![]));
                if let Some(color) = fill {
                    ops.push(fill_color(*color));
                }
                if let Some(color) = stroke {
                    ops.push(stroke_color(*color));
                }
                ops.push(Operation::new(
                    "re",
                    vec![
                        (*x).into(),
                        (height - y - h).into(),
                        (*w).into(),
                        (*h).into(),
                    ],
                ));
                ops.push(Operation::new(paint, vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}

fn fill_color(Rgb(r, g, b): Rgb) -> Operation {
    Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

fn stroke_color(Rgb(r, g, b): Rgb) -> Operation {
    Operation::new("RG", vec![r.into(), g.into(), b.into()])
}

fn link_annotation(link: &LinkArea, height: f32) -> Dictionary {
    let bottom = height - link.y - link.h;
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => numbers(&[link.x, bottom, link.x + link.w, bottom + link.h]),
        "Border" => numbers(&[0.0, 0.0, 0.0]),
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(link.url.as_bytes()),
        },
    }
}

fn numbers(values: &[f32]) -> Object {
    Object::Array(values.iter().map(|&v| v.into()).collect())
}

/// A PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::string_literal(bytes)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new(595.0, 842.0, "Report");
        canvas.text(0, 50.0, 70.0, "Hello", FontFace::Bold, 12.0, Rgb::BLACK);
        canvas.line(0, 50.0, 80.0, 545.0, 80.0, 0.5, Rgb::BLACK);
        canvas.link(0, 50.0, 60.0, 40.0, 12.0, "http://shop.test/x");
        let second = canvas.add_page();
        canvas.text(second, 50.0, 70.0, "Page two", FontFace::Regular, 11.0, Rgb::BLACK);
        canvas
    }

    #[test]
    fn test_write_loads_back() {
        let bytes = write_pdf(&sample_canvas()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_link_annotation_rect_is_flipped() {
        let link = LinkArea {
            x: 10.0,
            y: 20.0,
            w: 30.0,
            h: 5.0,
            url: "http://x".to_string(),
        };
        let annot = link_annotation(&link, 100.0);
        let rect = annot.get(b"Rect").unwrap().as_array().unwrap();
        let values: Vec<f32> = rect.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(values, vec![10.0, 75.0, 40.0, 80.0]);
    }

    #[test]
    fn test_output_is_deterministic() {
        let a = write_pdf(&sample_canvas()).unwrap();
        let b = write_pdf(&sample_canvas()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_string_encoding() {
        match text_string("abc") {
            Object::String(bytes, _) => assert_eq!(bytes, b"abc".to_vec()),
            other => panic!("unexpected object {:?}", other),
        }
        match text_string("\u{00E9}") {
            Object::String(bytes, _) => assert_eq!(bytes, vec![0xFE, 0xFF, 0x00, 0xE9]),
            other => panic!("unexpected object {:?}", other),
        }
    }
}
