//! Integration tests for the paginated PDF output.

use lopdf::Document;
use mdexport::render::pdf::{layout_pdf, to_pdf, Canvas, DrawOp, PageGeometry};
use mdexport::ExportOptions;

fn layout(md: &str) -> Canvas {
    layout_pdf(md, &ExportOptions::default()).unwrap()
}

fn long_paragraphs(count: usize) -> String {
    (0..count)
        .map(|i| format!("Paragraph {} with enough words to fill part of a line.", i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn long_table(rows: usize) -> String {
    let mut md = String::from("| Key | Value |\n| --- | --- |\n");
    for i in 0..rows {
        md.push_str(&format!("| row-{:03} | val-{:03} |\n", i, i));
    }
    md
}

fn page_of(canvas: &Canvas, text: &str) -> Option<usize> {
    canvas
        .pages()
        .iter()
        .position(|page| page.texts().any(|t| t == text))
}

#[test]
fn test_empty_input_has_title_only() {
    let canvas = layout("");
    assert_eq!(canvas.page_count(), 1);
    assert_eq!(canvas.link_count(), 0);

    let texts: Vec<&str> = canvas.pages()[0].texts().collect();
    assert_eq!(texts, vec![mdexport::DEFAULT_TITLE]);
}

#[test]
fn test_custom_title() {
    let options = ExportOptions::new().with_title("Invoice");
    let canvas = layout_pdf("", &options).unwrap();
    assert_eq!(canvas.title, "Invoice");
    assert_eq!(canvas.pages()[0].texts().next(), Some("Invoice"));
}

#[test]
fn test_many_paragraphs_break_pages() {
    let canvas = layout(&long_paragraphs(200));
    assert!(canvas.page_count() > 1);

    // Every paragraph lands somewhere, in order.
    let first = page_of(&canvas, "Paragraph 0 with enough words to fill part of a line.");
    let last = page_of(&canvas, "Paragraph 199 with enough words to fill part of a line.");
    assert_eq!(first, Some(0));
    assert_eq!(last, Some(canvas.page_count() - 1));
}

#[test]
fn test_text_stays_inside_printable_area() {
    let options = ExportOptions::default();
    let canvas = layout_pdf(&long_paragraphs(150), &options).unwrap();
    let geometry = PageGeometry::new(canvas.width, canvas.height, &options.style);

    for page in canvas.pages() {
        for op in &page.ops {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y <= geometry.bottom(), "baseline {} below margin", y);
                assert!(*y >= geometry.top());
            }
        }
    }
}

#[test]
fn test_table_rows_never_split() {
    let canvas = layout(&long_table(120));
    assert!(canvas.page_count() > 1);

    for i in 0..120 {
        let key = page_of(&canvas, &format!("row-{:03}", i));
        let value = page_of(&canvas, &format!("val-{:03}", i));
        assert!(key.is_some());
        assert_eq!(key, value, "row {} split across pages", i);
    }
}

#[test]
fn test_repeat_header_after_break() {
    let options = ExportOptions::new().with_repeat_table_header(true);
    let canvas = layout_pdf(&long_table(120), &options).unwrap();

    for page in canvas.pages().iter().skip(1) {
        assert!(page.texts().any(|t| t == "Key"));
    }

    let plain = layout(&long_table(120));
    assert_eq!(page_of(&plain, "Key"), Some(0));
    assert!(plain.pages()[1..].iter().all(|p| !p.texts().any(|t| t == "Key")));
}

#[test]
fn test_single_link_registers_one_region() {
    let canvas = layout("[Buy](http://shop.test/x)");
    let links: Vec<_> = canvas.links().collect();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].0, 0);
    assert_eq!(links[0].1.url, "http://shop.test/x");
}

#[test]
fn test_whole_cell_link_covers_cell() {
    let canvas = layout("| Item | Link |\n| --- | --- |\n| Shoe | [Buy](http://shop.test/x) |");
    let links: Vec<_> = canvas.links().map(|(_, l)| l).collect();
    assert_eq!(links.len(), 1);

    let (x, y) = canvas.pages()[0]
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { x, y, text, .. } if text == "Buy" => Some((*x, *y)),
            _ => None,
        })
        .unwrap();
    assert!(links[0].contains(x + 1.0, y - 1.0));
}

#[test]
fn test_output_is_idempotent() {
    let md = format!("# Report\n{}\n{}", long_paragraphs(60), long_table(40));
    let a = to_pdf(&md, &ExportOptions::default()).unwrap();
    let b = to_pdf(&md, &ExportOptions::default()).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn test_bytes_load_back() {
    let md = format!("# Links\n[Buy](http://shop.test/x)\n{}", long_paragraphs(120));
    let result = to_pdf(&md, &ExportOptions::default()).unwrap();

    let doc = Document::load_mem(&result.bytes).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len() as u32, result.stats.page_count);
    assert!(pages.len() > 1);

    let first = pages.values().next().copied().unwrap();
    let annots = doc
        .get_dictionary(first)
        .unwrap()
        .get(b"Annots")
        .unwrap()
        .as_array()
        .unwrap();
    assert_eq!(annots.len(), 1);
}
