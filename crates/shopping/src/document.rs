use std::path::Path;

use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::ShoppingLine;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;
const FONT_SIZE: f32 = 12.0;
const LAYER: &str = "Layer 1";

pub const DOCUMENT_TITLE: &str = "Shopping list";

/// DejaVu Serif, embedded so non-Latin names and units keep their glyphs.
static DEFAULT_FONT: &[u8] = include_bytes!("../assets/DejaVuSerif.ttf");

/// Renders the lines into an in-memory A4 PDF, one line per entry, with a
/// new page whenever the bottom margin is reached.
pub fn render(lines: &[ShoppingLine], font_path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER,
    );

    let font = load_font(&doc, font_path)?;
    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    layer.use_text(DOCUMENT_TITLE, FONT_SIZE, Mm(MARGIN), Mm(y), &font);
    y -= LINE_HEIGHT * 2.0;

    for line in lines {
        if y < MARGIN {
            let (page, next) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            layer = doc.get_page(page).get_layer(next);
            y = PAGE_HEIGHT - MARGIN;
        }

        layer.use_text(line.to_string(), FONT_SIZE, Mm(MARGIN), Mm(y), &font);
        y -= LINE_HEIGHT;
    }

    Ok(doc.save_to_bytes()?)
}

fn load_font(doc: &PdfDocumentReference, path: Option<&Path>) -> anyhow::Result<IndirectFontRef> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            Ok(doc.add_external_font(file)?)
        }
        None => Ok(doc.add_external_font(DEFAULT_FONT)?),
    }
}
