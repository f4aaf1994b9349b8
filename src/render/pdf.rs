use std::collections::BTreeMap;

use async_trait::async_trait;
use log::warn;
use lopdf::{Dictionary, Document as PdfFile, Object, ObjectId, dictionary};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
    Rgb,
};

use crate::app_config::FontConfig;
use crate::document_model::{Document, ImageRef, Table, TranslatedDocument};
use crate::errors::RenderError;
use crate::render::fonts::{FontResolver, ResolvedFont};
use crate::render::{DocumentRenderer, RenderMode};

// @module: PDF output rendering

// US letter geometry with one-inch margins
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const PT_TO_MM: f32 = 0.352_778;
const LINE_FACTOR: f32 = 1.5;
const PARAGRAPH_SPACING_MM: f32 = 4.2;
const CELL_PADDING_MM: f32 = 2.0;

const TRANSLATED_SIZE_PT: f32 = 12.0;
const ORIGINAL_SIZE_PT: f32 = 11.0;
const TABLE_SIZE_PT: f32 = 10.0;

/// Renders the structural model into a PDF.
///
/// The page-interleaved mode additionally needs the raw bytes of the
/// original source so untouched original pages can be merged in.
pub struct PdfRenderer {
    // @field: Font resolution, memoized per renderer instance
    fonts: FontResolver,
    // @field: Raw original source bytes, for the page-interleaved merge
    source: Option<Vec<u8>>,
}

impl PdfRenderer {
    /// Create a renderer; `source` carries the original PDF bytes when the
    /// page-interleaved mode may be requested
    pub fn new(fonts: FontConfig, source: Option<Vec<u8>>) -> Self {
        Self {
            fonts: FontResolver::new(fonts),
            source,
        }
    }

    /// Compose a flowed PDF for the inline modes
    fn compose(
        &self,
        resolved: &ResolvedFont,
        mode: RenderMode,
        original: Option<&Document>,
        translated: &Document,
    ) -> Result<Vec<u8>, RenderError> {
        let (doc, page_index, layer_index) = PdfDocument::new(
            "Translated document",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let font = match resolved {
            ResolvedFont::File(path) => {
                let file = std::fs::File::open(path)
                    .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
                doc.add_external_font(file)
                    .map_err(|e| RenderError::Font(e.to_string()))?
            }
            ResolvedFont::Builtin => doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| RenderError::Font(e.to_string()))?,
        };

        let mut composer = PageComposer {
            doc: &doc,
            font: &font,
            layer: doc.get_page(page_index).get_layer(layer_index),
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        };

        for (index, translated_page) in translated.pages.iter().enumerate() {
            if index > 0 {
                composer.new_page();
            }
            let original_page = original.and_then(|o| o.pages.get(index));

            match (mode, original_page) {
                (RenderMode::InterleavedInline, Some(original_page)) => {
                    // Pairwise by index; a diverging count truncates silently
                    for (orig, trans) in original_page
                        .paragraphs
                        .iter()
                        .zip(translated_page.paragraphs.iter())
                    {
                        if !orig.is_blank() {
                            composer.write_paragraph(&orig.text, ORIGINAL_SIZE_PT, gray());
                        }
                        if !trans.is_blank() {
                            composer.write_paragraph(&trans.text, TRANSLATED_SIZE_PT, black());
                        }
                    }
                    for (orig, trans) in original_page
                        .tables
                        .iter()
                        .zip(translated_page.tables.iter())
                    {
                        composer.write_table(orig);
                        composer.write_table(trans);
                    }
                    for image in &original_page.images {
                        composer.write_image(image);
                    }
                }
                _ => {
                    for paragraph in &translated_page.paragraphs {
                        if !paragraph.is_blank() {
                            composer.write_paragraph(&paragraph.text, TRANSLATED_SIZE_PT, black());
                        }
                    }
                    for table in &translated_page.tables {
                        composer.write_table(table);
                    }
                    for image in &translated_page.images {
                        composer.write_image(image);
                    }
                }
            }
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::OutputConstruction(e.to_string()))
    }
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    async fn render(
        &self,
        mode: RenderMode,
        original: Option<&Document>,
        translated: &TranslatedDocument,
    ) -> Result<Vec<u8>, RenderError> {
        let resolved = self.fonts.resolve().await.clone();

        match mode {
            RenderMode::InterleavedPage => {
                let source = self
                    .source
                    .as_deref()
                    .ok_or(RenderError::MissingSource)?;
                // Throwaway translation-only intermediate, merged page by page
                let intermediate =
                    self.compose(&resolved, RenderMode::TranslationOnly, None, translated.document())?;
                merge_alternating(source, &intermediate)
            }
            other => self.compose(&resolved, other, original, translated.document()),
        }
    }
}

fn black() -> Rgb {
    Rgb::new(0.0, 0.0, 0.0, None)
}

// Muted tone for original-text paragraphs in the inline mode
fn gray() -> Rgb {
    Rgb::new(0.4, 0.4, 0.4, None)
}

/// Flowed-layout cursor over the pages of one output document
struct PageComposer<'a> {
    doc: &'a PdfDocumentReference,
    font: &'a IndirectFontRef,
    layer: PdfLayerReference,
    // Baseline cursor, measured from the bottom edge
    y_mm: f32,
}

impl PageComposer<'_> {
    fn new_page(&mut self) {
        let (page_index, layer_index) =
            self.doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page_index).get_layer(layer_index);
        self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn ensure_room(&mut self, needed_mm: f32) {
        if self.y_mm - needed_mm < MARGIN_MM {
            self.new_page();
        }
    }

    fn write_paragraph(&mut self, text: &str, size_pt: f32, color: Rgb) {
        let line_height_mm = size_pt * LINE_FACTOR * PT_TO_MM;
        self.layer.set_fill_color(Color::Rgb(color));

        for line in wrap_text(text, size_pt, CONTENT_WIDTH_MM / PT_TO_MM) {
            self.ensure_room(line_height_mm);
            self.y_mm -= line_height_mm;
            self.layer
                .use_text(line, size_pt, Mm(MARGIN_MM), Mm(self.y_mm), self.font);
        }
        self.y_mm -= PARAGRAPH_SPACING_MM;
        self.block_boundary();
    }

    fn write_table(&mut self, table: &Table) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }
        let column_width_mm = CONTENT_WIDTH_MM / columns as f32;
        let line_height_mm = TABLE_SIZE_PT * LINE_FACTOR * PT_TO_MM;
        let row_height_mm = line_height_mm + 2.0 * CELL_PADDING_MM;

        self.layer.set_fill_color(Color::Rgb(black()));
        self.layer.set_outline_color(Color::Rgb(black()));
        self.layer.set_outline_thickness(0.5);

        for row in &table.rows {
            // Rows are atomic: a row that no longer fits starts a new page
            self.ensure_room(row_height_mm);
            let top = self.y_mm;

            for column in 0..row.len() {
                let x = MARGIN_MM + column as f32 * column_width_mm;
                self.layer
                    .add_line(cell_border(x, top, column_width_mm, row_height_mm));
            }

            // One text op per row: cells joined by a double-space gap stay
            // recognizable as a grid line when the output is re-extracted
            let text = row
                .iter()
                .map(|cell| cell.as_deref().unwrap_or(""))
                .collect::<Vec<_>>()
                .join("  ");
            self.layer.use_text(
                text,
                TABLE_SIZE_PT,
                Mm(MARGIN_MM + CELL_PADDING_MM),
                Mm(top - CELL_PADDING_MM - line_height_mm),
                self.font,
            );

            self.y_mm -= row_height_mm;
        }
        self.y_mm -= PARAGRAPH_SPACING_MM;
        self.block_boundary();
    }

    /// Close a logical block with a lone space glyph.
    ///
    /// Text extraction turns each text op into one line, so the space-only
    /// op leaves the blank line that marks a paragraph boundary when the
    /// output is re-extracted.
    fn block_boundary(&mut self) {
        self.layer.use_text(
            " ",
            TRANSLATED_SIZE_PT,
            Mm(MARGIN_MM),
            Mm(self.y_mm),
            self.font,
        );
    }

    /// Pass an extracted image through to the output; undecodable image
    /// data is skipped rather than failing the render
    fn write_image(&mut self, image_ref: &ImageRef) {
        let decoded = match image::load_from_memory(&image_ref.data) {
            Ok(decoded) => decoded.to_rgb8(),
            Err(e) => {
                warn!("Skipping image {}: {}", image_ref.name, e);
                return;
            }
        };
        let (width_px, height_px) = (decoded.width(), decoded.height());

        // Scale down to the content width when needed
        let natural_dpi = 150.0_f32;
        let fit_dpi = width_px as f32 * 25.4 / CONTENT_WIDTH_MM;
        let dpi = natural_dpi.max(fit_dpi);
        let height_mm = height_px as f32 * 25.4 / dpi;

        self.ensure_room(height_mm + PARAGRAPH_SPACING_MM);
        self.y_mm -= height_mm;

        let xobject = ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: decoded.into_raw(),
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        };
        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(self.y_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        self.y_mm -= PARAGRAPH_SPACING_MM;
    }
}

fn cell_border(x: f32, top: f32, width: f32, height: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(top - height)), false),
            (Point::new(Mm(x), Mm(top - height)), false),
        ],
        is_closed: true,
    }
}

/// Greedy line wrapping over an estimated glyph width.
///
/// This is a width estimate, not shaped glyph metrics: ascii counts half an
/// em, everything else a full em. Good enough for flowed output that does
/// not promise pixel layout.
fn wrap_text(text: &str, font_size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let raw_line = raw_line.trim_end();
        if raw_line.is_empty() {
            continue;
        }

        let mut current = String::new();
        let mut width = 0.0_f32;
        for ch in raw_line.chars() {
            let char_width = approx_char_width(ch, font_size_pt);
            if width + char_width > max_width_pt && !current.is_empty() {
                // Break at the last space when there is one, else hard-break
                // (CJK text has no spaces to break at)
                match current.rfind(' ') {
                    Some(pos) if pos > 0 => {
                        let rest = current.split_off(pos + 1);
                        let finished = std::mem::replace(&mut current, rest);
                        lines.push(finished.trim_end().to_string());
                    }
                    _ => {
                        lines.push(std::mem::take(&mut current));
                    }
                }
                width = current
                    .chars()
                    .map(|c| approx_char_width(c, font_size_pt))
                    .sum();
            }
            current.push(ch);
            width += char_width;
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn approx_char_width(ch: char, font_size_pt: f32) -> f32 {
    if ch.is_ascii() {
        font_size_pt * 0.5
    } else {
        font_size_pt
    }
}

/// Merge two PDFs page by page, alternating first-second-first-second and
/// starting with the first document; a page index beyond one document's
/// length is simply skipped.
pub fn merge_alternating(first: &[u8], second: &[u8]) -> Result<Vec<u8>, RenderError> {
    let loaded = [
        PdfFile::load_mem(first).map_err(|e| RenderError::PageMerge(e.to_string()))?,
        PdfFile::load_mem(second).map_err(|e| RenderError::PageMerge(e.to_string()))?,
    ];

    let mut merged = PdfFile::with_version("1.5");
    let mut max_id = 1;
    let mut page_lists: Vec<Vec<ObjectId>> = Vec::new();
    let mut all_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut file in loaded {
        file.renumber_objects_with(max_id);
        max_id = file.max_id + 1;
        page_lists.push(file.get_pages().into_values().collect());
        all_objects.append(&mut file.objects);
    }

    let rounds = page_lists[0].len().max(page_lists[1].len());
    let mut ordered: Vec<ObjectId> = Vec::new();
    for index in 0..rounds {
        for list in &page_lists {
            if let Some(id) = list.get(index) {
                ordered.push(*id);
            }
        }
    }
    if ordered.is_empty() {
        return Err(RenderError::PageMerge("no pages to merge".to_string()));
    }

    // Carry every object across except the old catalogs and page-tree
    // nodes; page-tree attributes (MediaBox and friends) are folded into
    // the rebuilt root so inherited values survive
    let mut pages_attributes = Dictionary::new();
    for (id, object) in all_objects {
        if is_of_type(&object, b"Catalog") {
            continue;
        }
        if is_of_type(&object, b"Pages") {
            if let Ok(dict) = object.as_dict() {
                for (key, value) in dict.iter() {
                    let key = key.as_slice();
                    if key != b"Kids" && key != b"Count" && key != b"Parent" {
                        pages_attributes.set(key.to_vec(), value.clone());
                    }
                }
            }
            continue;
        }
        merged.objects.insert(id, object);
    }

    let pages_id: ObjectId = (max_id, 0);
    max_id += 1;

    for page_id in &ordered {
        if let Some(Object::Dictionary(dict)) = merged.objects.get_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    pages_attributes.set("Type", Object::Name(b"Pages".to_vec()));
    pages_attributes.set("Count", Object::Integer(ordered.len() as i64));
    pages_attributes.set(
        "Kids",
        Object::Array(ordered.iter().map(|id| Object::Reference(*id)).collect()),
    );
    merged.objects.insert(pages_id, Object::Dictionary(pages_attributes));

    let catalog_id: ObjectId = (max_id, 0);
    merged.objects.insert(
        catalog_id,
        Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        }),
    );

    merged.trailer.set("Root", Object::Reference(catalog_id));
    merged.max_id = max_id;
    merged.renumber_objects();
    merged.compress();

    let mut output = Vec::new();
    merged
        .save_to(&mut output)
        .map_err(|e| RenderError::PageMerge(e.to_string()))?;
    Ok(output)
}

fn is_of_type(object: &Object, type_name: &[u8]) -> bool {
    object
        .as_dict()
        .ok()
        .and_then(|dict| dict.get(b"Type").ok())
        .and_then(|value| value.as_name().ok())
        .map(|name| name == type_name)
        .unwrap_or(false)
}
