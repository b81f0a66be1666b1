//! FILENAME: export/src/pdf.rs
//! Multi-page PDF assembly around pre-rasterized page bitmaps.
//!
//! Each logical page becomes one JPEG image object placed on its own PDF
//! page, plus the header/footer chrome from the report settings. Page
//! geometry arrives fully resolved in points; this module never measures
//! anything.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use layout_engine::geometry::PageBox;

use crate::error::ExportError;
use crate::raster::PageBitmap;

/// JPEG quality for embedded page bitmaps (the 0.98 of the web export).
pub const JPEG_QUALITY: u8 = 98;

/// Font size for the header/footer chrome.
const CHROME_FONT_SIZE: f32 = 9.0;

/// Where a page bitmap lands on the page, in points, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x_pt: f64,
    pub y_pt: f64,
    pub width_pt: f64,
    pub height_pt: f64,
}

struct PageEntry {
    page_id: Ref,
    content_id: Ref,
    image_id: Ref,
    placement: ImagePlacement,
}

/// Assembles the output document page by page, strictly in append order.
pub struct DocumentBuilder {
    pdf: Pdf,
    next_ref: i32,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_box: PageBox,
    header_text: String,
    footer_text: String,
    pages: Vec<PageEntry>,
}

impl DocumentBuilder {
    pub fn new(page_box: PageBox, header_text: &str, footer_text: &str) -> Self {
        let mut pdf = Pdf::new();
        let mut next_ref = 1;
        let mut alloc = || {
            let r = Ref::new(next_ref);
            next_ref += 1;
            r
        };
        let catalog_id = alloc();
        let pages_id = alloc();
        let font_id = alloc();
        drop(alloc);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        DocumentBuilder {
            pdf,
            next_ref,
            catalog_id,
            pages_id,
            font_id,
            page_box,
            header_text: header_text.to_string(),
            footer_text: footer_text.to_string(),
            pages: Vec::new(),
        }
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_ref);
        self.next_ref += 1;
        r
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends one page holding the given bitmap. The bitmap is encoded
    /// as JPEG and registered immediately; the page's content stream is
    /// written at `finish`, once the total page count is known for the
    /// footer numbering.
    pub fn add_image_page(
        &mut self,
        bitmap: &PageBitmap,
        placement: ImagePlacement,
    ) -> Result<(), ExportError> {
        let jpeg = bitmap.to_jpeg(JPEG_QUALITY)?;
        let image_id = self.alloc();
        {
            let mut xobj = self.pdf.image_xobject(image_id, &jpeg);
            xobj.filter(Filter::DctDecode);
            xobj.width(bitmap.width_px as i32);
            xobj.height(bitmap.height_px as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }

        let page_id = self.alloc();
        let content_id = self.alloc();
        self.pages.push(PageEntry {
            page_id,
            content_id,
            image_id,
            placement,
        });
        Ok(())
    }

    /// Writes all page objects and returns the finished document bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let entries = std::mem::take(&mut self.pages);
        let total = entries.len();
        let width = self.page_box.width_pt as f32;
        let height = self.page_box.height_pt as f32;
        let content_box = self.page_box.content;

        for (index, entry) in entries.iter().enumerate() {
            let mut content = Content::new();

            // The bitmap, scaled into its placement rectangle. PDF user
            // space has a bottom-left origin, so the top-left placement
            // is flipped here and nowhere else.
            let p = entry.placement;
            let y_pdf = (self.page_box.height_pt - (p.y_pt + p.height_pt)) as f32;
            content.save_state();
            content.transform([
                p.width_pt as f32,
                0.0,
                0.0,
                p.height_pt as f32,
                p.x_pt as f32,
                y_pdf,
            ]);
            content.x_object(Name(b"Im1"));
            content.restore_state();

            if !self.header_text.is_empty() {
                let baseline = (self.page_box.height_pt - content_box.y + 4.0) as f32;
                draw_text(
                    &mut content,
                    &self.header_text,
                    content_box.x as f32,
                    baseline,
                );
            }

            let footer_baseline =
                ((self.page_box.height_pt - content_box.y - content_box.height) / 2.0) as f32;
            if !self.footer_text.is_empty() {
                draw_text(
                    &mut content,
                    &self.footer_text,
                    centered_x(content_box.x as f32, content_box.width as f32, &self.footer_text),
                    footer_baseline,
                );
            }
            let page_label = format!("Página {} de {}", index + 1, total);
            draw_text(
                &mut content,
                &page_label,
                (content_box.x + content_box.width) as f32 - estimated_width(&page_label),
                footer_baseline,
            );

            self.pdf.stream(entry.content_id, &content.finish());

            let mut page = self.pdf.page(entry.page_id);
            page.media_box(Rect::new(0.0, 0.0, width, height))
                .parent(self.pages_id)
                .contents(entry.content_id);
            let mut resources = page.resources();
            resources.fonts().pair(Name(b"F1"), self.font_id);
            resources.x_objects().pair(Name(b"Im1"), entry.image_id);
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(entries.iter().map(|e| e.page_id))
            .count(total as i32);

        self.pdf.finish()
    }
}

/// Rough glyph-width estimate for the fixed chrome font. Good enough for
/// aligning short header/footer strings; the chrome never wraps.
fn estimated_width(text: &str) -> f32 {
    text.chars().count() as f32 * CHROME_FONT_SIZE * 0.5
}

/// Left edge that centers `text` within a box starting at `x`.
fn centered_x(x: f32, box_width: f32, text: &str) -> f32 {
    x + (box_width - estimated_width(text)) / 2.0
}

fn draw_text(content: &mut Content, text: &str, x: f32, y: f32) {
    content.begin_text();
    content.set_font(Name(b"F1"), CHROME_FONT_SIZE);
    content.next_line(x, y);
    content.show(Str(&winansi_bytes(text)));
    content.end_text();
}

/// Latin-1 fallback encoding for the WinAnsi chrome font.
fn winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}
