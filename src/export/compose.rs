//! Page composition: the cursor, the page-break rule, and footer stamping.
//!
//! The composer lays résumé blocks onto fixed-size pages using a single
//! mutable vertical cursor measured from the top of the current page. The
//! page-break rule runs before *every* content block: if the cursor plus the
//! block's required height would pass the writable bottom, a new page starts
//! and the cursor resets to the top margin. Section headings additionally
//! reserve one follower line of lookahead, sized for the tallest line that
//! can open a section (an entry header's first line), so a heading is never
//! stranded as the last thing on a page.
//!
//! Output is a list of [`PageLayout`]s holding positioned text spans in PDF
//! coordinates (origin bottom-left, y is the baseline). Footers are stamped
//! in a final pass once the page count is known — "Page i of N" cannot be
//! written inline.

use super::metrics::{self, BULLET, Font};
use super::wrap;
use crate::config::PdfConfig;

/// Line height multiplier applied to the font size.
const LEADING: f32 = 1.42;
/// Footer text size in points.
const FOOTER_SIZE: f32 = 8.0;
/// Horizontal offset of bullet text from the marker glyph.
const BULLET_INDENT: f32 = 14.0;
/// Vertical air between a section heading and its first body line.
const HEADING_GAP: f32 = 4.0;
/// Minimum horizontal gap between a wrapped title and a right-aligned date.
const DATE_GUTTER: f32 = 12.0;
/// Entry header titles render slightly larger than body text.
const ENTRY_TITLE_BUMP: f32 = 0.5;

/// Tolerance for cursor comparisons; keeps exact-fit blocks on the page.
const EPS: f32 = 0.01;

/// A positioned run of text. `x`/`y` are PDF points from the page's
/// bottom-left corner; `y` is the baseline.
#[derive(Debug, Clone)]
pub struct TextSpan {
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub text: String,
}

/// All spans placed on one page.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub spans: Vec<TextSpan>,
}

/// Vertical line height for a font size.
pub fn line_height(size: f32) -> f32 {
    size * LEADING
}

/// The pagination engine.
pub struct Composer {
    page_width: f32,
    page_height: f32,
    margin: f32,
    body_size: f32,
    heading_size: f32,
    pages: Vec<PageLayout>,
    /// Distance from the top of the current page to the top of the next
    /// block. Starts at the top margin on every page.
    cursor: f32,
}

impl Composer {
    pub fn new(pdf: &PdfConfig) -> Self {
        Self {
            page_width: pdf.page_width,
            page_height: pdf.page_height,
            margin: pdf.margin,
            body_size: pdf.body_size,
            heading_size: pdf.heading_size,
            pages: vec![PageLayout::default()],
            cursor: pdf.margin,
        }
    }

    pub fn body_size(&self) -> f32 {
        self.body_size
    }

    pub fn heading_size(&self) -> f32 {
        self.heading_size
    }

    /// Width of the writable column.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest cursor position content may reach.
    pub fn writable_bottom(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Full writable height of an empty page.
    fn page_capacity(&self) -> f32 {
        self.writable_bottom() - self.margin
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Current cursor position, from the top of the current page.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    fn fits(&self, needed: f32) -> bool {
        self.cursor + needed <= self.writable_bottom() + EPS
    }

    fn break_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.cursor = self.margin;
    }

    /// The page-break rule: start a new page unless `needed` points fit
    /// below the cursor.
    pub fn ensure_room(&mut self, needed: f32) {
        if !self.fits(needed) {
            self.break_page();
        }
    }

    /// Place spans on a shared baseline at the cursor, then advance the
    /// cursor by one line of `advance_size`. No break check — callers
    /// reserve room first.
    fn write_spans(&mut self, spans: Vec<(f32, Font, f32, String)>, advance_size: f32) {
        let y = self.page_height - self.cursor - advance_size;
        let page = self.pages.last_mut().expect("composer always has a page");
        for (x, font, size, text) in spans {
            page.spans.push(TextSpan { x, y, font, size, text });
        }
        self.cursor += line_height(advance_size);
    }

    fn write_line(&mut self, indent: f32, font: Font, size: f32, text: String) {
        let x = self.margin + indent;
        self.write_spans(vec![(x, font, size, text)], size);
    }

    /// Write pre-wrapped lines as one block.
    ///
    /// The whole block is reserved up front when it can fit on a single
    /// page; a block taller than a full page degrades to per-line breaking
    /// instead of looping forever.
    fn block(&mut self, indent: f32, font: Font, size: f32, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        let lh = line_height(size);
        let total = lines.len() as f32 * lh;
        if total <= self.page_capacity() {
            self.ensure_room(total);
        }
        for line in lines {
            self.ensure_room(lh);
            self.write_line(indent, font, size, line);
        }
    }

    /// Vertical gap between blocks. Skipped at the top of a page so fresh
    /// pages always start at the margin.
    pub fn gap(&mut self, points: f32) {
        if self.cursor > self.margin + EPS {
            self.cursor += points;
        }
    }

    /// A section heading.
    ///
    /// The break check reserves the heading *and* one follower line, so the
    /// heading can never be the last element on a page (the next block runs
    /// its own check, but is guaranteed at least one line of room). The
    /// follower reservation uses the tallest line that can open a section,
    /// an entry header's first line, so a heading followed by an entry
    /// header stays with it too.
    pub fn section_heading(&mut self, text: &str) {
        let follower = line_height(self.body_size + ENTRY_TITLE_BUMP);
        let needed = line_height(self.heading_size) + HEADING_GAP + follower;
        self.ensure_room(needed);
        self.write_line(0.0, Font::Bold, self.heading_size, text.to_string());
        self.cursor += HEADING_GAP;
    }

    /// A wrapped paragraph at body size.
    pub fn paragraph(&mut self, text: &str, font: Font) {
        let size = self.body_size;
        let lines = wrap::wrap(text, font, size, self.content_width());
        self.block(0.0, font, size, lines);
    }

    /// A single line of text at an explicit size, wrapped if needed.
    pub fn text_line(&mut self, text: &str, font: Font, size: f32) {
        let lines = wrap::wrap(text, font, size, self.content_width());
        self.block(0.0, font, size, lines);
    }

    /// Entry header: bold title on the left, date range right-aligned by its
    /// measured width. A long title wraps in the column left of the date.
    pub fn entry_header(&mut self, title: &str, date: &str) {
        let size = self.body_size + ENTRY_TITLE_BUMP;
        let date_width = metrics::text_width(date, Font::Regular, self.body_size);
        let title_column = (self.content_width() - date_width - DATE_GUTTER).max(size * 4.0);
        let lines = wrap::wrap(title, Font::Bold, size, title_column);

        if lines.is_empty() && date.is_empty() {
            return;
        }

        let lh = line_height(size);
        let total = (lines.len().max(1)) as f32 * lh;
        if total <= self.page_capacity() {
            self.ensure_room(total);
        }

        let date_x = self.page_width - self.margin - date_width;
        let mut first = true;
        if lines.is_empty() {
            // Date-only entry still occupies one line.
            self.ensure_room(lh);
            self.write_spans(
                vec![(date_x, Font::Regular, self.body_size, date.to_string())],
                size,
            );
            return;
        }
        for line in lines {
            self.ensure_room(lh);
            let mut spans = vec![(self.margin, Font::Bold, size, line)];
            if first && !date.is_empty() {
                spans.push((date_x, Font::Regular, self.body_size, date.to_string()));
                first = false;
            }
            self.write_spans(spans, size);
        }
    }

    /// Muted single line under an entry header (organisation, role summary).
    pub fn subtitle(&mut self, text: &str) {
        let size = self.body_size;
        let lines = wrap::wrap(text, Font::Oblique, size, self.content_width());
        self.block(0.0, Font::Oblique, size, lines);
    }

    /// A bullet: marker glyph plus wrapped text, advancing the cursor by the
    /// total wrapped height before the next block is drawn.
    pub fn bullet(&mut self, text: &str) {
        let size = self.body_size;
        let lines = wrap::wrap(text, Font::Regular, size, self.content_width() - BULLET_INDENT);
        if lines.is_empty() {
            return;
        }
        let lh = line_height(size);
        let total = lines.len() as f32 * lh;
        if total <= self.page_capacity() {
            self.ensure_room(total);
        }
        for (i, line) in lines.into_iter().enumerate() {
            self.ensure_room(lh);
            let mut spans = Vec::with_capacity(2);
            if i == 0 {
                spans.push((self.margin, Font::Regular, size, BULLET.to_string()));
            }
            spans.push((self.margin + BULLET_INDENT, Font::Regular, size, line));
            self.write_spans(spans, size);
        }
    }

    /// Finish composition: stamp "Page i of N" bottom-right and the
    /// attribution line bottom-center on every page.
    ///
    /// Runs after the main layout pass because the total page count is only
    /// known once everything is placed.
    pub fn finish(mut self, attribution: &str) -> Vec<PageLayout> {
        let total = self.pages.len();
        let footer_y = (self.margin * 0.45).max(FOOTER_SIZE);
        for (i, page) in self.pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", i + 1, total);
            let label_width = metrics::text_width(&label, Font::Regular, FOOTER_SIZE);
            page.spans.push(TextSpan {
                x: self.page_width - self.margin - label_width,
                y: footer_y,
                font: Font::Regular,
                size: FOOTER_SIZE,
                text: label,
            });
            if !attribution.is_empty() {
                let width = metrics::text_width(attribution, Font::Regular, FOOTER_SIZE);
                page.spans.push(TextSpan {
                    x: (self.page_width - width) / 2.0,
                    y: footer_y,
                    font: Font::Regular,
                    size: FOOTER_SIZE,
                    text: attribution.to_string(),
                });
            }
        }
        self.pages
    }
}
