// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout for the PDF exporter.
//
// Walks an `Outline` top to bottom with a running vertical cursor and decides
// where every line lands. The result is plain data (`PdfLayout`) so page
// breaks and wrapping can be inspected without parsing PDF bytes; the writer
// then turns each placed line into printpdf ops.

use indicadores_core::PaperSize;

use crate::outline::{BULLET, Block, Outline};

/// Millimetres per PostScript point.
pub const PT_TO_MM: f32 = 0.3528;

/// Left, right, top and bottom page margin.
pub const MARGIN_MM: f32 = 20.0;

/// A new section starts on a fresh page once the cursor is this close to the
/// bottom edge (250 mm down an A4 page).
pub const SECTION_BREAK_FROM_BOTTOM_MM: f32 = 47.0;

/// Baseline of the footer, measured up from the bottom edge.
pub const FOOTER_FROM_BOTTOM_MM: f32 = 10.0;

/// Indent applied to list entries and preformatted text.
const INDENT_MM: f32 = 4.0;

/// Visual role of a line; selects font, size, and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Subtitle,
    Heading,
    Subheading,
    Body,
    Mono,
    Footer,
}

impl LineStyle {
    pub fn font_size_pt(self) -> f32 {
        match self {
            Self::Title => 18.0,
            Self::Subtitle => 12.0,
            Self::Heading => 13.0,
            Self::Subheading => 11.0,
            Self::Body => 10.0,
            Self::Mono => 9.0,
            Self::Footer => 8.0,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Title | Self::Heading | Self::Subheading)
    }

    pub fn line_height_mm(self) -> f32 {
        self.font_size_pt() * PT_TO_MM * 1.45
    }

    /// Rough average glyph width, good enough to decide where to wrap.
    fn avg_char_width_mm(self) -> f32 {
        let factor = match self {
            Self::Mono => 0.60,
            s if s.is_bold() => 0.55,
            _ => 0.50,
        };
        factor * self.font_size_pt() * PT_TO_MM
    }

    fn max_chars(self, width_mm: f32) -> usize {
        ((width_mm / self.avg_char_width_mm()) as usize).max(1)
    }
}

/// One line of text at a fixed position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Distance from the left edge.
    pub x_mm: f32,
    /// Distance from the top edge to the baseline.
    pub y_mm: f32,
    pub style: LineStyle,
    /// Emphasised prefix of a `label: value` line (first wrapped line only).
    pub label: Option<String>,
    pub text: String,
    /// Index of the outline text line this piece was wrapped from.
    pub source: usize,
}

impl PlacedLine {
    /// The line as a reader sees it, label included.
    pub fn full_text(&self) -> String {
        match &self.label {
            Some(label) if self.text.is_empty() => label.clone(),
            Some(label) => format!("{label} {}", self.text),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

/// Every page of a document with its lines already positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<LaidOutPage>,
}

impl PdfLayout {
    /// Lay the outline out on pages of the given size.
    pub fn compute(outline: &Outline, paper_size: PaperSize) -> Self {
        let (w, h) = paper_size.dimensions_mm();
        let mut engine = LayoutEngine::new(w as f32, h as f32);

        engine.emit(&outline.title, LineStyle::Title, Placement::Centered, None);
        if let Some(subtitle) = &outline.subtitle {
            engine.gap(1.0);
            engine.emit(subtitle, LineStyle::Subtitle, Placement::Centered, None);
        }
        engine.gap(6.0);

        for section in &outline.sections {
            engine.break_before_section();
            engine.emit(&section.heading, LineStyle::Heading, Placement::Left(0.0), None);
            engine.gap(1.5);

            for block in &section.blocks {
                match block {
                    Block::Paragraph(text) => {
                        engine.emit(text, LineStyle::Body, Placement::Left(0.0), None);
                    }
                    Block::Field { label, value } => {
                        let label = format!("{label}:");
                        let line = format!("{label} {value}");
                        engine.emit(&line, LineStyle::Body, Placement::Left(0.0), Some(&label));
                    }
                    Block::Bullet(text) => {
                        let line = format!("{BULLET} {text}");
                        engine.emit(&line, LineStyle::Body, Placement::Left(INDENT_MM), None);
                    }
                    Block::Subheading(text) => {
                        engine.gap(1.0);
                        engine.emit(text, LineStyle::Subheading, Placement::Left(0.0), None);
                    }
                    Block::Preformatted(text) => {
                        for line in text.split('\n') {
                            engine.emit(line, LineStyle::Mono, Placement::Left(INDENT_MM), None);
                        }
                    }
                }
            }
            engine.gap(4.0);
        }

        engine.footer(&outline.footer);
        engine.finish()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    /// Wrapped pieces joined back into one string per outline line.
    ///
    /// Prose pieces are joined with a single space, which reproduces the
    /// original text whenever it was single-spaced and no word had to be
    /// force-broken. Preformatted pieces are concatenated as-is.
    pub fn logical_lines(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut current: Option<usize> = None;
        for line in self.lines() {
            let text = line.full_text();
            match (current, out.last_mut()) {
                (Some(source), Some(last)) if source == line.source => {
                    if line.style != LineStyle::Mono {
                        last.push(' ');
                    }
                    last.push_str(&text);
                }
                _ => out.push(text),
            }
            current = Some(line.source);
        }
        out
    }
}

// -- Engine -------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Placement {
    Centered,
    /// Left-aligned, indented this far from the margin.
    Left(f32),
}

struct LayoutEngine {
    page_w: f32,
    page_h: f32,
    pages: Vec<LaidOutPage>,
    current: LaidOutPage,
    /// Top of the next line, from the top edge.
    cursor_y: f32,
    /// Outline line counter.
    source: usize,
}

impl LayoutEngine {
    fn new(page_w: f32, page_h: f32) -> Self {
        Self {
            page_w,
            page_h,
            pages: Vec::new(),
            current: LaidOutPage::default(),
            cursor_y: MARGIN_MM,
            source: 0,
        }
    }

    fn content_width(&self) -> f32 {
        self.page_w - 2.0 * MARGIN_MM
    }

    fn bottom_limit(&self) -> f32 {
        self.page_h - MARGIN_MM
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor_y = MARGIN_MM;
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_y += mm;
    }

    fn break_before_section(&mut self) {
        let threshold = self.page_h - SECTION_BREAK_FROM_BOTTOM_MM;
        if self.cursor_y > threshold && !self.current.lines.is_empty() {
            self.new_page();
        }
    }

    /// Wrap and place one outline line.
    fn emit(&mut self, text: &str, style: LineStyle, placement: Placement, label: Option<&str>) {
        let indent = match placement {
            Placement::Centered => 0.0,
            Placement::Left(indent) => indent,
        };
        let max_chars = style.max_chars(self.content_width() - indent);
        let line_h = style.line_height_mm();

        let pieces = if style == LineStyle::Mono {
            break_preformatted(text, max_chars)
        } else {
            wrap_text(text, max_chars)
        };

        for (i, piece) in pieces.into_iter().enumerate() {
            if self.cursor_y + line_h > self.bottom_limit() && !self.current.lines.is_empty() {
                self.new_page();
            }

            let (label, body) = match label {
                Some(prefix) if i == 0 && piece.starts_with(prefix) => (
                    Some(prefix.to_string()),
                    piece[prefix.len()..].trim_start().to_string(),
                ),
                _ => (None, piece),
            };

            let x_mm = match placement {
                Placement::Centered => {
                    let width = body.chars().count() as f32 * style.avg_char_width_mm();
                    ((self.page_w - width) / 2.0).max(MARGIN_MM)
                }
                Placement::Left(indent) => MARGIN_MM + indent,
            };

            self.current.lines.push(PlacedLine {
                x_mm,
                y_mm: self.cursor_y + style.font_size_pt() * PT_TO_MM,
                style,
                label,
                text: body,
                source: self.source,
            });
            self.cursor_y += line_h;
        }
        self.source += 1;
    }

    /// Centered date line pinned to the bottom of the last page.
    fn footer(&mut self, text: &str) {
        let style = LineStyle::Footer;
        let width = text.chars().count() as f32 * style.avg_char_width_mm();
        self.current.lines.push(PlacedLine {
            x_mm: ((self.page_w - width) / 2.0).max(MARGIN_MM),
            y_mm: self.page_h - FOOTER_FROM_BOTTOM_MM,
            style,
            label: None,
            text: text.to_string(),
            source: self.source,
        });
        self.source += 1;
    }

    fn finish(mut self) -> PdfLayout {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        PdfLayout {
            page_width_mm: self.page_w,
            page_height_mm: self.page_h,
            pages: self.pages,
        }
    }
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap a string so that no line exceeds `max_width` characters.
///
/// Splits on existing newlines first, then performs simple word-wrap within
/// each paragraph. Words longer than `max_width` are force-broken on character
/// boundaries, never inside a multi-byte character.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_len = 0usize;

        for word in words {
            let word_len = word.chars().count();
            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        result.push(chunk.iter().collect());
                    } else {
                        current_line = chunk.iter().collect();
                        current_len = chunk.len();
                    }
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}

/// Hard-break a preformatted line every `max_width` characters, keeping
/// indentation and inner spacing intact.
pub fn break_preformatted(line: &str, max_width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(max_width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
