//! Placeholder-sheet PDF assembly
//!
//! Renders the paginated display list as a printable PDF: one document page
//! per print page, the slot grid centered, every slot at the official
//! 63.5x88.9mm card size. The document is built fully in memory and written
//! once at the end, so a failed export never leaves a partial file.

use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};

use crate::error::{OrganizerError, Result};
use crate::layout::{
    grid_config, page_dimensions_mm, Orientation, PaperSize, PrintPage, CARD_HEIGHT_MM,
    CARD_WIDTH_MM,
};
use crate::models::Variation;

/// Appearance switches for the placeholder sheet, mirroring the print
/// settings panel: each text band and the cut-line border can be toggled
/// independently.
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Desaturate all ink using the standard luma weights
    pub grayscale: bool,
    pub show_cut_lines: bool,
    /// 0.0 = invisible, 1.0 = full strength
    pub cut_line_opacity: f32,
    pub show_top_text: bool,
    pub show_middle_text: bool,
    pub show_bottom_text: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            grayscale: false,
            show_cut_lines: true,
            cut_line_opacity: 1.0,
            show_top_text: true,
            show_middle_text: true,
            show_bottom_text: true,
        }
    }
}

// Ink colors (sRGB, 0..1)
const INK_LABEL: (f32, f32, f32) = (0.58, 0.64, 0.71);
const INK_NAME: (f32, f32, f32) = (0.12, 0.16, 0.22);
const INK_NUMBER: (f32, f32, f32) = (0.39, 0.45, 0.55);
const INK_RARITY: (f32, f32, f32) = (0.16, 0.40, 0.80);
const INK_SET: (f32, f32, f32) = (0.58, 0.64, 0.71);
const INK_CUT_LINE: (f32, f32, f32) = (0.0, 0.0, 0.0);
const INK_CORNER: (f32, f32, f32) = (0.80, 0.84, 0.88);

/// Points per millimeter (1 inch = 72pt = 25.4mm)
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Desaturate an RGB color with the standard luma weights, the same value
/// applied to all three channels: gray = 0.299R + 0.587G + 0.114B.
pub fn grayscale(rgb: (f32, f32, f32)) -> (f32, f32, f32) {
    let y = 0.299 * rgb.0 + 0.587 * rgb.1 + 0.114 * rgb.2;
    (y, y, y)
}

/// Fade a color toward the white page background; stands in for stroke
/// opacity, which built-in PDF line drawing does not expose directly
fn fade(rgb: (f32, f32, f32), opacity: f32) -> (f32, f32, f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    (
        1.0 - (1.0 - rgb.0) * opacity,
        1.0 - (1.0 - rgb.1) * opacity,
        1.0 - (1.0 - rgb.2) * opacity,
    )
}

/// Generate the placeholder PDF at `output`.
///
/// Pages are rendered strictly in order; any error aborts the whole export
/// before the file is created.
pub fn generate_pdf(
    pages: &[PrintPage],
    paper: PaperSize,
    orientation: Orientation,
    options: &PrintOptions,
    output: &Path,
) -> Result<()> {
    if pages.is_empty() {
        log::warn!("Nothing to export, no PDF written");
        return Ok(());
    }

    let (page_w, page_h) = page_dimensions_mm(paper, orientation);
    let grid = grid_config(paper, orientation);

    // Grid origin, centered on the page. PDF coordinates grow upward, so the
    // origin is the bottom-left corner of the grid.
    let grid_left = (page_w - grid.width_mm()) / 2.0;
    let grid_bottom = (page_h - grid.height_mm()) / 2.0;

    log::debug!(
        "Rendering {} page(s) on {} {} ({}x{} grid)",
        pages.len(),
        paper,
        orientation,
        grid.cols,
        grid.rows
    );

    let (doc, first_page, first_layer) =
        PdfDocument::new("Card Placeholders", Mm(page_w), Mm(page_h), "Page 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| OrganizerError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| OrganizerError::Pdf(e.to_string()))?;

    for (page_index, page) in pages.iter().enumerate() {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                doc.add_page(Mm(page_w), Mm(page_h), format!("Page {}", page_index + 1));
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        for (slot_index, entry) in page.entries.iter().enumerate() {
            let col = slot_index as u32 % grid.cols;
            let row = slot_index as u32 / grid.cols;

            // Row 0 is the top row of the grid
            let left = grid_left + col as f32 * CARD_WIDTH_MM;
            let bottom = grid_bottom + (grid.rows - 1 - row) as f32 * CARD_HEIGHT_MM;

            draw_slot(&layer, entry, left, bottom, options, &font, &font_bold);
        }
    }

    doc.save(&mut BufWriter::new(std::fs::File::create(output)?))
        .map_err(|e| OrganizerError::Pdf(e.to_string()))?;

    log::info!("Wrote {} page(s) to {}", pages.len(), output.display());
    Ok(())
}

fn draw_slot(
    layer: &PdfLayerReference,
    entry: &crate::expansion::DisplayEntry,
    left: f32,
    bottom: f32,
    options: &PrintOptions,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    let ink = |color: (f32, f32, f32)| {
        if options.grayscale {
            grayscale(color)
        } else {
            color
        }
    };
    let center_x = left + CARD_WIDTH_MM / 2.0;
    let top = bottom + CARD_HEIGHT_MM;

    if options.show_cut_lines {
        layer.set_outline_color(rgb(ink(fade(INK_CUT_LINE, options.cut_line_opacity))));
        layer.set_outline_thickness(0.5);
        layer.set_line_dash_pattern(LineDashPattern {
            dash_1: Some(3),
            ..Default::default()
        });
        layer.add_line(rect(left, bottom, CARD_WIDTH_MM, CARD_HEIGHT_MM));
        layer.set_line_dash_pattern(LineDashPattern::default());
    }

    // Corner alignment ticks
    layer.set_outline_color(rgb(ink(INK_CORNER)));
    layer.set_outline_thickness(0.4);
    for line in corner_ticks(left, bottom) {
        layer.add_line(line);
    }

    if options.show_top_text {
        layer.set_fill_color(rgb(ink(INK_LABEL)));
        centered_text(layer, "PLACEHOLDER", 6.0, center_x, top - 7.0, font_bold);
    }

    if options.show_middle_text {
        // Keep the name inside the slot; very long names get clipped
        let name = truncated(&entry.card.name, 24);
        layer.set_fill_color(rgb(ink(INK_NAME)));
        centered_text(layer, &name, 11.0, center_x, bottom + CARD_HEIGHT_MM / 2.0 + 4.0, font_bold);

        layer.set_fill_color(rgb(ink(INK_NUMBER)));
        let number = format!("#{}", entry.card.number);
        centered_text(layer, &number, 8.0, center_x, bottom + CARD_HEIGHT_MM / 2.0 - 4.0, font);
    }

    if options.show_bottom_text {
        let rarity_line = match entry.variation {
            Variation::Reverse => "Reverse Holo",
            Variation::Normal => entry.card.rarity.as_str(),
        };
        layer.set_fill_color(rgb(ink(INK_RARITY)));
        centered_text(layer, rarity_line, 7.0, center_x, bottom + 10.0, font_bold);

        layer.set_fill_color(rgb(ink(INK_SET)));
        let set_name = truncated(&entry.card.set.name, 32);
        centered_text(layer, &set_name, 6.0, center_x, bottom + 5.5, font);
    }
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Closed rectangle outline
fn rect(x: f32, y: f32, w: f32, h: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ],
        is_closed: true,
    }
}

/// Short L-shaped marks in all four slot corners for cutting alignment
fn corner_ticks(left: f32, bottom: f32) -> Vec<Line> {
    const TICK: f32 = 2.0;
    let right = left + CARD_WIDTH_MM;
    let top = bottom + CARD_HEIGHT_MM;

    let mut lines = Vec::with_capacity(8);
    for (cx, cy, dx, dy) in [
        (left, top, TICK, -TICK),
        (right, top, -TICK, -TICK),
        (left, bottom, TICK, TICK),
        (right, bottom, -TICK, TICK),
    ] {
        lines.push(segment(cx, cy, cx + dx, cy));
        lines.push(segment(cx, cy, cx, cy + dy));
    }
    lines
}

fn segment(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    }
}

/// Draw text horizontally centered on `center_x`. Built-in fonts expose no
/// metrics, so the width is estimated from the Helvetica average of roughly
/// half an em per glyph; accurate enough for placeholder labels.
fn centered_text(
    layer: &PdfLayerReference,
    text: &str,
    size_pt: f32,
    center_x: f32,
    baseline_y: f32,
    font: &IndirectFontRef,
) {
    let width_mm = text.chars().count() as f32 * size_pt * 0.5 / PT_PER_MM;
    let x = center_x - width_mm / 2.0;
    layer.use_text(text, size_pt, Mm(x), Mm(baseline_y), font);
}

fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
