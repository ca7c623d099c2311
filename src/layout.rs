//! Print-grid geometry and pagination
//!
//! Maps a paper size and orientation to a slot grid, then partitions an
//! expanded display list into print pages. All dimensions are millimeters.

use std::fmt;
use std::str::FromStr;

use crate::expansion::DisplayEntry;

/// Official trading-card width
pub const CARD_WIDTH_MM: f32 = 63.5;
/// Official trading-card height
pub const CARD_HEIGHT_MM: f32 = 88.9;

/// Supported paper sizes for the placeholder sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
}

impl PaperSize {
    /// Portrait (width, height) in millimeters
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
        }
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            "legal" => Ok(PaperSize::Legal),
            other => Err(format!("unknown paper size: {other} (expected a4, letter or legal)")),
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!(
                "unknown orientation: {other} (expected portrait or landscape)"
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot grid for one (paper size, orientation) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
}

impl GridConfig {
    pub fn cards_per_page(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Physical width of the grid
    pub fn width_mm(&self) -> f32 {
        self.cols as f32 * CARD_WIDTH_MM
    }

    /// Physical height of the grid
    pub fn height_mm(&self) -> f32 {
        self.rows as f32 * CARD_HEIGHT_MM
    }
}

/// How many 63.5x88.9mm slots fit on each paper size:
/// A4 and Letter hold 3x3 portrait / 4x2 landscape, Legal's extra length
/// gives 3x4 portrait / 5x2 landscape.
pub fn grid_config(paper: PaperSize, orientation: Orientation) -> GridConfig {
    match orientation {
        Orientation::Portrait => GridConfig {
            cols: 3,
            rows: if paper == PaperSize::Legal { 4 } else { 3 },
        },
        Orientation::Landscape => {
            if paper == PaperSize::Legal {
                GridConfig { cols: 5, rows: 2 }
            } else {
                GridConfig { cols: 4, rows: 2 }
            }
        }
    }
}

/// Page (width, height) in millimeters, swapped for landscape
pub fn page_dimensions_mm(paper: PaperSize, orientation: Orientation) -> (f32, f32) {
    let (w, h) = paper.dimensions_mm();
    match orientation {
        Orientation::Portrait => (w, h),
        Orientation::Landscape => (h, w),
    }
}

/// An ordered, bounded-size slice of display entries; one printed page
#[derive(Debug, Clone, PartialEq)]
pub struct PrintPage {
    pub entries: Vec<DisplayEntry>,
}

/// Partition `entries` into consecutive pages of the grid's capacity.
///
/// The last page may be short; page order equals input order and no entry is
/// reordered within a page.
pub fn plan_pages(
    entries: Vec<DisplayEntry>,
    paper: PaperSize,
    orientation: Orientation,
) -> Vec<PrintPage> {
    let capacity = grid_config(paper, orientation).cards_per_page();
    entries
        .chunks(capacity)
        .map(|chunk| PrintPage {
            entries: chunk.to_vec(),
        })
        .collect()
}
