use crate::foundation::core::{Canvas, FrameIndex, Rgba8};
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::render::surface::TextStyle;

/// Geometry and styling of a scrolling banner.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Width of the glyph part of a cell.
    pub glyph_width: u32,
    /// Height of a cell.
    pub glyph_height: u32,
    /// Width reserved for the label right of each glyph.
    pub label_width: u32,
    /// Cells per row.
    pub columns: u32,
    /// Rows visible at once; the canvas is this many cells tall.
    pub visible_rows: u32,
    /// Pixels scrolled per frame.
    pub scroll_step: u32,
    /// Fill applied before every frame.
    pub background: Rgba8,
    /// Label font size and color.
    pub label: TextStyle,
    /// Gap between a glyph and its label.
    pub label_padding: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            glyph_width: 128,
            glyph_height: 128,
            label_width: 200,
            columns: 3,
            visible_rows: 3,
            scroll_step: 4,
            background: Rgba8::WHITE,
            label: TextStyle::default(),
            label_padding: 10.0,
        }
    }
}

impl ScrollConfig {
    /// Check sizes and return the canvas every frame is drawn on.
    pub fn validate(&self) -> FlagreelResult<Canvas> {
        if self.glyph_width == 0 || self.glyph_height == 0 {
            return Err(FlagreelError::validation("glyph cell size must be non-zero"));
        }
        if self.columns == 0 {
            return Err(FlagreelError::validation("columns must be >= 1"));
        }
        if self.visible_rows == 0 {
            return Err(FlagreelError::validation("visible_rows must be >= 1"));
        }
        if self.scroll_step == 0 {
            return Err(FlagreelError::validation("scroll_step must be >= 1"));
        }
        if !self.label_padding.is_finite() || self.label_padding < 0.0 {
            return Err(FlagreelError::validation(
                "label_padding must be finite and non-negative",
            ));
        }
        if !self.label.size_px.is_finite() || self.label.size_px <= 0.0 {
            return Err(FlagreelError::validation("label size must be positive"));
        }
        self.canvas()
    }

    /// Horizontal pitch of one cell: glyph plus label.
    pub fn cell_width(&self) -> u32 {
        self.glyph_width.saturating_add(self.label_width)
    }

    /// Viewport height in pixels.
    pub fn viewport_height(&self) -> u64 {
        u64::from(self.visible_rows) * u64::from(self.glyph_height)
    }

    /// Frame canvas: `columns` cells wide, `visible_rows` cells tall.
    pub fn canvas(&self) -> FlagreelResult<Canvas> {
        let width = self
            .columns
            .checked_mul(self.cell_width())
            .ok_or_else(|| FlagreelError::validation("banner width overflows"))?;
        let height = self
            .visible_rows
            .checked_mul(self.glyph_height)
            .ok_or_else(|| FlagreelError::validation("banner height overflows"))?;
        Canvas::new(width, height)
    }
}

/// Frames needed to scroll `content_height` through a `viewport_height` window, first and last
/// offset included.
///
/// `step` must be non-zero.
pub fn frame_count(content_height: u64, viewport_height: u64, step: u64) -> u64 {
    content_height
        .saturating_sub(viewport_height)
        .div_ceil(step.max(1))
        + 1
}

/// A cell placed on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedCell {
    /// Entry drawn in the cell, `None` for padding.
    pub entry: Option<usize>,
    /// Left edge on the frame.
    pub x: f64,
    /// Top edge on the frame; negative when the cell is partly scrolled out.
    pub y: f64,
}

/// The padded, loop-extended cell grid for a given number of entries.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollLayout {
    config: ScrollConfig,
    cells: Vec<Option<usize>>,
    content_rows: usize,
}

impl ScrollLayout {
    /// Lay out `entry_count` entries.
    ///
    /// The last row is padded with empty cells, then the first `columns * visible_rows` cells are
    /// appended again (cycling when there are fewer) so the last frame shows what the first does.
    pub fn new(entry_count: usize, config: &ScrollConfig) -> FlagreelResult<Self> {
        config.validate()?;
        if entry_count == 0 {
            return Err(FlagreelError::empty_input("no entries to lay out"));
        }
        let columns = config.columns as usize;
        let content_rows = entry_count.div_ceil(columns);

        let mut cells: Vec<Option<usize>> = (0..entry_count).map(Some).collect();
        cells.resize(content_rows * columns, None);
        let head = columns * config.visible_rows as usize;
        let duplicate: Vec<Option<usize>> = cells.iter().copied().cycle().take(head).collect();
        cells.extend(duplicate);

        Ok(Self {
            config: config.clone(),
            cells,
            content_rows,
        })
    }

    /// Every cell, row-major: entries, padding, then the loop duplicate.
    pub fn cells(&self) -> &[Option<usize>] {
        &self.cells
    }

    /// Rows holding real entries (and padding).
    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    /// Rows including the appended duplicate.
    pub fn total_rows(&self) -> usize {
        self.cells.len() / self.config.columns as usize
    }

    /// Height of the whole extended grid.
    pub fn content_height(&self) -> u64 {
        self.total_rows() as u64 * u64::from(self.config.glyph_height)
    }

    /// Number of frames in one loop.
    pub fn frame_count(&self) -> u64 {
        frame_count(
            self.content_height(),
            self.config.viewport_height(),
            u64::from(self.config.scroll_step),
        )
    }

    /// Vertical scroll offset of frame `f`.
    pub fn offset(&self, f: FrameIndex) -> u64 {
        f.0 * u64::from(self.config.scroll_step)
    }

    /// Cells intersecting the viewport at `offset`, in row-major order.
    ///
    /// Rows past the extended grid wrap back onto the content rows, so an offset that overshoots
    /// the duplicate head by less than one step still shows content at the bottom edge.
    pub fn visible_cells(&self, offset: u64) -> impl Iterator<Item = PlacedCell> + '_ {
        let columns = self.config.columns as usize;
        let gh = u64::from(self.config.glyph_height);
        let pitch = f64::from(self.config.cell_width());
        let first = offset / gh;
        let end = offset
            .saturating_add(self.config.viewport_height())
            .div_ceil(gh);
        (first..end).flat_map(move |row| {
            let src = (row as usize % self.content_rows) * columns;
            let y = (row * gh) as f64 - offset as f64;
            (0..columns).map(move |col| PlacedCell {
                entry: self.cells[src + col],
                x: col as f64 * pitch,
                y,
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
