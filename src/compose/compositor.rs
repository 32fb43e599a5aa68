use crate::compose::layout::{ScrollConfig, ScrollLayout};
use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, Rect};
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::glyph::render::GlyphImage;
use crate::render::cpu::CpuSurface;
use crate::render::frame::FrameRGBA;
use crate::render::surface::{ImageId, Surface};
use crate::render::text::LabelFont;

/// One banner cell: a glyph and the label drawn next to it.
#[derive(Clone, Copy, Debug)]
pub struct Entry<'a> {
    /// Glyph raster, scaled into the cell.
    pub image: &'a GlyphImage,
    /// Text drawn right of the glyph.
    pub label: &'a str,
}

/// All frames of one scroll loop, with the sink configuration they were built for.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    /// Size and length of the sequence.
    pub config: SinkConfig,
    /// Frames in increasing offset order.
    pub frames: Vec<FrameRGBA>,
}

impl FrameSequence {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Hand every frame to `sink`, in order.
    pub fn write_to(&self, sink: &mut dyn FrameSink) -> FlagreelResult<()> {
        sink.begin(self.config)?;
        for (i, frame) in self.frames.iter().enumerate() {
            sink.push_frame(FrameIndex(i as u64), frame)?;
        }
        sink.end()
    }
}

/// Turns ordered entries into a seamlessly looping vertical scroll.
#[derive(Clone, Debug)]
pub struct ScrollCompositor {
    config: ScrollConfig,
    canvas: Canvas,
    font: Option<LabelFont>,
}

impl ScrollCompositor {
    /// Create a compositor without a label font.
    pub fn new(config: ScrollConfig) -> FlagreelResult<Self> {
        let canvas = config.validate()?;
        Ok(Self {
            config,
            canvas,
            font: None,
        })
    }

    /// Draw labels with `font`; `None` skips labels.
    pub fn with_font(mut self, font: Option<LabelFont>) -> Self {
        self.font = font;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Frame size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Layout for `entry_count` entries.
    pub fn layout(&self, entry_count: usize) -> FlagreelResult<ScrollLayout> {
        ScrollLayout::new(entry_count, &self.config)
    }

    /// Render every frame into memory.
    pub fn build_frames(&self, entries: &[Entry<'_>]) -> FlagreelResult<FrameSequence> {
        let mut sink = InMemorySink::new();
        self.compose(entries, &mut sink)?;
        let config = sink
            .config()
            .ok_or_else(|| FlagreelError::render("frame sink was never opened"))?;
        Ok(FrameSequence {
            config,
            frames: sink.into_frames(),
        })
    }

    /// Render frames on a fresh CPU surface and stream them to `sink`. Returns the frame count.
    pub fn compose(&self, entries: &[Entry<'_>], sink: &mut dyn FrameSink) -> FlagreelResult<u64> {
        if entries.is_empty() {
            return Err(FlagreelError::empty_input("no entries to compose"));
        }
        let mut surface = CpuSurface::with_font(self.canvas, self.font.as_ref())?;
        self.compose_on(&mut surface, entries, sink)
    }

    /// Render frames on `surface` and stream them to `sink`. Returns the frame count.
    ///
    /// The surface is cleared to the background before every frame. Fails with
    /// [`FlagreelError::EmptyInput`] before the sink is opened when `entries` is empty.
    #[tracing::instrument(skip_all, fields(entries = entries.len()))]
    pub fn compose_on(
        &self,
        surface: &mut dyn Surface,
        entries: &[Entry<'_>],
        sink: &mut dyn FrameSink,
    ) -> FlagreelResult<u64> {
        let layout = self.layout(entries.len())?;
        if surface.canvas() != self.canvas {
            return Err(FlagreelError::render(format!(
                "surface is {}x{}, frames are {}x{}",
                surface.canvas().width,
                surface.canvas().height,
                self.canvas.width,
                self.canvas.height
            )));
        }

        let ids = entries
            .iter()
            .map(|e| surface.register_image(e.image))
            .collect::<FlagreelResult<Vec<ImageId>>>()?;

        let frames = layout.frame_count();
        tracing::info!(
            frames,
            width = self.canvas.width,
            height = self.canvas.height,
            rows = layout.total_rows(),
            "composing scroll loop"
        );
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            frame_count: frames,
        })?;

        let gw = f64::from(self.config.glyph_width);
        let gh = f64::from(self.config.glyph_height);
        for f in 0..frames {
            let idx = FrameIndex(f);
            surface.clear(self.config.background);
            for cell in layout.visible_cells(layout.offset(idx)) {
                let Some(entry) = cell.entry else {
                    continue;
                };
                surface.draw_image(ids[entry], Rect::new(cell.x, cell.y, cell.x + gw, cell.y + gh))?;
                surface.draw_text(
                    entries[entry].label,
                    cell.x + gw + self.config.label_padding,
                    cell.y + gh / 2.0,
                    &self.config.label,
                )?;
            }
            let frame = surface.read_pixels()?;
            sink.push_frame(idx, &frame)?;
            if f % 10 == 0 || f + 1 == frames {
                tracing::debug!(frame = f + 1, total = frames, "frame composed");
            }
        }
        sink.end()?;
        Ok(frames)
    }
}

/// Build the whole frame sequence for `entries` with `config`, labels skipped.
pub fn build_frames(entries: &[Entry<'_>], config: &ScrollConfig) -> FlagreelResult<FrameSequence> {
    ScrollCompositor::new(config.clone())?.build_frames(entries)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
