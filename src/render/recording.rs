use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::render::frame::FrameRGBA;
use crate::render::outline::Outline;
use crate::render::surface::{ImageId, Surface, TextStyle};

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`Surface::clear`].
    Clear(Rgba8),
    /// [`Surface::fill`].
    Fill {
        /// Filled outline.
        outline: Outline,
        /// Fill color.
        color: Rgba8,
    },
    /// [`Surface::stroke`].
    Stroke {
        /// Stroked outline.
        outline: Outline,
        /// Stroke color.
        color: Rgba8,
        /// Line width.
        width: f64,
    },
    /// [`Surface::draw_image`].
    Image {
        /// Drawn image.
        id: ImageId,
        /// Destination rectangle.
        dst: Rect,
    },
    /// [`Surface::draw_text`].
    Text {
        /// Drawn string.
        text: String,
        /// Left edge.
        left: f64,
        /// Vertical center line.
        center_y: f64,
    },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Useful to inspect what a glyph plan or a scroll frame draws, and in what order.
#[derive(Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    images: Vec<(u32, u32)>,
    calls: Vec<DrawCall>,
    frames: Vec<Vec<DrawCall>>,
}

impl RecordingSurface {
    /// Create an empty recorder of the given size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            images: Vec::new(),
            calls: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Calls made since the last clear.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Call lists captured by each [`Surface::read_pixels`], in order.
    pub fn frames(&self) -> &[Vec<DrawCall>] {
        &self.frames
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Rgba8) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear(color));
    }

    fn fill(&mut self, outline: &Outline, color: Rgba8) {
        self.calls.push(DrawCall::Fill {
            outline: outline.clone(),
            color,
        });
    }

    fn stroke(&mut self, outline: &Outline, color: Rgba8, width: f64) {
        self.calls.push(DrawCall::Stroke {
            outline: outline.clone(),
            color,
            width,
        });
    }

    fn register_image(&mut self, image: &FrameRGBA) -> FlagreelResult<ImageId> {
        self.images.push((image.width, image.height));
        Ok(ImageId(self.images.len() - 1))
    }

    fn draw_image(&mut self, id: ImageId, dst: Rect) -> FlagreelResult<()> {
        if id.0 >= self.images.len() {
            return Err(FlagreelError::render(format!("unknown image id {}", id.0)));
        }
        self.calls.push(DrawCall::Image { id, dst });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        left: f64,
        center_y: f64,
        _style: &TextStyle,
    ) -> FlagreelResult<()> {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            left,
            center_y,
        });
        Ok(())
    }

    fn read_pixels(&mut self) -> FlagreelResult<FrameRGBA> {
        self.frames.push(self.calls.clone());
        Ok(FrameRGBA::transparent(self.canvas))
    }
}
