use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::FlagreelResult;
use crate::render::frame::FrameRGBA;
use crate::render::outline::Outline;

/// Handle to an image registered with a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub(crate) usize);

/// Font size and color for text drawn on a surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color.
    pub color: Rgba8,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size_px: 30.0,
            color: Rgba8::BLACK,
        }
    }
}

/// An explicit drawing context.
///
/// Generator and compositor receive the surface they draw on as a value; there is no ambient
/// "current" context. A surface is reused across frames by clearing it.
pub trait Surface {
    /// Pixel size of the surface.
    fn canvas(&self) -> Canvas;

    /// Drop everything drawn so far and fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba8);

    /// Fill a closed outline.
    fn fill(&mut self, outline: &Outline, color: Rgba8);

    /// Stroke a closed outline with a line of `width` pixels.
    fn stroke(&mut self, outline: &Outline, color: Rgba8, width: f64);

    /// Make an image drawable on this surface.
    fn register_image(&mut self, image: &FrameRGBA) -> FlagreelResult<ImageId>;

    /// Draw a registered image scaled into `dst`.
    fn draw_image(&mut self, id: ImageId, dst: Rect) -> FlagreelResult<()>;

    /// Draw a single line of text starting at `left`, vertically centered on `center_y`.
    fn draw_text(
        &mut self,
        text: &str,
        left: f64,
        center_y: f64,
        style: &TextStyle,
    ) -> FlagreelResult<()>;

    /// Rasterize everything drawn since the last clear and return the pixels.
    fn read_pixels(&mut self) -> FlagreelResult<FrameRGBA>;
}
