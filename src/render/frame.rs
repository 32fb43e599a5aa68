use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// A rendered image as RGBA8 pixels.
///
/// Frames produced by the CPU surface are **premultiplied alpha**; the `premultiplied` flag makes
/// this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A fully transparent premultiplied frame.
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.rgba8_len()],
            premultiplied: true,
        }
    }

    /// A premultiplied frame filled with one color.
    pub fn solid(canvas: Canvas, premul_rgba: [u8; 4]) -> Self {
        let mut data = vec![0; canvas.rgba8_len()];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&premul_rgba);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    /// Decode an encoded image (PNG, GIF, ...) into a premultiplied frame.
    pub fn decode(bytes: &[u8]) -> FlagreelResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut data = rgba.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Ok(Self {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    /// Canvas of the same size.
    pub fn canvas(&self) -> FlagreelResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// The pixel at `(x, y)` as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Rows `[y0, y1)` as a byte slice.
    pub fn rows(&self, y0: u32, y1: u32) -> &[u8] {
        let stride = (self.width as usize) * 4;
        let y1 = y1.min(self.height) as usize;
        let y0 = (y0 as usize).min(y1);
        &self.data[y0 * stride..y1 * stride]
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Encode as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> FlagreelResult<()> {
        if self.data.len() != (self.width as usize) * (self.height as usize) * 4 {
            return Err(FlagreelError::render(
                "frame data size mismatch with width*height*4",
            ));
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
