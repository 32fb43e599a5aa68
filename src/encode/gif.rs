use std::fs::File;
use std::io::{BufWriter, Read as _, Seek as _, SeekFrom};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::frame::FrameRGBA;

/// Last byte of every complete GIF stream.
const GIF_TRAILER: u8 = 0x3B;

/// Quantizer speed handed to the GIF encoder (1 = best quality, 30 = fastest).
const GIF_QUANTIZER_SPEED: i32 = 10;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Final output path.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Delay between frames in milliseconds.
    pub frame_delay_ms: u32,
    /// Color translucent pixels are flattened onto.
    pub bg: Rgba8,
}

impl GifSinkOpts {
    /// Defaults for `out_path`: overwrite, 50 ms per frame, white background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            frame_delay_ms: 50,
            bg: Rgba8::WHITE,
        }
    }

    /// Validate delay and output path.
    pub fn validate(&self) -> FlagreelResult<()> {
        if self.frame_delay_ms == 0 {
            return Err(FlagreelError::validation("gif frame delay must be non-zero"));
        }
        if self.out_path.file_name().is_none() {
            return Err(FlagreelError::validation(format!(
                "gif output path '{}' has no file name",
                self.out_path.display()
            )));
        }
        Ok(())
    }
}

struct OpenGif {
    cfg: SinkConfig,
    encoder: GifEncoder<BufWriter<File>>,
    last: Option<FrameIndex>,
    scratch: Vec<u8>,
}

/// Sink writing an infinitely looping animated GIF.
///
/// Frames are written to a temporary sibling of the output path, which is renamed into place by
/// [`FrameSink::end`]. A sink dropped before `end` removes the temporary file, so a failed run
/// never leaves a partial GIF behind.
pub struct GifSink {
    opts: GifSinkOpts,
    tmp_path: PathBuf,
    open: Option<OpenGif>,
    frames_written: u64,
}

impl GifSink {
    /// Create a sink; nothing is written until [`FrameSink::begin`].
    pub fn new(opts: GifSinkOpts) -> FlagreelResult<Self> {
        opts.validate()?;
        let tmp_path = temp_sibling(&opts.out_path);
        Ok(Self {
            opts,
            tmp_path,
            open: None,
            frames_written: 0,
        })
    }

    /// Output path the GIF is renamed to on success.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    /// Frames encoded so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn discard(&mut self) {
        if self.open.take().is_some() {
            let _ = std::fs::remove_file(&self.tmp_path);
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlagreelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FlagreelError::validation("gif width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(FlagreelError::validation(format!(
                "gif frames are limited to {max}x{max}, got {}x{}",
                cfg.width,
                cfg.height,
                max = u16::MAX
            )));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(FlagreelError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        self.discard();
        ensure_parent_dir(&self.opts.out_path)?;

        let file = File::create(&self.tmp_path)
            .with_context(|| format!("failed to create '{}'", self.tmp_path.display()))?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_QUANTIZER_SPEED);
        if let Err(e) = encoder.set_repeat(Repeat::Infinite) {
            drop(encoder);
            let _ = std::fs::remove_file(&self.tmp_path);
            return Err(FlagreelError::encode(format!("failed to set gif loop: {e}")));
        }

        tracing::debug!(
            path = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            frames = cfg.frame_count,
            "gif sink opened"
        );
        self.frames_written = 0;
        self.open = Some(OpenGif {
            cfg,
            encoder,
            last: None,
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FlagreelResult<()> {
        let Some(open) = self.open.as_mut() else {
            return Err(FlagreelError::encode("gif sink is not open"));
        };
        open.cfg.check_frame(frame)?;
        if open.last.is_some_and(|last| idx <= last) {
            return Err(FlagreelError::encode(format!(
                "frames must arrive in increasing order, got {} after {}",
                idx.0,
                open.last.map_or(0, |l| l.0)
            )));
        }
        if frame.data.len() != open.scratch.len() {
            return Err(FlagreelError::encode(
                "frame.data size mismatch with width*height*4",
            ));
        }

        if frame.premultiplied {
            flatten_premul_over_bg(
                &mut open.scratch,
                &frame.data,
                [self.opts.bg.r, self.opts.bg.g, self.opts.bg.b],
            );
        } else {
            let mut premul = frame.data.clone();
            crate::foundation::math::premultiply_rgba8_in_place(&mut premul);
            flatten_premul_over_bg(
                &mut open.scratch,
                &premul,
                [self.opts.bg.r, self.opts.bg.g, self.opts.bg.b],
            );
        }

        let buffer = image::RgbaImage::from_raw(frame.width, frame.height, open.scratch.clone())
            .ok_or_else(|| FlagreelError::encode("frame buffer does not match its size"))?;
        let delay = image::Delay::from_numer_denom_ms(self.opts.frame_delay_ms, 1);
        open.encoder
            .encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))
            .map_err(|e| FlagreelError::encode(format!("failed to encode gif frame {}: {e}", idx.0)))?;
        open.last = Some(idx);
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> FlagreelResult<()> {
        let Some(open) = self.open.take() else {
            return Err(FlagreelError::encode("gif sink is not open"));
        };
        if open.last.is_none() {
            let _ = std::fs::remove_file(&self.tmp_path);
            return Err(FlagreelError::encode("no frames were pushed to the gif sink"));
        }
        // The encoder writes the trailer and the buffered writer flushes when they are dropped.
        drop(open);

        if let Err(e) = verify_trailer(&self.tmp_path) {
            let _ = std::fs::remove_file(&self.tmp_path);
            return Err(e);
        }
        if let Err(e) = std::fs::rename(&self.tmp_path, &self.opts.out_path) {
            let _ = std::fs::remove_file(&self.tmp_path);
            return Err(FlagreelError::encode(format!(
                "failed to move gif into '{}': {e}",
                self.opts.out_path.display()
            )));
        }
        tracing::info!(
            path = %self.opts.out_path.display(),
            frames = self.frames_written,
            "gif written"
        );
        Ok(())
    }
}

impl Drop for GifSink {
    fn drop(&mut self) {
        if self.open.is_some() {
            tracing::warn!(
                path = %self.opts.out_path.display(),
                "gif sink dropped before end, discarding partial output"
            );
        }
        self.discard();
    }
}

fn verify_trailer(path: &Path) -> FlagreelResult<()> {
    let mut file =
        File::open(path).with_context(|| format!("failed to reopen '{}'", path.display()))?;
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .and_then(|_| file.read_exact(&mut last))
        .with_context(|| format!("failed to read back '{}'", path.display()))?;
    if last[0] != GIF_TRAILER {
        return Err(FlagreelError::encode(format!(
            "'{}' is truncated (missing gif trailer)",
            path.display()
        )));
    }
    file.sync_all()
        .with_context(|| format!("failed to sync '{}'", path.display()))?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> FlagreelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
