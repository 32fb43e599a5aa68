//! Drawing surfaces and rendered frames.

/// `vello_cpu` surface.
pub mod cpu;
/// Rendered RGBA8 frames.
pub mod frame;
/// Closed shapes shared by raster and vector output.
pub mod outline;
/// Draw-call recorder.
pub mod recording;
/// The drawing surface contract.
pub mod surface;
/// Label fonts and text layout.
pub mod text;
