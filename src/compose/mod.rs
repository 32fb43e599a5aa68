//! Seamlessly looping scroll banners built from glyph images.

/// Frame rendering for the scroll loop.
pub mod compositor;
/// Cell grid, loop extension and frame math.
pub mod layout;
/// Entry filtering and de-duplication.
pub mod select;
