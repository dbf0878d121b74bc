//! Terminal rendering.
//!
//! - [`FrameBuffer`]: the cell grid everything paints into
//! - [`DiffRenderer`]: writes only what changed since the last frame
//! - [`ansi`]: raw escape sequences

pub mod ansi;
mod buffer;
mod diff;
mod output;

pub use buffer::{FrameBuffer, char_width, string_width, truncate, wrap_text};
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
