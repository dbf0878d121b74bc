//! Reactive Pipeline
//!
//! Connects application state to terminal output.
//!
//! ```text
//! App::publish → Signal<FrameInputs> → frame derived → render effect → DiffRenderer
//! ```
//!
//! - **layout**: taffy flexbox for the panels
//! - **paint**: scene shapes into a panel
//! - **frame**: the pure frame composition and its derived
//! - **terminal**: raw mode and the alternate screen
//! - **mount**: render effect and event loop
//!
//! The derived is pure. Only the render effect touches the terminal.

pub mod frame;
pub mod layout;
pub mod mount;
pub mod paint;
pub mod terminal;

pub use frame::{FrameInputs, compose_frame, create_frame_derived};
pub use layout::{Panels, compute_panels};
pub use mount::{MountHandle, mount, run, tick};
pub use paint::paint_scene;
pub use terminal::{TerminalGuard, terminal_size};
