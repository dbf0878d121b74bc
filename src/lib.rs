//! # algovista
//!
//! Classic data structures, animated step by step in the terminal.
//!
//! Each visualizer holds a small textbook structure. An operation mutates it
//! and records every intermediate moment (comparisons, swaps, traversal
//! order) as an [`Animation`](components::Animation). The app plays those
//! steps back at the configured speed.
//!
//! ## Architecture
//!
//! ```text
//! key → App → Component::perform → Animation → Player
//!     → App::publish → Signal<FrameInputs> → frame derived → render effect
//! ```
//!
//! Reactivity comes from [spark-signals](https://docs.rs/spark-signals).
//! Panel layout is taffy flexbox.
//!
//! ## Modules
//!
//! - [`components`] - The visualizers and the quiz
//! - [`scene`] - Resolution-independent drawing lists
//! - [`state`] - Alerts, step player, keyboard input
//! - [`pipeline`] - Layout, painting, frame derived, mount
//! - [`renderer`] - Frame buffer and diff rendering
//! - [`theme`] - Colour presets and highlight tones

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod search;
pub mod state;
pub mod theme;
pub mod types;

pub use app::App;
pub use components::{Animation, Component, Operation, Pace, Section, Step, catalog};
pub use config::{Config, Settings};
pub use error::{AppError, Result, VisualError};
pub use pipeline::{FrameInputs, MountHandle, compose_frame, mount, run};
pub use renderer::{DiffRenderer, FrameBuffer};
pub use scene::{Scene, Shape};
pub use state::{AlertCenter, AlertLevel, Pacing, Player};
pub use theme::{Theme, Tone};
pub use types::*;
