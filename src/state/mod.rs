//! State Module - Runtime state behind the interface
//!
//! - **Alerts** - Stacked, expiring alerts and the activity log
//! - **Animate** - Step player that paces recorded animations
//! - **Keyboard** - Key event types, last-key signal
//! - **Input** - crossterm event conversion and polling

pub mod alerts;
pub mod animate;
pub mod input;
pub mod keyboard;

pub use alerts::{Alert, AlertCenter, AlertLevel, LogEntry};
pub use animate::{Advance, Pacing, Player};
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
