//! Mount API - terminal lifecycle and the render effect.
//!
//! ```ignore
//! let mut app = App::new(settings);
//! let handle = mount::mount(&mut app)?;
//! mount::run(&handle, &mut app)?;
//! handle.unmount()?;
//! ```
//!
//! The render effect is the only place that writes frames. It reads the
//! derived frame buffer, so it re-runs exactly when [`App::publish`] stores
//! a snapshot that differs from the last one.

use std::io;
use std::time::{Duration, Instant};

use spark_signals::{effect, flush_sync};

use super::frame::create_frame_derived;
use super::terminal::{TerminalGuard, terminal_size};
use crate::app::App;
use crate::renderer::DiffRenderer;
use crate::state::input::{self, InputEvent};

/// Input poll timeout; about 60 ticks a second.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Keeps the render effect alive and the terminal in fullscreen mode.
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    guard: TerminalGuard,
}

impl MountHandle {
    /// Stop rendering and restore the terminal.
    pub fn unmount(mut self) -> io::Result<()> {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        self.guard.restore()
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

/// Enter fullscreen and start rendering `app`.
pub fn mount(app: &mut App) -> io::Result<MountHandle> {
    let guard = TerminalGuard::enter()?;

    let (width, height) = terminal_size()?;
    app.resize(width, height);

    let frame = create_frame_derived(app.frame_signal());
    let mut renderer = DiffRenderer::new();
    let mut last_size = None;

    let stop = effect(move || {
        let buffer = frame.get();
        let size = (buffer.width(), buffer.height());

        // A resize leaves stale cells outside the new frame.
        let _ = if last_size != Some(size) {
            last_size = Some(size);
            renderer.render_full(&buffer)
        } else {
            renderer.render(&buffer)
        };
    });
    flush_sync();

    Ok(MountHandle {
        stop_effect: Some(Box::new(stop)),
        guard,
    })
}

/// One turn of the event loop.
///
/// Returns `Ok(false)` once the app has quit.
pub fn tick(app: &mut App) -> io::Result<bool> {
    if let Some(event) = input::poll_event(FRAME_INTERVAL)? {
        match event {
            InputEvent::Key(key) => app.handle_key(&key, Instant::now()),
            InputEvent::Resize(width, height) => app.resize(width, height),
            InputEvent::None => {}
        }
    }
    app.tick(Instant::now());
    flush_sync();

    Ok(app.is_running())
}

/// Run the event loop until the app quits.
pub fn run(app: &mut App) -> io::Result<()> {
    while tick(app)? {}
    Ok(())
}
