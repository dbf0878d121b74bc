//! Application state and key handling.
//!
//! [`App`] owns the components and everything around them. Every change ends
//! in [`App::publish`], which snapshots the visible state into the
//! [`FrameInputs`] signal that the render pipeline derives frames from.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use spark_signals::{Signal, signal};

use crate::components::{Component, catalog};
use crate::config::Settings;
use crate::pipeline::frame::FrameInputs;
use crate::pipeline::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::scene::Scene;
use crate::search::{NOT_FOUND, SearchOutcome, SearchPrompt, search};
use crate::state::alerts::{AlertCenter, AlertLevel};
use crate::state::animate::{Advance, Pacing, Player};
use crate::state::keyboard::{self, KeyboardEvent};
use crate::theme::{Theme, next_preset};

pub struct App {
    components: Vec<Box<dyn Component>>,
    active: usize,
    rng: StdRng,
    player: Player,
    alerts: AlertCenter,
    prompt: SearchPrompt,
    theme: Theme,
    info: String,
    scene: Scene,
    size: (u16, u16),
    running: bool,
    frame: Signal<FrameInputs>,
}

fn resting_info(component: &dyn Component) -> String {
    format!("{}: pick an operation from the controls below.", component.title())
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let components = catalog();
        let active = settings.start.min(components.len() - 1);
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scene = components[active].scene();
        let info = resting_info(components[active].as_ref());

        let mut app = Self {
            components,
            active,
            rng,
            player: Player::new(Pacing::new(settings.speed_ms)),
            alerts: AlertCenter::new(),
            prompt: SearchPrompt::default(),
            theme: settings.theme,
            info,
            scene,
            size: (MIN_WIDTH, MIN_HEIGHT),
            running: true,
            frame: signal(FrameInputs::default()),
        };
        app.publish();
        app
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn component(&self) -> &dyn Component {
        self.components[self.active].as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn alerts(&self) -> &AlertCenter {
        &self.alerts
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The signal the frame pipeline reads.
    pub fn frame_signal(&self) -> Signal<FrameInputs> {
        self.frame.clone()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.publish();
    }

    pub fn handle_key(&mut self, event: &KeyboardEvent, now: Instant) {
        if !event.is_press() {
            return;
        }
        keyboard::update_last_event(event.clone());

        if event.is_interrupt() {
            self.quit();
        } else if self.prompt.is_open() {
            self.handle_prompt_key(event, now);
        } else {
            self.handle_command_key(event, now);
        }
        self.publish();
    }

    fn handle_prompt_key(&mut self, event: &KeyboardEvent, now: Instant) {
        match event.key.as_str() {
            "Enter" => {
                let query = self.prompt.submit();
                match search(&query, &self.components) {
                    SearchOutcome::Found(index) => self.switch_to(index, now),
                    SearchOutcome::NotFound => self.alerts.raise(AlertLevel::Danger, NOT_FOUND, now),
                    SearchOutcome::Ignored => {}
                }
            }
            "Escape" => self.prompt.cancel(),
            "Backspace" => self.prompt.backspace(),
            _ => {
                if let Some(c) = event.char() {
                    self.prompt.push(c);
                }
            }
        }
    }

    fn handle_command_key(&mut self, event: &KeyboardEvent, now: Instant) {
        let count = self.components.len();
        match event.key.as_str() {
            "q" | "Escape" => self.quit(),
            "ArrowRight" | "Tab" => self.switch_to((self.active + 1) % count, now),
            "ArrowLeft" | "BackTab" => self.switch_to((self.active + count - 1) % count, now),
            "/" => self.prompt.open(),
            " " => {
                let advance = self.player.finish();
                self.apply(advance, now);
            }
            "+" | "=" => self.player.set_pacing(self.player.pacing().faster()),
            "-" | "_" => self.player.set_pacing(self.player.pacing().slower()),
            "T" => self.theme = next_preset(self.theme.name),
            _ => {
                if let Some(c) = event.char() {
                    self.perform(c, now);
                }
            }
        }
    }

    /// Show component `index`, finishing whatever is playing.
    pub fn switch_to(&mut self, index: usize, now: Instant) {
        if index >= self.components.len() {
            return;
        }
        let advance = self.player.finish();
        self.apply(advance, now);

        self.active = index;
        self.scene = self.components[index].scene();
        self.info = resting_info(self.components[index].as_ref());
    }

    /// Run the active component's operation bound to `key`.
    ///
    /// Ignored while an animation plays or when no operation uses `key`.
    pub fn perform(&mut self, key: char, now: Instant) {
        if self.player.is_playing() {
            return;
        }
        let component = &mut self.components[self.active];
        let Some(info) = component.info(key) else {
            return;
        };
        self.info = info.to_string();

        match component.perform(key, &mut self.rng) {
            Ok(animation) => {
                let advance = self.player.start(animation, now);
                self.apply(advance, now);
            }
            Err(err) => self.alerts.raise(err.level(), err.to_string(), now),
        }
    }

    /// Advance the player and expire old alerts.
    pub fn tick(&mut self, now: Instant) {
        let advance = self.player.advance(now);
        self.apply(advance, now);
        self.alerts.expire(now);
        self.publish();
    }

    fn apply(&mut self, advance: Advance, now: Instant) {
        match advance {
            Advance::Show(scene) => self.scene = scene,
            Advance::Finished(alert) => {
                if let Some((level, message)) = alert {
                    self.alerts.raise(level, message, now);
                }
                self.scene = self.components[self.active].scene();
            }
            Advance::Idle | Advance::Hold => {}
        }
    }

    pub fn frame_inputs(&self) -> FrameInputs {
        FrameInputs {
            width: self.size.0,
            height: self.size.1,
            theme: self.theme.clone(),
            tabs: self.components.iter().map(|c| c.title()).collect(),
            active: self.active,
            scene: self.scene.clone(),
            info: self.info.clone(),
            alerts: self
                .alerts
                .active()
                .map(|a| (a.level, a.message.clone()))
                .collect(),
            log: self.alerts.log().cloned().collect(),
            operations: self.component().operations().to_vec(),
            search: self
                .prompt
                .is_open()
                .then(|| self.prompt.query().to_string()),
            speed_ms: self.player.pacing().speed_ms(),
            progress: self.player.progress(),
            last_key: keyboard::last_key(),
        }
    }

    /// Push the current state to the frame signal.
    pub fn publish(&mut self) {
        self.frame.set(self.frame_inputs());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::state::keyboard::Modifiers;

    fn app() -> App {
        let config = Config {
            seed: Some(42),
            ..Config::default()
        };
        App::new(config.validate(&catalog()).unwrap())
    }

    fn press(app: &mut App, key: &str, now: Instant) {
        app.handle_key(&KeyboardEvent::new(key), now);
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            press(app, &c.to_string(), now);
        }
    }

    #[test]
    fn test_switching_wraps_around() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, "ArrowLeft", now);
        assert_eq!(app.active(), 10);
        assert_eq!(app.component().id(), "quiz");
        press(&mut app, "Tab", now);
        assert_eq!(app.active(), 0);
        press(&mut app, "ArrowRight", now);
        assert_eq!(app.component().id(), "string");
    }

    #[test]
    fn test_operation_plays_and_ignores_keys_meanwhile() {
        let mut app = app();
        let now = Instant::now();
        app.switch_to(3, now);

        press(&mut app, "p", now);
        assert_eq!(app.info(), "Push: Places a new element on top of the stack.");
        assert!(app.player().is_playing());

        // A second push while playing is dropped.
        press(&mut app, "p", now);
        press(&mut app, " ", now);
        assert!(!app.player().is_playing());

        let log: Vec<_> = app.alerts().log().map(|e| e.message.clone()).collect();
        assert_eq!(log.len(), 1);
        assert!(log[0].starts_with("Pushed "));
        assert_eq!(app.scene(), &app.component().scene());
    }

    #[test]
    fn test_ticks_play_to_the_end() {
        let mut app = app();
        let mut now = Instant::now();
        app.switch_to(3, now);
        press(&mut app, "p", now);

        for _ in 0..100 {
            if !app.player().is_playing() {
                break;
            }
            now += Duration::from_secs(1);
            app.tick(now);
        }
        assert!(!app.player().is_playing());
        assert_eq!(app.alerts().latest().unwrap().level, AlertLevel::Success);
    }

    #[test]
    fn test_refused_operation_raises_alert() {
        let mut app = app();
        let now = Instant::now();
        app.switch_to(3, now);
        press(&mut app, "o", now);

        assert_eq!(app.info(), "Pop: Removes the element on top of the stack.");
        let alert = app.alerts().latest().unwrap();
        assert_eq!(alert.level, AlertLevel::Danger);
        assert_eq!(alert.message, "Stack underflow!");
        assert!(!app.player().is_playing());
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        let mut app = app();
        let now = Instant::now();
        let info = app.info().to_string();
        press(&mut app, "z", now);
        assert_eq!(app.info(), info);
        assert_eq!(app.alerts().log().count(), 0);
    }

    #[test]
    fn test_search_prompt() {
        let mut app = app();
        let now = Instant::now();

        press(&mut app, "/", now);
        type_text(&mut app, "heap", now);
        assert_eq!(app.frame_inputs().search.as_deref(), Some("heap"));
        press(&mut app, "Enter", now);
        assert_eq!(app.active(), 6);
        assert_eq!(app.frame_inputs().search, None);

        press(&mut app, "/", now);
        type_text(&mut app, "splay", now);
        press(&mut app, "Enter", now);
        assert_eq!(app.active(), 6);
        assert_eq!(app.alerts().latest().unwrap().message, NOT_FOUND);
    }

    #[test]
    fn test_prompt_swallows_command_keys() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, "/", now);
        type_text(&mut app, "q", now);
        assert!(app.is_running());
        press(&mut app, "Escape", now);
        assert!(app.is_running());
        assert_eq!(app.frame_inputs().search, None);
    }

    #[test]
    fn test_speed_and_theme_keys() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, "+", now);
        assert_eq!(app.player().pacing().speed_ms(), 450);
        press(&mut app, "-", now);
        press(&mut app, "-", now);
        assert_eq!(app.player().pacing().speed_ms(), 550);

        press(&mut app, "T", now);
        assert_eq!(app.theme().name, "classic");
    }

    #[test]
    fn test_quit_keys() {
        let now = Instant::now();

        let mut app = app();
        press(&mut app, "q", now);
        assert!(!app.is_running());

        let mut app = self::app();
        app.handle_key(&KeyboardEvent::with_modifiers("c", Modifiers::ctrl()), now);
        assert!(!app.is_running());
    }

    #[test]
    fn test_frame_signal_tracks_state() {
        let mut app = app();
        let frame = app.frame_signal();
        let now = Instant::now();

        app.resize(120, 40);
        press(&mut app, "ArrowRight", now);
        let inputs = frame.get();
        assert_eq!((inputs.width, inputs.height), (120, 40));
        assert_eq!(inputs.active, 1);
        assert_eq!(inputs.tabs.len(), 11);
        assert_eq!(inputs.last_key, "ArrowRight");
    }
}
