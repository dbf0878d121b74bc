//! Step Player - Timed playback of recorded animations
//!
//! Operations run to completion immediately and hand back an [`Animation`].
//! The player then shows its steps one at a time, holding each for the
//! duration its [`Pace`] maps to at the configured speed.
//!
//! The player owns no timer. The event loop calls [`Player::advance`] on
//! every tick with the current instant, which keeps playback deterministic
//! under test.
//!
//! # Example
//!
//! ```ignore
//! let mut player = Player::new(Pacing::default());
//! let first = player.start(animation, Instant::now());
//! loop {
//!     match player.advance(Instant::now()) {
//!         Advance::Show(scene) => paint(scene),
//!         Advance::Finished(alert) => break,
//!         _ => {}
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

use crate::components::{Animation, Pace, Step};
use crate::scene::Scene;
use crate::state::alerts::AlertLevel;

pub const DEFAULT_SPEED_MS: u64 = 500;
pub const MIN_SPEED_MS: u64 = 50;
pub const MAX_SPEED_MS: u64 = 5000;

/// How much `+` and `-` change the speed.
pub const SPEED_STEP_MS: u64 = 50;

// =============================================================================
// PACING
// =============================================================================

/// Converts step paces into hold durations for one animation speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    speed_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_MS)
    }
}

impl Pacing {
    /// Speed is clamped into `MIN_SPEED_MS..=MAX_SPEED_MS`.
    pub fn new(speed_ms: u64) -> Self {
        Self {
            speed_ms: speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS),
        }
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// A shorter beat.
    pub fn faster(self) -> Self {
        Self::new(self.speed_ms.saturating_sub(SPEED_STEP_MS))
    }

    /// A longer beat.
    pub fn slower(self) -> Self {
        Self::new(self.speed_ms + SPEED_STEP_MS)
    }

    pub fn duration(&self, pace: Pace) -> Duration {
        let ms = match pace {
            Pace::Beat => self.speed_ms,
            Pace::Half => self.speed_ms / 2,
            // 200 ms at the default 500 ms beat
            Pace::Settle => self.speed_ms * 2 / 5,
            Pace::Glide => self.speed_ms / 20,
        };
        Duration::from_millis(ms)
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// What a call into the player produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Nothing is playing.
    Idle,
    /// The current step is still being held.
    Hold,
    /// A new step is on screen.
    Show(Scene),
    /// The last step has been held; raise its alert.
    Finished(Option<(AlertLevel, String)>),
}

#[derive(Debug)]
struct Playback {
    steps: Vec<Step>,
    index: usize,
    due: Instant,
    alert: Option<(AlertLevel, String)>,
}

#[derive(Debug, Default)]
pub struct Player {
    pacing: Pacing,
    playback: Option<Playback>,
}

impl Player {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            playback: None,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Applies from the next step on.
    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// `(current step, total steps)`, 1-based, while playing.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.playback.as_ref().map(|p| (p.index + 1, p.steps.len()))
    }

    /// Begin `animation`, replacing anything still playing.
    ///
    /// An animation without steps finishes at once.
    pub fn start(&mut self, animation: Animation, now: Instant) -> Advance {
        let Animation { steps, alert } = animation;
        let Some(first) = steps.first() else {
            self.playback = None;
            return Advance::Finished(alert);
        };

        let scene = first.scene.clone();
        let due = now + self.pacing.duration(first.pace);
        self.playback = Some(Playback {
            steps,
            index: 0,
            due,
            alert,
        });
        Advance::Show(scene)
    }

    pub fn advance(&mut self, now: Instant) -> Advance {
        let Some(playback) = self.playback.as_mut() else {
            return Advance::Idle;
        };
        if now < playback.due {
            return Advance::Hold;
        }

        playback.index += 1;
        match playback.steps.get(playback.index) {
            Some(step) => {
                playback.due = now + self.pacing.duration(step.pace);
                Advance::Show(step.scene.clone())
            }
            None => self.finish(),
        }
    }

    /// Skip the remaining steps.
    pub fn finish(&mut self) -> Advance {
        match self.playback.take() {
            Some(playback) => Advance::Finished(playback.alert),
            None => Advance::Idle,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(title: &str) -> Scene {
        Scene::new(title)
    }

    fn two_steps() -> Animation {
        let mut anim = Animation::new();
        anim.step(scene("one"), Pace::Beat);
        anim.step(scene("two"), Pace::Settle);
        anim.success("done")
    }

    #[test]
    fn test_pacing_durations() {
        let pacing = Pacing::default();
        assert_eq!(pacing.duration(Pace::Beat), Duration::from_millis(500));
        assert_eq!(pacing.duration(Pace::Half), Duration::from_millis(250));
        assert_eq!(pacing.duration(Pace::Settle), Duration::from_millis(200));
        assert_eq!(pacing.duration(Pace::Glide), Duration::from_millis(25));

        let slow = Pacing::new(1000);
        assert_eq!(slow.duration(Pace::Settle), Duration::from_millis(400));
    }

    #[test]
    fn test_pacing_clamps() {
        assert_eq!(Pacing::new(1).speed_ms(), MIN_SPEED_MS);
        assert_eq!(Pacing::new(99_999).speed_ms(), MAX_SPEED_MS);
        assert_eq!(Pacing::new(MIN_SPEED_MS).faster().speed_ms(), MIN_SPEED_MS);
        assert_eq!(Pacing::default().slower().speed_ms(), 550);
    }

    #[test]
    fn test_plays_each_step_then_finishes() {
        let mut player = Player::default();
        let t0 = Instant::now();

        assert_eq!(player.start(two_steps(), t0), Advance::Show(scene("one")));
        assert_eq!(player.advance(t0 + Duration::from_millis(100)), Advance::Hold);

        let t1 = t0 + Duration::from_millis(500);
        assert_eq!(player.advance(t1), Advance::Show(scene("two")));
        assert_eq!(player.progress(), Some((2, 2)));

        let t2 = t1 + Duration::from_millis(200);
        assert_eq!(
            player.advance(t2),
            Advance::Finished(Some((AlertLevel::Success, "done".into())))
        );
        assert!(!player.is_playing());
        assert_eq!(player.advance(t2), Advance::Idle);
    }

    #[test]
    fn test_empty_animation_finishes_immediately() {
        let mut player = Player::default();
        let anim = Animation::new().with_alert(AlertLevel::Info, "noop");
        assert_eq!(
            player.start(anim, Instant::now()),
            Advance::Finished(Some((AlertLevel::Info, "noop".into())))
        );
        assert!(!player.is_playing());
    }

    #[test]
    fn test_finish_skips_remaining_steps() {
        let mut player = Player::default();
        player.start(two_steps(), Instant::now());
        assert!(player.is_playing());
        assert!(matches!(player.finish(), Advance::Finished(Some(_))));
        assert_eq!(player.finish(), Advance::Idle);
    }
}
