// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback position and stepping.

use crate::settings::PlaybackSettings;
use serde::{Deserialize, Serialize};

/// Playback direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Animating into the current step from the previous one
    Forward,
    /// Animating into the current step from the next one
    Backward,
    /// Holding the current step
    #[default]
    Pause,
}

/// Where playback is on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackPosition {
    /// Current step
    pub index: i64,
    /// Playback direction
    pub direction: Direction,
    /// Progress into the step, nominally in `[0, 1)`
    pub progress: f32,
}

impl PlaybackPosition {
    /// Create a position
    pub fn new(index: i64, direction: Direction, progress: f32) -> Self {
        Self {
            index,
            direction,
            progress,
        }
    }

    /// Position holding a step
    pub fn paused(index: i64) -> Self {
        Self::new(index, Direction::Pause, 0.0)
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Stopped
    #[default]
    Stopped,
    /// Playing forward
    Playing,
    /// Paused
    Paused,
    /// Playing in reverse
    Reverse,
}

/// Steps a playback position through a document's timeline
#[derive(Debug, Clone)]
pub struct PlaybackController {
    /// Current step
    pub step: i64,
    /// Progress into the current step
    pub progress: f32,
    /// Playback state
    pub state: PlaybackState,
    /// Playback speed multiplier
    pub speed: f32,
    /// Seconds each step takes to animate
    pub step_duration: f32,
    /// Whether playback wraps at either end
    pub looping: bool,
}

impl PlaybackController {
    /// Create a new playback controller
    pub fn new() -> Self {
        Self {
            step: 0,
            progress: 0.0,
            state: PlaybackState::Stopped,
            speed: 1.0,
            step_duration: 1.0,
            looping: false,
        }
    }

    /// Create a controller from playback settings
    pub fn from_settings(settings: &PlaybackSettings) -> Self {
        Self {
            speed: settings.speed,
            step_duration: settings.step_duration,
            looping: settings.looping,
            ..Self::new()
        }
    }

    /// Advance playback by `delta_time` seconds over `step_count` steps
    pub fn update(&mut self, delta_time: f32, step_count: u32) {
        if !self.is_playing() {
            return;
        }
        if step_count == 0 {
            self.state = PlaybackState::Stopped;
            return;
        }

        let progress =
            self.progress + delta_time * self.speed / self.step_duration.max(f32::EPSILON);
        if !progress.is_finite() {
            tracing::warn!(progress, "Playback progress is not finite; stopping");
            self.state = PlaybackState::Stopped;
            return;
        }
        if progress < 1.0 {
            self.progress = progress;
            return;
        }

        // Whole steps are consumed at once so large deltas stay bounded.
        let steps = progress.floor();
        self.progress = progress - steps;
        let steps = steps as u64;
        match self.state {
            PlaybackState::Playing => self.advance(steps, step_count),
            PlaybackState::Reverse => self.retreat(steps, step_count),
            PlaybackState::Paused | PlaybackState::Stopped => {}
        }
    }

    /// Finish `steps` forward steps
    fn advance(&mut self, steps: u64, step_count: u32) {
        let last = i64::from(step_count) - 1;
        let target = i128::from(self.step) + i128::from(steps);

        if target <= i128::from(last) {
            self.step = self.step.saturating_add_unsigned(steps);
            tracing::debug!(step = self.step, "Advanced to step");
        } else if self.looping {
            self.step = wrap_step(target, step_count);
            tracing::debug!(step = self.step, "Looped past last step");
        } else {
            self.step = last;
            self.progress = 1.0;
            self.state = PlaybackState::Stopped;
            tracing::debug!(step = self.step, "Reached last step");
        }
    }

    /// Finish `steps` reverse steps
    fn retreat(&mut self, steps: u64, step_count: u32) {
        let target = i128::from(self.step) - i128::from(steps);

        if target >= 0 {
            self.step = self.step.saturating_sub_unsigned(steps);
            tracing::debug!(step = self.step, "Retreated to step");
        } else if self.looping {
            self.step = wrap_step(target, step_count);
            tracing::debug!(step = self.step, "Looped past first step");
        } else {
            self.step = 0;
            self.progress = 1.0;
            self.state = PlaybackState::Stopped;
            tracing::debug!("Reached first step");
        }
    }

    /// Position to resolve the current frame at
    pub fn position(&self) -> PlaybackPosition {
        let direction = match self.state {
            PlaybackState::Playing => Direction::Forward,
            PlaybackState::Reverse => Direction::Backward,
            PlaybackState::Paused | PlaybackState::Stopped => Direction::Pause,
        };
        PlaybackPosition::new(self.step, direction, self.progress)
    }

    /// Play forward from the current step
    pub fn play(&mut self) {
        if self.state != PlaybackState::Paused {
            self.progress = 0.0;
        }
        self.state = PlaybackState::Playing;
    }

    /// Play in reverse from the current step
    ///
    /// Reverse playback animates into `step - 1`, so the step moves back first.
    pub fn play_reverse(&mut self) {
        if self.state != PlaybackState::Paused {
            self.progress = 0.0;
            self.step = self.step.saturating_sub(1).max(0);
        }
        self.state = PlaybackState::Reverse;
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.is_playing() {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop and reset to the first step
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.step = 0;
        self.progress = 0.0;
    }

    /// Toggle play/pause
    pub fn toggle_playback(&mut self) {
        match self.state {
            PlaybackState::Playing | PlaybackState::Reverse => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    /// Jump to a step
    pub fn seek(&mut self, step: i64) {
        self.step = step.max(0);
        self.progress = 0.0;
    }

    /// Is currently playing (forward or reverse)
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing | PlaybackState::Reverse)
    }
}

/// `step` wrapped into `0..step_count`
fn wrap_step(step: i128, step_count: u32) -> i64 {
    // The remainder is below `step_count`, so it always fits.
    step.rem_euclid(i128::from(step_count)) as i64
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}
