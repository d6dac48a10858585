use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RenderMode {
    /// Render after every state change (gravity or terminal event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (FPS).
    ///
    /// Rates that are zero, negative or not finite disable throttling.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        if rate.is_finite() && rate > 0.0 {
            Self::Throttled(Duration::from_secs_f64(1.0 / rate))
        } else {
            Self::OnDirty
        }
    }
}

/// Event loop state management.
///
/// Tracks the gravity timer and render throttling and returns the next event
/// via [`Self::next`]. While no gravity interval is set, no gravity events
/// are generated.
#[derive(Debug)]
pub(super) struct EventLoop {
    gravity_interval: Option<Duration>,
    render_mode: RenderMode,
    last_gravity: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop`.
    ///
    /// Gravity is off and render mode defaults to `OnDirty`.
    pub(super) fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            gravity_interval: None,
            render_mode: RenderMode::default(),
            last_gravity: now,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Reprograms the gravity timer.
    ///
    /// Setting the interval it already has keeps the running countdown;
    /// any other change starts a fresh countdown from `now`.
    pub(super) fn set_gravity_interval(&mut self, interval: Option<Duration>, now: Instant) {
        if self.gravity_interval != interval {
            self.gravity_interval = interval;
            self.last_gravity = now;
        }
    }

    /// Starts a fresh gravity countdown without changing the interval.
    pub(super) fn reset_gravity_timer(&mut self, now: Instant) {
        self.last_gravity = now;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until gravity or a render is due, or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.gravity_interval
            && now.duration_since(self.last_gravity) >= interval
        {
            self.last_gravity = now;
            self.dirty = true;
            return Some(TuiEvent::Gravity);
        }

        let do_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }

        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_gravity_at = self
            .gravity_interval
            .map(|interval| self.last_gravity + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_gravity_at, next_render_at]
            .into_iter()
            .flatten()
            .min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
