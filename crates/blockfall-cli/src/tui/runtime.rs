use std::{
    io,
    time::{Duration, Instant},
};

use crate::tui::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Terminal application runtime.
///
/// Owns the event loop and executes applications that implement the
/// [`App`] trait.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time between gravity events.
    ///
    /// Pass `None` to stop gravity, e.g. while paused. Passing the current
    /// interval again does not restart the countdown.
    pub fn set_gravity_interval(&mut self, interval: Option<Duration>) {
        self.events.set_gravity_interval(interval, Instant::now());
    }

    /// Restarts the gravity countdown, e.g. after a new piece spawns.
    pub fn reset_gravity_timer(&mut self) {
        self.events.reset_gravity_timer(Instant::now());
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - gravity: calls `app.gravity()`
    ///    - render: calls `app.draw()`
    ///    - terminal input: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Gravity => {
                        app.gravity(&mut self);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Terminal(event) => {
                        app.handle_event(&mut self, &event);
                    }
                }
            }
            Ok(())
        })
    }
}
