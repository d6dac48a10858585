use blockfall_engine::{Intent, IntentQueue, MatchController, MatchSnapshot};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    input::{self, Action},
    tui::{App, RenderMode, Runtime},
    view::widgets::{KeyBindingDisplay, MatchDisplay},
};

/// Interactive match: turns key presses and gravity events into intents,
/// feeds them through the queue, and keeps the gravity timer in step with
/// the controller.
#[derive(Debug)]
pub(crate) struct PlayApp {
    controller: MatchController,
    intents: IntentQueue,
    snapshot: MatchSnapshot,
    frame_rate: f64,
    show_preview: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(controller: MatchController, frame_rate: f64, show_preview: bool) -> Self {
        let snapshot = controller.snapshot();
        Self {
            controller,
            intents: IntentQueue::new(),
            snapshot,
            frame_rate,
            show_preview,
            is_exiting: false,
        }
    }

    /// Applies everything queued so far, then refreshes the snapshot and the
    /// gravity timer.
    fn dispatch(&mut self, runtime: &mut Runtime) {
        let outcomes = self.intents.drain_into(&mut self.controller);
        // A new piece starts its fall with a full gravity interval
        if outcomes
            .iter()
            .any(|outcome| outcome.is_settled() || outcome.is_restarted())
        {
            runtime.reset_gravity_timer();
        }
        self.sync_gravity(runtime);
        self.snapshot = self.controller.snapshot();
    }

    /// Gravity only runs while playing, at the interval for the current level.
    fn sync_gravity(&self, runtime: &mut Runtime) {
        let interval = self
            .controller
            .phase()
            .is_playing()
            .then(|| self.controller.gravity_interval());
        runtime.set_gravity_interval(interval);
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(self.frame_rate));
        self.sync_gravity(runtime);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        match input::action_for_event(event) {
            Some(Action::Intent(intent)) => {
                self.intents.push(intent);
                self.dispatch(runtime);
            }
            Some(Action::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let match_display = MatchDisplay::new(&self.snapshot).show_preview(self.show_preview);
        let help = KeyBindingDisplay::new(input::key_bindings(self.snapshot.phase));

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(match_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(&match_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn gravity(&mut self, runtime: &mut Runtime) {
        self.intents.push(Intent::GravityTick);
        self.dispatch(runtime);
    }
}
