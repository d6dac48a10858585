use blockfall_engine::{Intent, Phase};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::view::widgets::KeyBinding;

/// What a key press asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum Action {
    Intent(Intent),
    Quit,
}

/// Maps a terminal event to an action. Key releases and repeats reported by
/// some terminals are ignored.
pub fn action_for_event(event: &Event) -> Option<Action> {
    let key = event.as_key_event()?;
    if key.kind != KeyEventKind::Press {
        return None;
    }
    action_for_key(key.code, key.modifiers)
}

fn action_for_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    let action = match code {
        KeyCode::Left => Intent::MoveLeft.into(),
        KeyCode::Right => Intent::MoveRight.into(),
        KeyCode::Down => Intent::SoftDrop.into(),
        KeyCode::Up => Intent::Rotate.into(),
        KeyCode::Char(' ') => Intent::HardDrop.into(),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('p' | 'P') => Intent::TogglePause.into(),
        KeyCode::Char('r' | 'R') => Intent::Restart.into(),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Key bindings worth showing in the current phase.
pub fn key_bindings(phase: Phase) -> &'static [KeyBinding<'static>] {
    match phase {
        Phase::Playing => &[
            (&["←", "→"], "Move"),
            (&["↓"], "Soft Drop"),
            (&["↑"], "Rotate"),
            (&["Space"], "Hard Drop"),
            (&["P"], "Pause"),
            (&["R"], "Restart"),
            (&["Q"], "Quit"),
        ],
        Phase::Paused => &[(&["P"], "Resume"), (&["R"], "Restart"), (&["Q"], "Quit")],
        Phase::GameOver => &[(&["R"], "Restart"), (&["Q"], "Quit")],
    }
}
