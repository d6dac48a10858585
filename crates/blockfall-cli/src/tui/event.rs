use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The gravity interval elapsed.
    Gravity,
    /// The screen should be redrawn.
    Render,
    /// Key input, resize and other terminal events.
    Terminal(CrosstermEvent),
}
