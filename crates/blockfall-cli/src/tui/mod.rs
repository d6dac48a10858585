//! Terminal event loop that drives an [`App`].
//!
//! The loop produces three kinds of events: gravity ticks at an interval the
//! app reprograms as the match speeds up, render requests throttled to a
//! frame rate, and terminal input.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
