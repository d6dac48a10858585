//! Match logic and state management.
//!
//! This module drives the core data structures through a single match:
//!
//! - [`MatchController`] - Owns the board and pieces and applies intents
//! - [`Intent`] / [`IntentQueue`] - Ordered requests from input and timers
//! - [`MatchStats`] - Score, level, lines cleared and gravity interval
//! - [`PieceSource`] - Where piece kinds come from ([`RandomPieceSource`], [`ScriptedPieceSource`])
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`MatchSnapshot`] - Read-only state handed to renderers
//!
//! # Match Flow
//!
//! 1. Create a [`MatchController`] from a [`MatchConfig`]
//! 2. The host applies player intents and a [`Intent::GravityTick`] every
//!    [`MatchController::gravity_interval`]
//! 3. When the active piece can no longer fall it settles: full rows are
//!    cleared, the score is updated and the next piece spawns
//! 4. If the new piece does not fit, the match is over until it is restarted
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Intent, MatchConfig, MatchController, Phase, PieceSeed};
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut game = MatchController::with_seed(MatchConfig::default(), seed);
//!
//! while game.phase() == Phase::Playing {
//!     game.apply(Intent::HardDrop);
//! }
//! assert!(game.stats().completed_pieces() > 0);
//!
//! game.apply(Intent::Restart);
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.score(), 0);
//! ```

pub use self::{intent::*, match_controller::*, match_stats::*, piece_source::*, snapshot::*};

mod intent;
mod match_controller;
mod match_stats;
mod piece_source;
mod snapshot;
