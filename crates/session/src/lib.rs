//! Game session layer: foreground driver, request dispatcher, and the
//! background search worker.
//!
//! The foreground side never blocks on a search. It hands a snapshot to
//! the [`Worker`] through a [`Dispatcher`], keeps accepting UI traffic,
//! and applies the engine's move when it arrives. A search that answers
//! too late, or after a reset, is dropped instead of landing on a board
//! it was not computed for.

pub mod dispatch;
pub mod session;
pub mod worker;

pub use dispatch::{DispatchError, DispatchState, Dispatcher};
pub use session::GameSession;
pub use worker::Worker;
