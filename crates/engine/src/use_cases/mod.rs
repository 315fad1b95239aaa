//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod progress;
pub mod session;

pub use progress::{AnalyzeProgress, ProgressUseCases};
pub use session::{GameContext, SessionError, SessionUseCases, SettleSession};
