//! Session use cases.
//!
//! Settles finished learning sessions: applies the balance rules, stamps a
//! history record, and persists both the record and the updated profile.

use std::sync::Arc;

mod settle;

pub use settle::{GameContext, SessionError, SettleSession};

/// Container for session use cases.
pub struct SessionUseCases {
    pub settle: Arc<SettleSession>,
}

impl SessionUseCases {
    pub fn new(settle: Arc<SettleSession>) -> Self {
        Self { settle }
    }
}
