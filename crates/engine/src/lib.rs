//! English Quest engine library.
//!
//! Persistence, settlement orchestration, and composition around the pure
//! rules in `english-quest-domain`.
//!
//! ## Structure
//!
//! - `entities/` - Entity modules wrapping repository ports
//! - `use_cases/` - Session settlement and progress analysis
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
