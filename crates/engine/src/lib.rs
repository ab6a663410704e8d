//! Arena Engine library.
//!
//! Server-side code for the arena: fights, characters and the leaderboard.
//!
//! ## Structure
//!
//! - `use_cases/` - Fight and character orchestration across ports
//! - `infrastructure/` - Ports, SQLite adapters, clock, RNG and config
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
