// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod catalog;
pub mod challenge;
pub mod config;
pub mod distractor;
pub mod dojo;
pub mod engine;
pub mod error;
pub mod history;
pub mod judge;
pub mod runtime;
pub mod selector;
pub mod session;
pub mod telemetry;
pub mod util;

pub use challenge::{ChallengeConfig, Direction, Dojo, Mode, Status};
pub use engine::{Challenge, ChallengeView, Engine, SessionSummary};
