//! Battlemat engine
//!
//! Host-side adapters around the pure rules core: the `rand`-backed dice
//! roller, the encounter state that applies requested mutations and keeps
//! the combat log, and tracing setup.

pub mod dice;
pub mod encounter;
pub mod telemetry;

pub use dice::RandRoller;
pub use encounter::{publish, Encounter};
