//! Rotation engine.
//!
//! Cycles a bounded window over a list with wraparound, manual navigation,
//! pause/resume, and (through the driver) timer-driven auto-advance.

mod driver;
mod engine;
mod snapshot;

pub use driver::{DEFAULT_PERIOD, RotationDriver, RotationHandle};
pub use engine::{DEFAULT_WINDOW_SIZE, RotationEngine};
pub use snapshot::{RotationSnapshot, RotationState};
