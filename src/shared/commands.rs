//! Commands for controlling the simulation from a front end.

use serde::{Deserialize, Serialize};

/// Commands sent from the front end to the simulation thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimCommand {
    /// Pause the simulation
    Pause,
    /// Resume the simulation
    Resume,
    /// Execute a single turn
    Step,
    /// Set turn cadence multiplier (0.1 - 10.0)
    SetSpeed(f32),
    /// Discard the world and rebuild it from the held config
    Reset,
    /// Shutdown the simulation thread
    Shutdown,
}

/// Current simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimState {
    /// Turns advance on the cadence timer
    Running,
    /// Waiting for commands
    Paused,
    /// No more turns will run (shutdown or engine fault)
    Stopped,
}

impl Default for SimState {
    fn default() -> Self {
        Self::Paused
    }
}
