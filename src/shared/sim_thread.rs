//! Simulation thread that runs independently from the presentation layer.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::world::World;

use super::commands::{SimCommand, SimState};
use super::snapshot::WorldSnapshot;

/// Milliseconds per turn at speed 1.0.
const BASE_TURN_MS: u64 = 1000;

/// Handle for controlling the simulation thread.
pub struct SimulationHandle {
    /// Thread handle
    thread: Option<JoinHandle<()>>,
    /// Channel to send commands to the simulation
    command_tx: Sender<SimCommand>,
    /// Channel to receive snapshots from the simulation
    snapshot_rx: Receiver<WorldSnapshot>,
    /// Front-end view of the simulation state
    pub state: SimState,
}

impl SimulationHandle {
    /// Spawn a new simulation thread for the given configuration.
    pub fn spawn(config: Config) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();

        let thread = thread::spawn(move || {
            run_simulation(config, command_rx, snapshot_tx);
        });

        Self {
            thread: Some(thread),
            command_tx,
            snapshot_rx,
            state: SimState::Paused,
        }
    }

    /// Send a command to the simulation.
    pub fn send(&mut self, command: SimCommand) {
        match &command {
            SimCommand::Pause => self.state = SimState::Paused,
            SimCommand::Resume => self.state = SimState::Running,
            SimCommand::Reset => self.state = SimState::Paused,
            SimCommand::Shutdown => self.state = SimState::Stopped,
            _ => {}
        }
        let _ = self.command_tx.send(command);
    }

    /// Try to receive the latest snapshot (non-blocking).
    pub fn try_recv_snapshot(&self) -> Option<WorldSnapshot> {
        let mut latest = None;
        // Drain all available snapshots, keep only the latest
        loop {
            match self.snapshot_rx.try_recv() {
                Ok(snapshot) => latest = Some(snapshot),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// Check if the simulation is running.
    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    /// Shutdown the simulation thread.
    pub fn shutdown(&mut self) {
        self.send(SimCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main simulation loop running in a separate thread.
fn run_simulation(
    config: Config,
    command_rx: Receiver<SimCommand>,
    snapshot_tx: Sender<WorldSnapshot>,
) {
    let mut world = match World::new(config.clone()) {
        Ok(world) => world,
        Err(e) => {
            log::error!("World construction failed: {}", e);
            return;
        }
    };
    let mut state = SimState::Paused;
    let mut speed = 1.0f32;
    let mut last_turn = Instant::now();

    // Send initial snapshot
    let _ = snapshot_tx.send(world.snapshot());

    loop {
        // Process commands (non-blocking)
        match command_rx.try_recv() {
            Ok(cmd) => match cmd {
                SimCommand::Pause => state = SimState::Paused,
                SimCommand::Resume => state = SimState::Running,
                SimCommand::Step => {
                    match world.step() {
                        Ok(()) => {}
                        Err(e) => {
                            log::error!("Turn {} aborted: {}", world.turn(), e);
                            state = SimState::Stopped;
                        }
                    }
                    let _ = snapshot_tx.send(world.snapshot());
                }
                SimCommand::SetSpeed(s) => speed = s.clamp(0.1, 10.0),
                SimCommand::Reset => match World::new(config.clone()) {
                    Ok(fresh) => {
                        world = fresh;
                        state = SimState::Paused;
                        log::info!(
                            "World reset: population={}, seed={}",
                            world.population(),
                            world.seed()
                        );
                        let _ = snapshot_tx.send(world.snapshot());
                    }
                    Err(e) => {
                        log::error!("World reset failed: {}", e);
                        state = SimState::Stopped;
                    }
                },
                SimCommand::Shutdown => return,
            },
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                return;
            }
        }

        // Run a turn if not paused, on the current cadence
        if state == SimState::Running {
            let turn_duration = Duration::from_millis((BASE_TURN_MS as f32 / speed) as u64);
            if last_turn.elapsed() >= turn_duration {
                match world.step() {
                    Ok(()) => {
                        let _ = snapshot_tx.send(world.snapshot());
                    }
                    Err(e) => {
                        log::error!("Turn {} aborted: {}", world.turn(), e);
                        state = SimState::Stopped;
                    }
                }
                last_turn = Instant::now();

                if world.is_extinct() {
                    log::info!("Population extinct at turn {}", world.turn());
                    state = SimState::Paused;
                }
            }
        }

        // Avoid busy-waiting when idle
        if state == SimState::Running {
            thread::yield_now();
        } else {
            thread::sleep(Duration::from_millis(16));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> Config {
        let mut config = Config::default();
        config.world.width = 8;
        config.world.height = 8;
        config.population.grazers = 2;
        config.population.prowlers = 0;
        config.population.howlers = 0;
        config.population.sloths = 2;
        config
    }

    #[test]
    fn test_spawn_sends_initial_snapshot() {
        let mut handle = SimulationHandle::spawn(tiny_config());

        let mut snapshot = None;
        for _ in 0..50 {
            snapshot = handle.try_recv_snapshot();
            if snapshot.is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let snapshot = snapshot.expect("no initial snapshot received");
        assert_eq!(snapshot.turn, 0);
        assert_eq!(snapshot.critters.len(), 4);

        handle.shutdown();
        assert_eq!(handle.state, SimState::Stopped);
    }

    #[test]
    fn test_step_command_advances_one_turn() {
        let mut handle = SimulationHandle::spawn(tiny_config());
        handle.send(SimCommand::Step);

        let mut latest_turn = 0;
        for _ in 0..100 {
            if let Some(snapshot) = handle.try_recv_snapshot() {
                latest_turn = snapshot.turn;
                if latest_turn == 1 {
                    break;
                }
            }
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(latest_turn, 1);
        handle.shutdown();
    }
}
