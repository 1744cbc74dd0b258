use crate::error::AppError;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;

/// Studio lifecycle states as observed by an embedding UI.
///
/// `Generating` covers the await on a synthesis adapter; `Speaking` covers
/// an active playback session. A new request may supersede active playback,
/// hence `Speaking -> Generating` is a valid transition.
#[derive(Debug, Clone, PartialEq)]
pub enum StudioState {
    Idle,
    Generating,
    Speaking,
    Error { message: String },
}

pub struct StateManager {
    state: Arc<RwLock<StudioState>>,
    state_tx: Sender<StudioState>,
    state_rx: Receiver<StudioState>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        let (state_tx, state_rx) = crossbeam_channel::unbounded();
        Self {
            state: Arc::new(RwLock::new(StudioState::Idle)),
            state_tx,
            state_rx,
        }
    }

    pub fn transition(&self, new_state: StudioState) -> Result<(), AppError> {
        let mut current = self.state.write();

        let valid = matches!(
            (&*current, &new_state),
            (StudioState::Idle, StudioState::Generating)
                | (StudioState::Idle, StudioState::Speaking)
                | (StudioState::Generating, StudioState::Speaking)
                | (StudioState::Generating, StudioState::Idle)
                | (StudioState::Generating, StudioState::Error { .. })
                | (StudioState::Speaking, StudioState::Idle)
                | (StudioState::Speaking, StudioState::Generating)
                | (StudioState::Speaking, StudioState::Error { .. })
                | (StudioState::Error { .. }, StudioState::Idle)
                | (StudioState::Error { .. }, StudioState::Generating)
        );

        if !valid {
            return Err(AppError::InvalidTransition(format!(
                "{:?} -> {:?}",
                *current, new_state
            )));
        }

        tracing::info!("State transition: {:?} -> {:?}", *current, new_state);
        *current = new_state.clone();
        let _ = self.state_tx.send(new_state);
        Ok(())
    }

    pub fn current(&self) -> StudioState {
        self.state.read().clone()
    }

    pub fn subscribe(&self) -> Receiver<StudioState> {
        self.state_rx.clone()
    }
}
