//! Session State Machine
//!
//! Tracks where a local session is between rounds.

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Idle,
    Playing,
    GameOver,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    GameOver,
    PlayAgain,
    Quit,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: FsmState,
    pub to_state: FsmState,
    pub action: SessionAction,
}

/// Session Finite State Machine
#[derive(Debug)]
pub struct SessionFsm {
    state: FsmState,
}

impl SessionFsm {
    pub fn new() -> Self {
        Self {
            state: FsmState::Idle,
        }
    }

    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: SessionAction) -> bool {
        self.next_state(action).is_some()
    }

    /// Attempt a transition. Invalid actions leave the state unchanged.
    pub fn transition(&mut self, action: SessionAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    fn next_state(&self, action: SessionAction) -> Option<FsmState> {
        match (self.state, action) {
            // From Idle
            (FsmState::Idle, SessionAction::Start) => Some(FsmState::Playing),

            // From Playing
            (FsmState::Playing, SessionAction::GameOver) => Some(FsmState::GameOver),
            (FsmState::Playing, SessionAction::Quit) => Some(FsmState::Idle),

            // From GameOver
            (FsmState::GameOver, SessionAction::PlayAgain) => Some(FsmState::Playing),
            (FsmState::GameOver, SessionAction::Quit) => Some(FsmState::Idle),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == FsmState::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.state == FsmState::GameOver
    }
}

impl Default for SessionFsm {
    fn default() -> Self {
        Self::new()
    }
}
