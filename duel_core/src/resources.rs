use crate::side::Side;

/// Match state machine: Running until a ship's health reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchState {
    #[default]
    Running,
    Over {
        winner: Side,
    },
}

impl MatchState {
    pub fn is_over(&self) -> bool {
        matches!(self, MatchState::Over { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchState::Running => None,
            MatchState::Over { winner } => Some(*winner),
        }
    }
}

/// A projectile striking the opposing ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub attacker: Side,
    pub victim: Side,
    pub remaining: u32, // victim health after the hit
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub shots: Vec<Side>,
    pub hits: Vec<Hit>,
    pub expired: Vec<Side>, // owner of each projectile that left the arena
    pub match_over: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.shots.clear();
        self.hits.clear();
        self.expired.clear();
        self.match_over = None;
    }

    pub fn shots_by(&self, side: Side) -> usize {
        self.shots.iter().filter(|s| **s == side).count()
    }

    pub fn hits_by(&self, side: Side) -> usize {
        self.hits.iter().filter(|h| h.attacker == side).count()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
            && self.hits.is_empty()
            && self.expired.is_empty()
            && self.match_over.is_none()
    }
}

/// Outcome of advancing one side's projectiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub hits: u32,
    pub expired: u32,
    pub knocked_out: bool,
}
