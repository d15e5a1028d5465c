//! Score keeping as an injected observer.

use std::fmt;

use log::debug;

use steer_core::{AgentId, Tick};

use crate::SimObserver;

/// Why an agent left the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RemovalCause {
    /// Destroyed by the player; scores the profile's `score_value`.
    Defeated,
    /// Removed for any other reason (lifetime ended, left the scene…).
    Despawned,
}

impl fmt::Display for RemovalCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalCause::Defeated  => f.write_str("defeated"),
            RemovalCause::Despawned => f.write_str("despawned"),
        }
    }
}

/// Running score and defeat count.
///
/// Once [`finish`][Self::finish] has been called the board is frozen: later
/// removals are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score:    u64,
    defeated: u32,
    finished: bool,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn defeated(&self) -> u32 {
        self.defeated
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Freeze the board.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Count one removal.  Returns `true` if it changed the board.
    pub fn record(&mut self, cause: RemovalCause, score_value: u32) -> bool {
        if self.finished || cause != RemovalCause::Defeated {
            return false;
        }
        self.score += u64::from(score_value);
        self.defeated += 1;
        true
    }
}

impl SimObserver for Scoreboard {
    fn on_agent_removed(&mut self, tick: Tick, agent: AgentId, cause: RemovalCause, score_value: u32) {
        if self.record(cause, score_value) {
            debug!("{tick}: {agent} {cause}, score now {}", self.score);
        } else if self.finished {
            debug!("{tick}: {agent} {cause} after finish, not scored");
        }
    }
}
