//! Plain data row types written by output backends.

/// One live agent's pose at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:  u32,
    pub tick:      u64,
    pub time_secs: f32,
    pub position:  [f32; 3],
    /// Unit forward vector.
    pub forward:   [f32; 3],
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub time_secs:        f32,
    pub live_agents:      u64,
    pub refreshed_agents: u64,
}

/// One agent leaving the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalRow {
    pub tick:        u64,
    pub agent_id:    u32,
    /// `defeated` or `despawned`.
    pub cause:       &'static str,
    pub score_value: u32,
}
