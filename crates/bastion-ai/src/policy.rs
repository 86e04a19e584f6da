//! Cadence bookkeeping for the opponent's two decision loops.

use bastion_core::constants::SPECIAL_EVAL_INTERVAL_TICKS;
use bastion_core::enums::Difficulty;

use crate::production::production_interval;

/// Adversarial policy state. Production and special-weapon evaluation run on
/// independent cadences driven by the tick counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentPolicy {
    pub difficulty: Difficulty,
    pub last_production_tick: u64,
    pub last_special_tick: Option<u64>,
    /// Specials are withheld before this tick.
    pub grace_end_tick: u64,
    /// The outpost-loss reaction has fired.
    pub reacted_to_outpost_loss: bool,
    /// Whether the opposing outpost stood at the previous special check.
    pub outpost_seen_last_check: bool,
}

impl OpponentPolicy {
    pub fn new(difficulty: Difficulty, grace_ticks: u64) -> Self {
        Self {
            difficulty,
            last_production_tick: 0,
            last_special_tick: None,
            grace_end_tick: grace_ticks,
            reacted_to_outpost_loss: false,
            outpost_seen_last_check: false,
        }
    }

    /// More ticks than the current interval have passed since the last attempt.
    pub fn production_due(&self, tick: u64, enemy_units: u32) -> bool {
        tick.saturating_sub(self.last_production_tick)
            > production_interval(self.difficulty, enemy_units)
    }

    pub fn mark_production(&mut self, tick: u64) {
        self.last_production_tick = tick;
    }

    /// Top tier only, past the grace period, once per evaluation interval.
    pub fn special_due(&self, tick: u64) -> bool {
        if !self.difficulty.is_top_tier() || tick < self.grace_end_tick {
            return false;
        }
        match self.last_special_tick {
            Some(last) => tick.saturating_sub(last) >= SPECIAL_EVAL_INTERVAL_TICKS,
            None => true,
        }
    }

    pub fn mark_special(&mut self, tick: u64) {
        self.last_special_tick = Some(tick);
    }

    /// Record whether the outpost stands now. Returns true when it was present
    /// at the previous check, is gone now, and the reaction has not fired.
    pub fn observe_outpost(&mut self, present: bool) -> bool {
        let lost = self.outpost_seen_last_check && !present && !self.reacted_to_outpost_loss;
        self.outpost_seen_last_check = present;
        lost
    }

    pub fn record_outpost_reaction(&mut self) {
        self.reacted_to_outpost_loss = true;
    }
}
